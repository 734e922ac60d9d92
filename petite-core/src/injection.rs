//! 注入点 - 描述依赖注入的位置以及依赖来源
//!
//! 这些类型是由外部装配引擎构建的不可变数据，Bean 定义只负责缓存，不做解释。

use std::fmt;

use crate::types::TypeDescriptor;

/// 对单个依赖的引用 - 按名称或按类型
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DependencyRef {
    /// 按 Bean 名称引用
    Name(String),

    /// 按 Bean 类型引用
    Type(TypeDescriptor),
}

impl DependencyRef {
    pub fn name(name: impl Into<String>) -> Self {
        DependencyRef::Name(name.into())
    }

    pub fn of_type<T: ?Sized + 'static>() -> Self {
        DependencyRef::Type(TypeDescriptor::of::<T>())
    }
}

impl fmt::Display for DependencyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyRef::Name(name) => write!(f, "'{}'", name),
            DependencyRef::Type(ty) => write!(f, "<{}>", ty.short_name()),
        }
    }
}

/// 一个依赖的候选引用列表，装配引擎按顺序尝试，命中第一个即止
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BeanReferences {
    refs: Vec<DependencyRef>,
}

impl BeanReferences {
    pub fn new(refs: Vec<DependencyRef>) -> Self {
        Self { refs }
    }

    /// 只有一个名称引用
    pub fn of_name(name: impl Into<String>) -> Self {
        Self::new(vec![DependencyRef::name(name)])
    }

    /// 只有一个类型引用
    pub fn of_type<T: ?Sized + 'static>() -> Self {
        Self::new(vec![DependencyRef::of_type::<T>()])
    }

    /// 追加一个备选引用
    pub fn or(mut self, reference: DependencyRef) -> Self {
        self.refs.push(reference);
        self
    }

    pub fn refs(&self) -> &[DependencyRef] {
        &self.refs
    }

    pub fn first(&self) -> Option<&DependencyRef> {
        self.refs.first()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    /// 引用中包含的所有 Bean 名称
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.refs.iter().filter_map(|r| match r {
            DependencyRef::Name(name) => Some(name.as_str()),
            DependencyRef::Type(_) => None,
        })
    }
}

impl fmt::Display for BeanReferences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.refs.iter().map(|r| r.to_string()).collect();
        write!(f, "[{}]", parts.join(" | "))
    }
}

/// 成员描述符 - 构造函数、字段、setter 或方法
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDescriptor {
    /// 声明该成员的类型
    pub declaring_type: TypeDescriptor,

    /// 成员名称
    pub name: String,

    /// 成员的值类型（字段/属性类型），方法和构造函数为 None
    pub value_type: Option<TypeDescriptor>,
}

impl MemberDescriptor {
    pub fn new(declaring_type: TypeDescriptor, name: impl Into<String>) -> Self {
        Self {
            declaring_type,
            name: name.into(),
            value_type: None,
        }
    }

    pub fn with_value_type(mut self, value_type: TypeDescriptor) -> Self {
        self.value_type = Some(value_type);
        self
    }
}

impl fmt::Display for MemberDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.declaring_type.short_name(), self.name)
    }
}

/// 构造函数名称，用于默认构造函数
pub const CTOR_NAME: &str = "new";

/// 构造函数注入点
///
/// 选定的构造函数签名，以及与其参数一一对应的依赖引用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CtorInjectionPoint {
    pub constructor: MemberDescriptor,
    pub references: Vec<BeanReferences>,
}

impl CtorInjectionPoint {
    pub fn new(constructor: MemberDescriptor, references: Vec<BeanReferences>) -> Self {
        Self {
            constructor,
            references,
        }
    }

    /// 无参构造函数
    pub fn default_ctor(bean_type: TypeDescriptor) -> Self {
        Self::new(MemberDescriptor::new(bean_type, CTOR_NAME), Vec::new())
    }

    pub fn arity(&self) -> usize {
        self.references.len()
    }
}

/// 属性注入点 - 单个字段，由一组候选引用提供值
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyInjectionPoint {
    pub property: MemberDescriptor,
    pub references: BeanReferences,
}

impl PropertyInjectionPoint {
    pub fn new(property: MemberDescriptor, references: BeanReferences) -> Self {
        Self {
            property,
            references,
        }
    }
}

/// 集合注入点 - 集合类型的属性，装配引擎注入所有元素类型匹配的 Bean
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetInjectionPoint {
    pub property: MemberDescriptor,
    pub element_type: TypeDescriptor,
}

impl SetInjectionPoint {
    pub fn new(property: MemberDescriptor, element_type: TypeDescriptor) -> Self {
        Self {
            property,
            element_type,
        }
    }
}

/// 方法注入点 - 方法的每个参数对应一组候选引用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInjectionPoint {
    pub method: MemberDescriptor,
    pub references: Vec<BeanReferences>,
}

impl MethodInjectionPoint {
    pub fn new(method: MemberDescriptor, references: Vec<BeanReferences>) -> Self {
        Self { method, references }
    }
}

/// 初始化方法的调用时机
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InitMethodInvocationStrategy {
    /// 构造完成后、装配之前
    PostConstruct,

    /// 定义的依赖装配完成后
    PostDefine,

    /// 全部装配和参数注入完成后（默认）
    #[default]
    PostInitialize,
}

/// 初始化方法点 - 构造和装配完成后调用的方法
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitMethodPoint {
    pub method: MemberDescriptor,

    /// 排序索引，值越小越先调用
    pub order: i32,

    pub strategy: InitMethodInvocationStrategy,
}

impl InitMethodPoint {
    pub fn new(method: MemberDescriptor, order: i32) -> Self {
        Self {
            method,
            order,
            strategy: InitMethodInvocationStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: InitMethodInvocationStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// 按 order 稳定排序，order 相同的保持原有顺序
pub fn sort_init_methods(points: &mut [InitMethodPoint]) {
    points.sort_by_key(|p| p.order);
}

/// 选出某一调用时机的初始化方法，保持原有顺序
pub fn filter_by_strategy(
    points: &[InitMethodPoint],
    strategy: InitMethodInvocationStrategy,
) -> Vec<&InitMethodPoint> {
    points.iter().filter(|p| p.strategy == strategy).collect()
}
