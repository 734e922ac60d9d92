use std::fmt;
use std::sync::Arc;

use crate::error::{BeanError, BeanResult};
use crate::injection::{
    CtorInjectionPoint, InitMethodPoint, MethodInjectionPoint, PropertyInjectionPoint,
    SetInjectionPoint,
};
use crate::scope::{BeanInstance, Scope, ScopeBinding, ScopeKind};
use crate::types::TypeDescriptor;
use crate::wiring::WiringMode;

/// 注入点缓存的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheState {
    /// 刚构造完成，缓存为空
    #[default]
    Uninitialized,

    /// 装配分析已完成，缓存不再变化
    Populated,
}

/// Bean 定义 - 组件的不可变身份加上延迟填充的注入点缓存
///
/// 身份字段（名称、类型、作用域、装配模式）在构造时确定，之后不再改变。
/// 缓存由外部装配引擎在构建阶段通过 `&mut self` 的追加操作填充，
/// 之后定义通常放入 `Arc` 发布给并发的实例创建者只读使用。
///
/// Bean 定义从不持有实例，实例的存取全部委托给绑定的作用域。
pub struct BeanDefinition {
    name: String,
    bean_type: TypeDescriptor,
    scope: Option<ScopeBinding>,
    wiring_mode: WiringMode,

    // 缓存
    ctor: Option<CtorInjectionPoint>,
    properties: Vec<PropertyInjectionPoint>,
    sets: Vec<SetInjectionPoint>,
    methods: Vec<MethodInjectionPoint>,
    init_methods: Vec<InitMethodPoint>,
    params: Vec<String>,
    cache_state: CacheState,
}

impl BeanDefinition {
    /// 创建新的 Bean 定义
    ///
    /// `scope` 为 None 时容器只装配实例而不保存。名称不能为空白。
    pub fn new(
        name: impl Into<String>,
        bean_type: TypeDescriptor,
        scope: Option<&Arc<dyn Scope>>,
        wiring_mode: WiringMode,
    ) -> BeanResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(BeanError::InvalidName);
        }

        let scope = scope.map(ScopeBinding::new);

        tracing::trace!(
            "Defining bean: name='{}', type='{}', scope={:?}, wiring={}",
            name,
            bean_type,
            scope.as_ref().map(|s| s.kind()),
            wiring_mode
        );

        Ok(Self {
            name,
            bean_type,
            scope,
            wiring_mode,
            ctor: None,
            properties: Vec::new(),
            sets: Vec::new(),
            methods: Vec::new(),
            init_methods: Vec::new(),
            params: Vec::new(),
            cache_state: CacheState::Uninitialized,
        })
    }

    /// 以类型 `T` 创建 Bean 定义
    pub fn of<T: 'static>(
        name: impl Into<String>,
        scope: Option<&Arc<dyn Scope>>,
        wiring_mode: WiringMode,
    ) -> BeanResult<Self> {
        Self::new(name, TypeDescriptor::of::<T>(), scope, wiring_mode)
    }

    // ---------------------------------------------------------------- 身份

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bean_type(&self) -> TypeDescriptor {
        self.bean_type
    }

    /// 绑定的作用域种类；None 表示只装配不保存的 Bean
    pub fn scope_kind(&self) -> Option<ScopeKind> {
        self.scope.as_ref().map(ScopeBinding::kind)
    }

    pub fn wiring_mode(&self) -> WiringMode {
        self.wiring_mode
    }

    // ---------------------------------------------------------------- 缓存

    pub fn ctor_injection_point(&self) -> Option<&CtorInjectionPoint> {
        self.ctor.as_ref()
    }

    pub fn property_injection_points(&self) -> &[PropertyInjectionPoint] {
        &self.properties
    }

    pub fn set_injection_points(&self) -> &[SetInjectionPoint] {
        &self.sets
    }

    pub fn method_injection_points(&self) -> &[MethodInjectionPoint] {
        &self.methods
    }

    pub fn init_method_points(&self) -> &[InitMethodPoint] {
        &self.init_methods
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn cache_state(&self) -> CacheState {
        self.cache_state
    }

    pub fn is_populated(&self) -> bool {
        self.cache_state == CacheState::Populated
    }

    // ---------------------------------------------------------------- 追加

    /// 设置选定的构造函数注入点
    pub fn set_ctor_injection_point(&mut self, ctor: CtorInjectionPoint) {
        self.warn_if_populated("constructor injection point");
        self.ctor = Some(ctor);
    }

    pub fn add_property_injection_point(&mut self, point: PropertyInjectionPoint) {
        self.warn_if_populated("property injection point");
        self.properties.push(point);
    }

    pub fn add_set_injection_point(&mut self, point: SetInjectionPoint) {
        self.warn_if_populated("set injection point");
        self.sets.push(point);
    }

    pub fn add_method_injection_point(&mut self, point: MethodInjectionPoint) {
        self.warn_if_populated("method injection point");
        self.methods.push(point);
    }

    /// 合并一批初始化方法，已有的在前，新的在后
    pub fn add_init_method_points(&mut self, points: impl IntoIterator<Item = InitMethodPoint>) {
        self.warn_if_populated("init method points");
        self.init_methods.extend(points);
    }

    /// 合并一批参数，已有的在前，新的在后
    pub fn add_params<I, S>(&mut self, params: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.warn_if_populated("params");
        self.params.extend(params.into_iter().map(Into::into));
    }

    /// 标记装配分析完成，之后状态不可回退
    pub fn mark_populated(&mut self) {
        if self.cache_state == CacheState::Populated {
            return;
        }
        self.cache_state = CacheState::Populated;

        tracing::debug!(
            "Injection points cached for bean '{}': ctor={}, properties={}, sets={}, methods={}, init_methods={}, params={}",
            self.name,
            self.ctor.is_some(),
            self.properties.len(),
            self.sets.len(),
            self.methods.len(),
            self.init_methods.len(),
            self.params.len()
        );
    }

    // 已发布的缓存仍可追加，但这通常说明装配分析被重复执行
    fn warn_if_populated(&self, what: &str) {
        if self.is_populated() {
            tracing::warn!(
                "Appending {} to bean '{}' after its injection points were cached",
                what,
                self.name
            );
        }
    }

    // ---------------------------------------------------------------- 作用域委托

    /// 委托给 `Scope::lookup`
    pub fn scope_lookup(&self) -> BeanResult<Option<BeanInstance>> {
        tracing::trace!("Looking up bean '{}' in its scope", self.name);
        self.bound_scope()?.lookup(&self.name)
    }

    /// 委托给 `Scope::register`
    pub fn scope_register(&self, instance: BeanInstance) -> BeanResult<()> {
        tracing::trace!("Registering instance of bean '{}' in its scope", self.name);
        self.bound_scope()?.register(&self.name, instance)
    }

    /// 委托给 `Scope::remove`
    pub fn scope_remove(&self) -> BeanResult<()> {
        tracing::trace!("Removing bean '{}' from its scope", self.name);
        self.bound_scope()?.remove(&self.name)
    }

    fn bound_scope(&self) -> BeanResult<Arc<dyn Scope>> {
        let binding = self.scope.as_ref().ok_or_else(|| BeanError::NoScope {
            bean: self.name.clone(),
        })?;

        binding.upgrade().ok_or_else(|| {
            tracing::warn!(
                "Scope {} of bean '{}' was released before delegation",
                binding.kind(),
                self.name
            );
            BeanError::ScopeReleased {
                bean: self.name.clone(),
            }
        })
    }
}

impl fmt::Display for BeanDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BeanDefinition{{name='{}', type={}, scope=", self.name, self.bean_type)?;
        match self.scope_kind() {
            Some(kind) => write!(f, "{}", kind)?,
            None => f.write_str("none")?,
        }
        write!(f, ", wiring={}}}", self.wiring_mode)
    }
}

impl fmt::Debug for BeanDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanDefinition")
            .field("name", &self.name)
            .field("type", &self.bean_type)
            .field("scope", &self.scope_kind())
            .field("wiring_mode", &self.wiring_mode)
            .field("cache_state", &self.cache_state)
            .field("ctor", &self.ctor.is_some())
            .field("properties", &self.properties.len())
            .field("sets", &self.sets.len())
            .field("methods", &self.methods.len())
            .field("init_methods", &self.init_methods.len())
            .field("params", &self.params.len())
            .finish()
    }
}
