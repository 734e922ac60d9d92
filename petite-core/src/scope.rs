use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::error::BeanResult;
use crate::types::TypeDescriptor;

/// 由作用域保存的 Bean 实例
pub type BeanInstance = Arc<dyn Any + Send + Sync>;

/// 作用域 - 决定 Bean 实例存活多久、保存在哪里
///
/// 作用域实例由容器持有，Bean 定义只通过名称委托 `lookup`/`register`/`remove`。
/// 实现自行负责并发控制；调用可能阻塞（例如基于会话或网络的作用域）。
pub trait Scope: Send + Sync + 'static {
    /// 查找已保存的实例
    fn lookup(&self, name: &str) -> BeanResult<Option<BeanInstance>>;

    /// 保存实例，已有同名实例时覆盖
    fn register(&self, name: &str, instance: BeanInstance) -> BeanResult<()>;

    /// 移除实例，不存在时什么也不做
    fn remove(&self, name: &str) -> BeanResult<()>;

    /// 作用域的类型标识
    fn kind(&self) -> ScopeKind {
        ScopeKind::of::<Self>()
    }

    /// 容器关闭时调用
    fn shutdown(&self) {}
}

/// 作用域种类 - 标识 Bean 绑定的是哪一种作用域实现
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeKind(TypeDescriptor);

impl ScopeKind {
    pub fn of<S: ?Sized + 'static>() -> Self {
        Self(TypeDescriptor::of::<S>())
    }

    pub fn descriptor(&self) -> TypeDescriptor {
        self.0
    }

    pub fn is<S: ?Sized + 'static>(&self) -> bool {
        self.0.is::<S>()
    }
}

impl fmt::Debug for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScopeKind({})", self.0.short_name())
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.short_name())
    }
}

/// Bean 定义到作用域的非拥有绑定
///
/// 只持有弱引用，作用域的生命周期完全由容器管理。
#[derive(Clone)]
pub struct ScopeBinding {
    kind: ScopeKind,
    scope: Weak<dyn Scope>,
}

impl ScopeBinding {
    pub fn new(scope: &Arc<dyn Scope>) -> Self {
        Self {
            kind: scope.kind(),
            scope: Arc::downgrade(scope),
        }
    }

    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    /// 容器已释放作用域时返回 None
    pub fn upgrade(&self) -> Option<Arc<dyn Scope>> {
        self.scope.upgrade()
    }
}

impl fmt::Debug for ScopeBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeBinding")
            .field("kind", &self.kind)
            .field("alive", &(self.scope.strong_count() > 0))
            .finish()
    }
}

/// 单例作用域 - 每个名称在容器中只保存一个实例
#[derive(Default)]
pub struct SingletonScope {
    instances: RwLock<HashMap<String, BeanInstance>>,
}

impl SingletonScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.instances.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.instances.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.read().is_empty()
    }
}

impl Scope for SingletonScope {
    fn lookup(&self, name: &str) -> BeanResult<Option<BeanInstance>> {
        Ok(self.instances.read().get(name).cloned())
    }

    fn register(&self, name: &str, instance: BeanInstance) -> BeanResult<()> {
        let previous = self.instances.write().insert(name.to_string(), instance);
        if previous.is_some() {
            tracing::debug!("Replaced singleton instance of bean '{}'", name);
        }
        Ok(())
    }

    fn remove(&self, name: &str) -> BeanResult<()> {
        self.instances.write().remove(name);
        Ok(())
    }

    fn shutdown(&self) {
        let mut instances = self.instances.write();
        tracing::debug!("Releasing {} singleton instance(s)", instances.len());
        instances.clear();
    }
}

impl fmt::Debug for SingletonScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingletonScope")
            .field("instances", &self.len())
            .finish()
    }
}

/// 原型作用域 - 从不保存实例，每次都由容器重新创建
#[derive(Debug, Default, Clone, Copy)]
pub struct PrototypeScope;

impl PrototypeScope {
    pub fn new() -> Self {
        Self
    }
}

impl Scope for PrototypeScope {
    fn lookup(&self, _name: &str) -> BeanResult<Option<BeanInstance>> {
        Ok(None)
    }

    fn register(&self, _name: &str, _instance: BeanInstance) -> BeanResult<()> {
        Ok(())
    }

    fn remove(&self, _name: &str) -> BeanResult<()> {
        Ok(())
    }
}
