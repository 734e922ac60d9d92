// petite-core: 轻量 IoC 容器的 Bean 定义与注入点缓存
//
// 每个注册的组件对应一个 Bean 定义：
// - 不可变的身份（名称、类型、作用域、装配模式）
// - 由装配引擎填充的注入点缓存（构造函数、属性、集合、方法、初始化方法）
// - 通过可插拔的作用域存取实例，自身不持有实例

pub mod bean;
pub mod config;
pub mod error;
pub mod injection;
pub mod logging;
pub mod scope;
pub mod types;
pub mod utils;
pub mod wiring;

// 重新导出常用类型
pub use bean::{BeanDefinition, CacheState};
pub use config::{ContainerSettings, PetiteConfig};
pub use error::{BeanError, BeanResult};
pub use injection::{
    BeanReferences, CtorInjectionPoint, DependencyRef, InitMethodInvocationStrategy,
    InitMethodPoint, MemberDescriptor, MethodInjectionPoint, PropertyInjectionPoint,
    SetInjectionPoint,
};
pub use logging::{LogFormat, LogLevel, LoggingConfig};
pub use scope::{BeanInstance, PrototypeScope, Scope, ScopeBinding, ScopeKind, SingletonScope};
pub use types::TypeDescriptor;
pub use wiring::WiringMode;

/// Prelude 模块，包含常用的 traits 和类型
pub mod prelude {
    pub use crate::bean::{BeanDefinition, CacheState};
    pub use crate::config::PetiteConfig;
    pub use crate::error::{BeanError, BeanResult};
    pub use crate::injection::{
        BeanReferences, CtorInjectionPoint, DependencyRef, InitMethodPoint, MemberDescriptor,
        MethodInjectionPoint, PropertyInjectionPoint, SetInjectionPoint,
    };
    pub use crate::scope::{BeanInstance, PrototypeScope, Scope, ScopeKind, SingletonScope};
    pub use crate::types::TypeDescriptor;
    pub use crate::utils;
    pub use crate::wiring::WiringMode;
}
