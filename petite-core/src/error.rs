//! 错误类型
//!
//! Bean 定义本身对错误是惰性的：访问器和追加操作永不失败。
//! 只有作用域委托、配置加载和日志初始化会产生错误。

use thiserror::Error;

/// Bean 定义层的错误
#[derive(Error, Debug)]
pub enum BeanError {
    /// 在未绑定作用域的 Bean 上调用了作用域委托
    #[error("Bean '{bean}' is not bound to a scope")]
    NoScope { bean: String },

    /// 作用域已被容器释放，弱引用无法升级
    #[error("Scope of bean '{bean}' has already been released by the container")]
    ScopeReleased { bean: String },

    /// 构造时传入了空白的 Bean 名称
    #[error("Bean name must not be blank")]
    InvalidName,

    /// 作用域实现内部的存储错误，原样透传
    #[error(transparent)]
    Storage(#[from] anyhow::Error),

    /// 配置加载失败
    #[error("Configuration error: {0}")]
    Config(String),

    /// 日志系统初始化失败
    #[error("Failed to initialize logging: {0}")]
    LoggingInitFailed(String),
}

pub type BeanResult<T> = std::result::Result<T, BeanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_is_transparent() {
        let err: BeanError = anyhow::anyhow!("session store unavailable").into();
        assert_eq!(err.to_string(), "session store unavailable");
    }

    #[test]
    fn test_no_scope_message_names_bean() {
        let err = BeanError::NoScope {
            bean: "userService".to_string(),
        };
        assert!(err.to_string().contains("userService"));
    }
}
