use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{BeanError, BeanResult};
use crate::logging::LoggingConfig;
use crate::wiring::WiringMode;

/// 容器相关配置，对应 `[container]` 段
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContainerSettings {
    /// `WiringMode::Default` 被解析成的模式
    pub default_wiring_mode: WiringMode,
}

impl Default for ContainerSettings {
    fn default() -> Self {
        Self {
            default_wiring_mode: WiringMode::Strict,
        }
    }
}

/// Petite 配置
///
/// ```toml
/// [container]
/// default_wiring_mode = "optional"
///
/// [logging]
/// level = "debug"
/// format = "json"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PetiteConfig {
    pub container: ContainerSettings,
    pub logging: LoggingConfig,
}

impl PetiteConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 TOML 文件加载配置
    pub fn from_file(path: impl AsRef<Path>) -> BeanResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| BeanError::Config(format!("Failed to read config file {:?}: {}", path, e)))?;

        tracing::debug!("Loading configuration from {:?}", path);
        Self::from_toml_str(&content)
    }

    /// 从字符串解析 TOML 配置
    pub fn from_toml_str(content: &str) -> BeanResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| BeanError::Config(format!("Failed to parse TOML: {}", e)))?;

        if !is_concrete(config.container.default_wiring_mode) {
            return Err(BeanError::Config(
                "container.default_wiring_mode must name a concrete mode".to_string(),
            ));
        }

        Ok(config)
    }

    /// 设置默认装配模式；`WiringMode::Default` 不是具体模式，会被忽略
    pub fn with_default_wiring_mode(mut self, mode: WiringMode) -> Self {
        if is_concrete(mode) {
            self.container.default_wiring_mode = mode;
        } else {
            tracing::warn!(
                "Ignoring default wiring mode '{}', keeping '{}'",
                mode,
                self.container.default_wiring_mode
            );
        }
        self
    }

    /// 把 `WiringMode::Default` 替换为配置的默认模式，其他模式原样返回
    pub fn resolve_wiring_mode(&self, mode: WiringMode) -> WiringMode {
        match mode {
            WiringMode::Default => self.container.default_wiring_mode,
            other => other,
        }
    }
}

fn is_concrete(mode: WiringMode) -> bool {
    mode != WiringMode::Default
}
