use serde::Deserialize;
use std::str::FromStr;

/// 装配模式 - 控制缺失依赖时装配引擎的严格程度
///
/// Bean 定义只保存并暴露该值，由外部装配引擎解释执行。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WiringMode {
    /// 使用容器配置中的默认模式
    #[default]
    Default,

    /// 不进行任何装配
    None,

    /// 严格模式 - 引用的依赖必须全部存在，否则报错
    Strict,

    /// 可选模式 - 缺失的依赖被忽略
    Optional,

    /// 自动装配 - 除显式引用外，按属性名称/类型自动匹配依赖
    Autowire,
}

impl WiringMode {
    /// 缺失依赖是否应当视为错误
    pub fn is_strict(&self) -> bool {
        matches!(self, WiringMode::Strict)
    }
}

impl FromStr for WiringMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(WiringMode::Default),
            "none" => Ok(WiringMode::None),
            "strict" => Ok(WiringMode::Strict),
            "optional" => Ok(WiringMode::Optional),
            "autowire" => Ok(WiringMode::Autowire),
            _ => Err(format!("Invalid wiring mode: {}", s)),
        }
    }
}

impl std::fmt::Display for WiringMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WiringMode::Default => write!(f, "default"),
            WiringMode::None => write!(f, "none"),
            WiringMode::Strict => write!(f, "strict"),
            WiringMode::Optional => write!(f, "optional"),
            WiringMode::Autowire => write!(f, "autowire"),
        }
    }
}
