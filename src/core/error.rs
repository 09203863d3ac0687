// 错误处理系统
// 开发心理：统一的错误类型系统，提供清晰的错误信息和恢复机制
// 目录类故障（Catalog）在引擎内部被吸收降级，永远不会从创建/升级路径冒出

use serde::{Deserialize, Serialize};
use std::{error::Error as StdError, fmt};

// 引擎主要错误类型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineError {
    // 掷取规格名未注册
    SpecificationNotFound(String),

    // 存储中找不到指定ID的怪物
    MonsterNotFound(i64),

    // 升级请求的等级增量必须为正
    InvalidLevelDelta(u32),

    // 底层存储错误
    Database(String),

    // 招式/特性目录错误（调用方内部降级，不对外传播）
    Catalog(String),

    // 持久化数据编解码错误
    Serialization(String),

    // 通用输入错误
    InvalidInput(String),
}

// Result类型别名
pub type Result<T> = std::result::Result<T, EngineError>;

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::SpecificationNotFound(name) => {
                write!(f, "掷取规格未找到: {}", name)
            }
            EngineError::MonsterNotFound(id) => write!(f, "怪物未找到: {}", id),
            EngineError::InvalidLevelDelta(delta) => {
                write!(f, "无效的等级增量: {} (必须大于0)", delta)
            }
            EngineError::Database(msg) => write!(f, "数据库错误: {}", msg),
            EngineError::Catalog(msg) => write!(f, "目录错误: {}", msg),
            EngineError::Serialization(msg) => write!(f, "序列化错误: {}", msg),
            EngineError::InvalidInput(msg) => write!(f, "输入无效: {}", msg),
        }
    }
}

impl StdError for EngineError {}

// 错误转换实现
impl From<rusqlite::Error> for EngineError {
    fn from(error: rusqlite::Error) -> Self {
        EngineError::Database(error.to_string())
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(error: serde_json::Error) -> Self {
        EngineError::Serialization(error.to_string())
    }
}

impl EngineError {
    // 目录类错误可在引擎内降级为fallback，其余错误终止当前操作
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EngineError::Catalog(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = EngineError::SpecificationNotFound("Moon Cake".to_string());
        assert_eq!(error.to_string(), "掷取规格未找到: Moon Cake");

        let error = EngineError::InvalidLevelDelta(0);
        assert!(error.to_string().contains('0'));
    }

    #[test]
    fn test_error_conversion() {
        let json_error = serde_json::from_str::<Vec<String>>("not json").unwrap_err();
        let engine_error: EngineError = json_error.into();
        assert!(matches!(engine_error, EngineError::Serialization(_)));
    }

    #[test]
    fn test_recoverable() {
        assert!(EngineError::Catalog("timeout".to_string()).is_recoverable());
        assert!(!EngineError::MonsterNotFound(7).is_recoverable());
    }
}
