// 核心模块 - 错误类型与基础设施
// 开发心理：统一的错误出口，所有公开API共享同一个Result别名

pub mod error;

pub use error::{EngineError, Result};
