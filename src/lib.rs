// 怪物生成与成长引擎库入口
// 开发心理：引擎是纯计算核心，HTTP/Discord/管理界面都是外围的薄适配层
// 架构：模块化设计，外部协作者（采样器、招式目录、怪物存储）以trait边界接入

// 核心模块
pub mod core;
pub mod utils;

// 掷取规格与参数翻译
pub mod roll;

// 怪物数据、属性计算与成长
pub mod monster;

// SQLite与内存参考适配层
pub mod data;

// 重新导出主要类型
pub use crate::core::error::{EngineError, Result};
pub use crate::monster::moves::MoveCatalog;
pub use crate::monster::progression::{MonsterStore, ProgressionEngine};
pub use crate::monster::record::{Gender, MonsterRecord};
pub use crate::monster::sampler::MonsterSampler;
pub use crate::monster::stats::{compute_stats, GeneticProfile, Nature, StatBlock, StatType};
pub use crate::roll::params::{FlatFilterParameters, SamplingParameters};
pub use crate::roll::specification::{FusionPolicy, RollSpecification};
pub use crate::roll::translator::{resolve, translate};
pub use crate::utils::random::RandomGenerator;
