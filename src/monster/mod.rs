// 怪物模块 - 数据模型、属性计算、招式获取与成长
// 开发心理：属性公式是确定性的纯函数，随机性只出现在生成与升级的明确位置
// 外部协作者（采样器、招式目录、怪物存储）都以trait接入，便于替换与测试

pub mod moves;
pub mod progression;
pub mod record;
pub mod sampler;
pub mod stats;

// 重新导出主要类型
pub use moves::{MoveCatalog, MoveSource};
pub use progression::{MonsterStore, ProgressionEngine};
pub use record::{Gender, MonsterRecord};
pub use sampler::MonsterSampler;
pub use stats::{compute_stats, GeneticProfile, Nature, StatBlock, StatType};
