// 工具模块 - 通用随机工具
// 开发心理：随机选择是生成流程的公共底座，性别权重和招式来源权重共用同一个实现

pub mod random;

pub use random::{RandomGenerator, WeightedItem};
