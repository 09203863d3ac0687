// 掷取模块 - 规格注册表与采样参数翻译
// 开发心理：主题道具用声明式规格约束随机生成，翻译层把规格落成采样器的参数契约
// 数据流：规格注册表 → 翻译 → 特例修正 → 采样参数（槽位形式或扁平过滤形式）

pub mod params;
pub mod specification;
pub mod translator;

pub use params::{FlatFilterParameters, SamplingParameters};
pub use specification::{FusionPolicy, OverrideValue, RollSpecification};
pub use translator::{apply_special_case, resolve, translate};
