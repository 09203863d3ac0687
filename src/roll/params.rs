// 采样参数
// 开发心理：规格里的数组值翻译后只有两种归宿，包含集（过滤）或单个具体值（强制赋值）
// 物种槽位1-3、类型槽位1-5对应采样器的精确匹配列；翻译产物每次新建、用完即弃

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::roll::specification::OverrideValue;

/// 物种槽位数
pub const SPECIES_SLOTS: usize = 3;
/// 类型槽位数
pub const TYPE_SLOTS: usize = 5;

/// 传给采样器的参数契约
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingParameters {
    /// 掷取次数
    pub roll_count: u32,

    /// 融合三态：强制/禁止/未设置
    pub fusion_forced: Option<bool>,

    /// 融合物种数上限
    pub species_max: Option<u32>,

    /// 类型数下限
    pub types_min: Option<u32>,

    /// 不分槽位的物种包含集
    pub include_species: Vec<String>,

    /// 按槽位的物种包含集
    pub include_species_slots: [Vec<String>; SPECIES_SLOTS],

    /// 作用于全部类型槽位的类型包含集
    pub include_types: Vec<String>,

    /// 槽位强制物种（精确匹配）
    pub species_slots: [Option<String>; SPECIES_SLOTS],

    /// 槽位强制类型（精确匹配）
    pub type_slots: [Option<String>; TYPE_SLOTS],

    /// 生成后覆盖到怪物上的属性，不作为生成期过滤条件
    pub override_attribute: Option<String>,

    /// 未识别键原样透传
    pub extra: HashMap<String, OverrideValue>,
}

impl SamplingParameters {
    pub fn new(roll_count: u32) -> Self {
        Self {
            roll_count: roll_count.max(1),
            fusion_forced: None,
            species_max: None,
            types_min: None,
            include_species: Vec::new(),
            include_species_slots: Default::default(),
            include_types: Vec::new(),
            species_slots: Default::default(),
            type_slots: Default::default(),
            override_attribute: None,
            extra: HashMap::new(),
        }
    }

    /// 扁平化为后端过滤形式
    ///
    /// 槽位强制值与包含集合并进同一个列表后，"该槽位必须等于此值"
    /// 与"任意槽位取这些值之一"的区别就丢失了；需要槽位精度的调用方
    /// 应直接使用槽位形式。
    pub fn to_legacy_filter(&self) -> FlatFilterParameters {
        let mut allowed_types: Vec<String> = self.include_types.clone();
        for slot in self.type_slots.iter().flatten() {
            allowed_types.push(slot.clone());
        }

        let mut allowed_species: Vec<String> = self.include_species.clone();
        for pool in &self.include_species_slots {
            allowed_species.extend(pool.iter().cloned());
        }
        for slot in self.species_slots.iter().flatten() {
            allowed_species.push(slot.clone());
        }

        let allowed_attributes: Vec<String> =
            self.override_attribute.iter().cloned().collect();

        // 透传键types_max保留给后端默认值逻辑
        let max_types = match self.extra.get("types_max") {
            Some(OverrideValue::Number(n)) if *n > 0 => *n as u32,
            _ => TYPE_SLOTS as u32,
        };

        FlatFilterParameters {
            fusion_forced: self.fusion_forced.unwrap_or(false),
            min_types: self.types_min.unwrap_or(1),
            max_types,
            allowed_types: dedup_preserve_order(allowed_types),
            allowed_attributes,
            allowed_species: dedup_preserve_order(allowed_species),
        }
    }
}

impl Default for SamplingParameters {
    fn default() -> Self {
        Self::new(1)
    }
}

/// 后端过滤形式：槽位信息压扁成去重后的允许列表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatFilterParameters {
    pub fusion_forced: bool,
    pub min_types: u32,
    pub max_types: u32,
    pub allowed_types: Vec<String>,
    pub allowed_attributes: Vec<String>,
    pub allowed_species: Vec<String>,
}

fn dedup_preserve_order(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}
