// 怪物记录
// 开发心理：镜像存储层的列模型，所有可补全字段用Option表达"仅在缺失时填充"
// 调用方已提供的字段是权威数据，初始化流程绝不覆盖

use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::monster::stats::{Nature, StatBlock};
use crate::utils::random::{RandomGenerator, WeightedItem};

/// 性别，权重45/45/5/5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    NonBinary,
    Genderless,
}

impl Gender {
    pub fn random(rng: &mut RandomGenerator) -> Gender {
        let weighted = [
            WeightedItem::new(Gender::Male, 45.0),
            WeightedItem::new(Gender::Female, 45.0),
            WeightedItem::new(Gender::NonBinary, 5.0),
            WeightedItem::new(Gender::Genderless, 5.0),
        ];
        *rng.weighted_choose(&weighted).unwrap_or(&Gender::Male)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::NonBinary => "Non-binary",
            Gender::Genderless => "Genderless",
        }
    }

    pub fn from_name(name: &str) -> Option<Gender> {
        match name {
            "Male" => Some(Gender::Male),
            "Female" => Some(Gender::Female),
            "Non-binary" => Some(Gender::NonBinary),
            "Genderless" => Some(Gender::Genderless),
            _ => None,
        }
    }
}

// 特征语料
const CHARACTERISTICS: &[&str] = &[
    "Loves to eat",
    "Takes plenty of siestas",
    "Nods off a lot",
    "Scatters things often",
    "Likes to relax",
    "Proud of its power",
    "Likes to thrash about",
    "A little quick tempered",
    "Likes to fight",
    "Quick tempered",
    "Sturdy body",
    "Capable of taking hits",
    "Highly persistent",
    "Good endurance",
    "Good perseverance",
    "Highly curious",
    "Mischievous",
    "Thoroughly cunning",
    "Often lost in thought",
    "Very finicky",
    "Strong willed",
    "Somewhat vain",
    "Strongly defiant",
    "Hates to lose",
    "Somewhat stubborn",
    "Impetuous and silly",
    "Alert to sounds",
    "Likes to run",
    "Somewhat of a clown",
    "Quick to flee",
];

pub fn random_characteristic(rng: &mut RandomGenerator) -> String {
    rng.choose(CHARACTERISTICS)
        .map(|value| value.to_string())
        .unwrap_or_default()
}

/// 怪物记录，引擎引用但不拥有其生命周期
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonsterRecord {
    pub id: Option<i64>,
    pub name: Option<String>,

    // 物种槽位，融合体占用多个
    pub species1: Option<String>,
    pub species2: Option<String>,
    pub species3: Option<String>,

    // 类型槽位
    pub type1: Option<String>,
    pub type2: Option<String>,
    pub type3: Option<String>,
    pub type4: Option<String>,
    pub type5: Option<String>,

    pub attribute: Option<String>,

    pub level: u32,

    // 遗传与派生数值
    pub ivs: Option<StatBlock>,
    pub evs: Option<StatBlock>,
    pub stats: Option<StatBlock>,
    pub nature: Option<Nature>,

    pub characteristic: Option<String>,
    pub gender: Option<Gender>,
    /// 友好度 0-255
    pub friendship: Option<u16>,

    // 特性两槽
    pub ability1: Option<String>,
    pub ability2: Option<String>,

    /// 招式列表的持久化形式：JSON文本
    pub moveset: Option<String>,

    // 获得信息
    pub date_met: Option<NaiveDate>,
    pub where_met: Option<String>,
}

impl MonsterRecord {
    /// 已赋值的类型槽位
    pub fn type_names(&self) -> Vec<&str> {
        [&self.type1, &self.type2, &self.type3, &self.type4, &self.type5]
            .into_iter()
            .filter_map(|slot| slot.as_deref())
            .collect()
    }

    /// 已赋值的物种槽位
    pub fn species_names(&self) -> Vec<&str> {
        [&self.species1, &self.species2, &self.species3]
            .into_iter()
            .filter_map(|slot| slot.as_deref())
            .collect()
    }

    /// 当前已知招式，缺失或损坏视为一无所知
    pub fn known_moves(&self) -> Vec<String> {
        parse_move_list(self.moveset.as_deref()).unwrap_or_default()
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.species1.as_deref())
            .unwrap_or("Unknown")
    }
}

/// 解析持久化的招式列表
///
/// 返回Some(列表)当且仅当输入是良构的JSON字符串数组（可以为空）；
/// 缺失、字面量"null"或任何畸形输入返回None，由调用方显式处理。
pub fn parse_move_list(raw: Option<&str>) -> Option<Vec<String>> {
    let raw = raw?;
    if raw == "null" {
        return None;
    }

    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(moves) => Some(moves),
        Err(error) => {
            warn!("招式列表损坏，按无招式处理: {}", error);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move_list_valid() {
        let raw = r#"["Tackle","Ember"]"#;
        assert_eq!(
            parse_move_list(Some(raw)),
            Some(vec!["Tackle".to_string(), "Ember".to_string()])
        );
    }

    #[test]
    fn test_parse_move_list_empty_array_is_well_formed() {
        assert_eq!(parse_move_list(Some("[]")), Some(vec![]));
    }

    #[test]
    fn test_parse_move_list_malformed() {
        assert_eq!(parse_move_list(None), None);
        assert_eq!(parse_move_list(Some("null")), None);
        assert_eq!(parse_move_list(Some("{broken")), None);
        assert_eq!(parse_move_list(Some("{\"a\":1}")), None);
    }

    #[test]
    fn test_type_names_skips_empty_slots() {
        let record = MonsterRecord {
            type1: Some("Fire".to_string()),
            type3: Some("Flying".to_string()),
            ..Default::default()
        };
        assert_eq!(record.type_names(), vec!["Fire", "Flying"]);
    }

    #[test]
    fn test_gender_roundtrip_and_distribution() {
        for gender in [
            Gender::Male,
            Gender::Female,
            Gender::NonBinary,
            Gender::Genderless,
        ] {
            assert_eq!(Gender::from_name(gender.name()), Some(gender));
        }

        let mut rng = RandomGenerator::with_seed(77);
        let mut male_or_female = 0;
        for _ in 0..1000 {
            match Gender::random(&mut rng) {
                Gender::Male | Gender::Female => male_or_female += 1,
                _ => {}
            }
        }
        // 期望约90%
        assert!(male_or_female > 800);
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut record = MonsterRecord::default();
        assert_eq!(record.display_name(), "Unknown");
        record.species1 = Some("Applin".to_string());
        assert_eq!(record.display_name(), "Applin");
        record.name = Some("Crumble".to_string());
        assert_eq!(record.display_name(), "Crumble");
    }
}
