// 参数翻译器
// 开发心理：通用规则覆盖绝大多数规格，个别道具的行为进注册表而不是共享控制流
// 新增主题道具=注册一个变换函数，不改动通用翻译

use lazy_static::lazy_static;
use log::debug;
use std::collections::HashMap;

use crate::core::error::{EngineError, Result};
use crate::roll::params::{SamplingParameters, SPECIES_SLOTS, TYPE_SLOTS};
use crate::roll::specification::{self, FusionPolicy, OverrideValue, RollSpecification};
use crate::utils::random::RandomGenerator;

/// 规格到采样参数的通用翻译，纯函数（随机性全部来自传入的rng）
pub fn translate(spec: &RollSpecification, rng: &mut RandomGenerator) -> SamplingParameters {
    let mut params = SamplingParameters::new(spec.roll_count);

    // 融合与类型数规则先于覆盖参数求值
    match spec.fusion_policy {
        FusionPolicy::Forced => {
            params.fusion_forced = Some(true);
        }
        FusionPolicy::Forbidden => {
            params.fusion_forced = Some(false);
            params.species_max = Some(1);
        }
        FusionPolicy::Unconstrained => {
            if !spec.allow_fusion {
                params.species_max = Some(1);
            }
        }
    }

    if let Some(min) = spec.min_type_count {
        params.types_min = Some(min);
    }

    for (key, value) in &spec.override_parameters {
        apply_override(&mut params, key, value, rng);
    }

    params
}

/// 覆盖键的逐条解释，按槽位命名约定分派
fn apply_override(
    params: &mut SamplingParameters,
    key: &str,
    value: &OverrideValue,
    rng: &mut RandomGenerator,
) {
    match (key, value) {
        // species_all：对槽位1-3各自独立抽取，允许重复
        ("species_all", OverrideValue::List(pool)) => {
            for slot in params.species_slots.iter_mut() {
                *slot = rng.choose_cloned(pool);
            }
        }
        // species：不分槽位的包含集过滤
        ("species", OverrideValue::List(pool)) => {
            params.include_species = pool.clone();
        }
        // type/types：作用于全部类型槽位的包含集
        ("type", OverrideValue::List(pool)) | ("types", OverrideValue::List(pool)) => {
            params.include_types = pool.clone();
        }
        // species{N}：该槽位的包含集；无有效槽位号退回不分槽位集合
        (key, OverrideValue::List(pool)) if key.starts_with("species") => {
            match parse_slot(key, "species", SPECIES_SLOTS) {
                Some(index) => params.include_species_slots[index] = pool.clone(),
                None => params.include_species = pool.clone(),
            }
        }
        // type{N}：类型槽位是精确匹配列，从列表抽一个具体值强制赋给该槽位
        (key, OverrideValue::List(pool)) if key.starts_with("type") => {
            match parse_slot(key, "type", TYPE_SLOTS) {
                Some(index) => params.type_slots[index] = rng.choose_cloned(pool),
                None => {
                    params
                        .extra
                        .insert(key.to_string(), OverrideValue::List(pool.clone()));
                }
            }
        }
        // attribute：抽一个具体值，生成后覆盖，不作为生成期过滤
        ("attribute", OverrideValue::List(pool)) => {
            params.override_attribute = rng.choose_cloned(pool);
        }
        // 其余键原样透传
        (key, value) => {
            params.extra.insert(key.to_string(), value.clone());
        }
    }
}

fn parse_slot(key: &str, prefix: &str, slot_count: usize) -> Option<usize> {
    let suffix = &key[prefix.len()..];
    let number: usize = suffix.parse().ok()?;
    if (1..=slot_count).contains(&number) {
        Some(number - 1)
    } else {
        None
    }
}

/// 特例变换：规格名 → 纯变换函数
type SpecialCaseFn = fn(&mut SamplingParameters, &mut RandomGenerator);

lazy_static! {
    static ref SPECIAL_CASES: HashMap<&'static str, SpecialCaseFn> = {
        let mut table: HashMap<&'static str, SpecialCaseFn> = HashMap::new();
        table.insert("Resolution Rocket", resolution_rocket);
        table.insert("Sweet Shofar Surprise", sweet_shofar_surprise);
        table.insert("Sectored Cookie", sectored_cookie);
        table.insert("Brave Bear Barrel", brave_bear_barrel);
        table.insert("Color Carnival Concoction", color_carnival_concoction);
        table.insert("Ganesh's Glorious Goodie", ganesh_glorious_goodie);
        table
    };
}

/// 应用注册的特例变换，未注册的规格原样返回
pub fn apply_special_case(
    name: &str,
    mut params: SamplingParameters,
    rng: &mut RandomGenerator,
) -> SamplingParameters {
    if let Some(transform) = SPECIAL_CASES.get(name) {
        debug!("应用特例变换: {}", name);
        transform(&mut params, rng);
    }
    params
}

/// 面向消费者的入口：按名称查找、翻译并应用特例
pub fn resolve(name: &str, rng: &mut RandomGenerator) -> Result<SamplingParameters> {
    let spec = specification::get_by_name(name)
        .ok_or_else(|| EngineError::SpecificationNotFound(name.to_string()))?;
    let params = translate(spec, rng);
    Ok(apply_special_case(name, params, rng))
}

fn pick(rng: &mut RandomGenerator, options: &[&str]) -> Option<String> {
    rng.choose(options).map(|value| value.to_string())
}

// 未来悖论或过去悖论属性，强制融合
fn resolution_rocket(params: &mut SamplingParameters, rng: &mut RandomGenerator) {
    params.fusion_forced = Some(true);
    params.override_attribute = pick(rng, &["Future Paradox", "Past Paradox"]);
}

// 两个命名物种槽绑定：槽1固定，槽2从短列表抽取
fn sweet_shofar_surprise(params: &mut SamplingParameters, rng: &mut RandomGenerator) {
    params.fusion_forced = Some(true);
    params.species_slots[0] = Some("Applin".to_string());
    params.species_slots[1] = pick(rng, &["Sigh-Durr", "Appak"]);
}

// 强制融合且至少3个类型
fn sectored_cookie(params: &mut SamplingParameters, _rng: &mut RandomGenerator) {
    params.fusion_forced = Some(true);
    params.types_min = Some(3);
}

// 多次掷取，每次都带强制融合
fn brave_bear_barrel(params: &mut SamplingParameters, _rng: &mut RandomGenerator) {
    params.roll_count = 2;
    params.fusion_forced = Some(true);
}

// 五个类型槽位各自独立抽色，而不是一色贯穿所有槽位
fn color_carnival_concoction(params: &mut SamplingParameters, rng: &mut RandomGenerator) {
    params.fusion_forced = Some(true);
    params.override_attribute = Some("Vibrant".to_string());

    let colors = ["Red", "Blue", "Green", "Yellow", "Purple"];
    for slot in params.type_slots.iter_mut() {
        *slot = pick(rng, &colors);
    }
}

// Milcery与Phanpy的固定融合，幸运或智慧属性
fn ganesh_glorious_goodie(params: &mut SamplingParameters, rng: &mut RandomGenerator) {
    params.fusion_forced = Some(true);
    params.species_slots[0] = Some("Milcery".to_string());
    params.species_slots[1] = Some("Phanpy".to_string());
    params.override_attribute = pick(rng, &["Lucky", "Wise"]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roll::specification::all;

    fn rng() -> RandomGenerator {
        RandomGenerator::with_seed(2024)
    }

    #[test]
    fn test_forced_fusion_property() {
        let mut rng = rng();
        for spec in all().iter().filter(|s| s.fusion_policy == FusionPolicy::Forced) {
            let params = resolve(&spec.name, &mut rng).unwrap();
            assert_eq!(params.fusion_forced, Some(true), "{}", spec.name);
            assert_ne!(params.species_max, Some(1), "{}", spec.name);
        }
    }

    #[test]
    fn test_forbidden_fusion_property() {
        let mut rng = rng();
        let params = resolve("Star-Spangled Sparkler", &mut rng).unwrap();
        assert_eq!(params.fusion_forced, Some(false));
        assert_eq!(params.species_max, Some(1));

        let flat = params.to_legacy_filter();
        assert!(!flat.fusion_forced);
    }

    #[test]
    fn test_disallowed_fusion_without_forcing() {
        let mut rng = rng();
        let params = resolve("Day of Atonement Amulet", &mut rng).unwrap();
        assert_eq!(params.fusion_forced, None);
        assert_eq!(params.species_max, Some(1));
        // 透传键保留
        assert_eq!(
            params.extra.get("max_types"),
            Some(&OverrideValue::Number(1))
        );
    }

    #[test]
    fn test_attribute_resolved_to_single_value() {
        let mut rng = rng();
        let allowed = ["Future Paradox", "Past Paradox"];
        for _ in 0..20 {
            let params = resolve("Resolution Rocket", &mut rng).unwrap();
            assert_eq!(params.fusion_forced, Some(true));
            let attribute = params.override_attribute.as_deref().unwrap();
            assert!(allowed.contains(&attribute));
        }
    }

    #[test]
    fn test_species_all_draws_each_slot() {
        let mut rng = rng();
        let pool = ["Applin", "Sigh-Durr", "Appak"];
        let spec = specification::get_by_name("Sweet Shofar Surprise").unwrap();
        let params = translate(spec, &mut rng);
        for slot in &params.species_slots {
            let value = slot.as_deref().unwrap();
            assert!(pool.contains(&value));
        }
    }

    #[test]
    fn test_sweet_shofar_special_case_binds_slots() {
        let mut rng = rng();
        for _ in 0..10 {
            let params = resolve("Sweet Shofar Surprise", &mut rng).unwrap();
            assert_eq!(params.species_slots[0].as_deref(), Some("Applin"));
            let second = params.species_slots[1].as_deref().unwrap();
            assert!(second == "Sigh-Durr" || second == "Appak");
        }
    }

    #[test]
    fn test_plain_species_becomes_inclusion_set() {
        let mut rng = rng();
        let params = resolve("Love Velvet Cake", &mut rng).unwrap();
        assert_eq!(params.include_species.len(), 30);
        // type1-3是列表 → 每个槽位强制抽一个具体值
        let pool = ["Fairy", "Psychic", "Normal", "Flying"];
        for slot in &params.type_slots[..3] {
            assert!(pool.contains(&slot.as_deref().unwrap()));
        }
        assert!(params.type_slots[3].is_none());
    }

    #[test]
    fn test_species_slot_list_becomes_scoped_inclusion() {
        let mut rng = rng();
        let params = resolve("Fright Night Fudge", &mut rng).unwrap();
        assert_eq!(
            params.include_species_slots[0],
            vec!["Pumpkinmon", "Gotsumon", "Wizardmon"]
        );
        assert!(params.species_slots[0].is_none());
        assert_eq!(params.override_attribute.as_deref(), Some("Spooky"));
    }

    #[test]
    fn test_type_list_applies_to_all_slots() {
        let mut rng = rng();
        let params = resolve("Jolly Holly Jamboree", &mut rng).unwrap();
        assert_eq!(params.include_types, vec!["Ice", "Fire", "Grass"]);
        assert!(params.type_slots.iter().all(|slot| slot.is_none()));
        assert_eq!(params.override_attribute.as_deref(), Some("Vaccine"));
    }

    #[test]
    fn test_sectored_cookie_min_types() {
        let mut rng = rng();
        let params = resolve("Sectored Cookie", &mut rng).unwrap();
        assert_eq!(params.fusion_forced, Some(true));
        assert_eq!(params.types_min, Some(3));
    }

    #[test]
    fn test_brave_bear_multi_roll_keeps_fusion() {
        let mut rng = rng();
        let params = resolve("Brave Bear Barrel", &mut rng).unwrap();
        assert_eq!(params.roll_count, 2);
        assert_eq!(params.fusion_forced, Some(true));
    }

    #[test]
    fn test_color_carnival_independent_slot_draws() {
        let mut rng = rng();
        let colors = ["Red", "Blue", "Green", "Yellow", "Purple"];
        let params = resolve("Color Carnival Concoction", &mut rng).unwrap();
        assert_eq!(params.override_attribute.as_deref(), Some("Vibrant"));
        for slot in &params.type_slots {
            assert!(colors.contains(&slot.as_deref().unwrap()));
        }

        // 扁平视图合并去重后不超过颜色总数
        let flat = params.to_legacy_filter();
        assert!(flat.allowed_types.len() <= colors.len());
        let unique: std::collections::HashSet<_> = flat.allowed_types.iter().collect();
        assert_eq!(unique.len(), flat.allowed_types.len());
    }

    #[test]
    fn test_ganesh_binds_both_species() {
        let mut rng = rng();
        let params = resolve("Ganesh's Glorious Goodie", &mut rng).unwrap();
        assert_eq!(params.fusion_forced, Some(true));
        assert_eq!(params.species_slots[0].as_deref(), Some("Milcery"));
        assert_eq!(params.species_slots[1].as_deref(), Some("Phanpy"));
        let attribute = params.override_attribute.as_deref().unwrap();
        assert!(attribute == "Lucky" || attribute == "Wise");
    }

    #[test]
    fn test_resolve_unknown_name() {
        let mut rng = rng();
        let error = resolve("Chocolate Teapot", &mut rng).unwrap_err();
        assert_eq!(
            error,
            EngineError::SpecificationNotFound("Chocolate Teapot".to_string())
        );
    }

    #[test]
    fn test_passthrough_flag_preserved() {
        let mut rng = rng();
        let params = resolve("Resolution Rocket", &mut rng).unwrap();
        assert_eq!(
            params.extra.get("force_fusion"),
            Some(&OverrideValue::Flag(true))
        );
    }

    #[test]
    fn test_parse_slot() {
        assert_eq!(parse_slot("species1", "species", 3), Some(0));
        assert_eq!(parse_slot("species3", "species", 3), Some(2));
        assert_eq!(parse_slot("species9", "species", 3), None);
        assert_eq!(parse_slot("type5", "type", 5), Some(4));
        assert_eq!(parse_slot("typeX", "type", 5), None);
    }
}
