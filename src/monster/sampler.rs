// 采样器边界
// 开发心理：引擎不规定采样算法，只定义参数契约；属性覆盖在生成之后落到草稿上

use log::debug;

use crate::core::error::Result;
use crate::monster::record::MonsterRecord;
use crate::roll::params::SamplingParameters;
use crate::roll::translator;
use crate::utils::random::RandomGenerator;

/// 外部怪物采样器
pub trait MonsterSampler {
    /// 按参数生成一只怪物草稿
    fn roll(&mut self, params: &SamplingParameters) -> Result<MonsterRecord>;

    /// 按参数生成多只
    fn roll_many(&mut self, params: &SamplingParameters, count: u32) -> Result<Vec<MonsterRecord>> {
        (0..count).map(|_| self.roll(params)).collect()
    }
}

/// 按规格名掷取：解析规格、生成roll_count只草稿、再把override_attribute
/// 覆盖到每只草稿上（属性是风味标签，不参与生成期过滤）
pub fn roll_from_specification<S: MonsterSampler>(
    name: &str,
    sampler: &mut S,
    rng: &mut RandomGenerator,
) -> Result<Vec<MonsterRecord>> {
    let params = translator::resolve(name, rng)?;
    let mut drafts = sampler.roll_many(&params, params.roll_count)?;

    if let Some(attribute) = &params.override_attribute {
        debug!("生成后覆盖属性: {}", attribute);
        for draft in &mut drafts {
            draft.attribute = Some(attribute.clone());
        }
    }

    Ok(drafts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::EngineError;

    /// 回放预置草稿的测试采样器
    struct FixedSampler {
        calls: u32,
    }

    impl MonsterSampler for FixedSampler {
        fn roll(&mut self, params: &SamplingParameters) -> Result<MonsterRecord> {
            self.calls += 1;
            Ok(MonsterRecord {
                species1: params
                    .species_slots[0]
                    .clone()
                    .or_else(|| Some("Wildling".to_string())),
                attribute: Some("Plain".to_string()),
                level: 5,
                ..Default::default()
            })
        }
    }

    #[test]
    fn test_roll_applies_override_attribute_post_generation() {
        let mut sampler = FixedSampler { calls: 0 };
        let mut rng = RandomGenerator::with_seed(5);

        let drafts = roll_from_specification("Resolution Rocket", &mut sampler, &mut rng).unwrap();
        assert_eq!(drafts.len(), 1);
        let attribute = drafts[0].attribute.as_deref().unwrap();
        assert!(attribute == "Future Paradox" || attribute == "Past Paradox");
    }

    #[test]
    fn test_multi_roll_count() {
        let mut sampler = FixedSampler { calls: 0 };
        let mut rng = RandomGenerator::with_seed(5);

        let drafts = roll_from_specification("Brave Bear Barrel", &mut sampler, &mut rng).unwrap();
        assert_eq!(drafts.len(), 2);
        assert_eq!(sampler.calls, 2);
    }

    #[test]
    fn test_unknown_specification_propagates() {
        let mut sampler = FixedSampler { calls: 0 };
        let mut rng = RandomGenerator::with_seed(5);

        let error = roll_from_specification("Missing", &mut sampler, &mut rng).unwrap_err();
        assert!(matches!(error, EngineError::SpecificationNotFound(_)));
        assert_eq!(sampler.calls, 0);
    }
}
