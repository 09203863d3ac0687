// 招式获取引擎
// 开发心理：分层概率策略，目录故障逐层降级到固定保底招式，创建路径永不报错
// 升级学习带去重约束：重试耗尽同类目后降级到全随机，最后尝试保底招式

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::monster::record::MonsterRecord;
use crate::utils::random::{RandomGenerator, WeightedItem};

/// 保底招式
pub const FALLBACK_MOVE: &str = "Tackle";
/// 升级学习的最大重试次数
pub const MAX_LEARN_ATTEMPTS: usize = 10;

const NORMAL_TYPE: &str = "Normal";

/// 外部招式/特性目录，结果可以为空
pub trait MoveCatalog {
    /// 随机一条指定类型的招式
    fn random_move_by_type(&self, type_name: &str) -> Result<Option<String>>;

    /// 随机一条指定属性的招式
    fn random_move_by_attribute(&self, attribute: &str) -> Result<Option<String>>;

    /// 全目录随机一条招式
    fn random_move(&self) -> Result<Option<String>>;

    /// 随机count条特性
    fn random_abilities(&self, count: usize) -> Result<Vec<String>>;
}

/// 升级学习的招式来源类目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveSource {
    /// 一般系招式
    Normal,
    /// 与怪物类型匹配
    TypeMatched,
    /// 与怪物属性匹配
    AttributeMatched,
    /// 全目录随机
    Random,
}

impl MoveSource {
    /// 按固定分布抽取来源：一般10% / 同类型60% / 同属性25% / 全随机5%
    pub fn roll(rng: &mut RandomGenerator) -> MoveSource {
        let weighted = [
            WeightedItem::new(MoveSource::Normal, 10.0),
            WeightedItem::new(MoveSource::TypeMatched, 60.0),
            WeightedItem::new(MoveSource::AttributeMatched, 25.0),
            WeightedItem::new(MoveSource::Random, 5.0),
        ];
        *rng.weighted_choose(&weighted).unwrap_or(&MoveSource::Random)
    }
}

// 目录故障吸收为"无候选"
fn absorb(result: Result<Option<String>>, context: &str) -> Option<String> {
    match result {
        Ok(found) => found,
        Err(error) => {
            warn!("目录查询失败({})，降级处理: {}", context, error);
            None
        }
    }
}

/// 创建期抽取：每个槽位独立判定，允许槽位间重复
///
/// 85%走类型层（随机取怪物的一个类型查招式，落空退属性层），
/// 85-95%直接走属性层，其余5%以及所有落空情况走全目录随机，
/// 目录为空时使用保底招式。此路径吸收一切目录故障，永不返回错误。
pub fn moves_for_new_monster(
    monster: &MonsterRecord,
    count: usize,
    catalog: &dyn MoveCatalog,
    rng: &mut RandomGenerator,
) -> Vec<String> {
    let mut moves = Vec::with_capacity(count);

    for _ in 0..count {
        let band = rng.range_f64(0.0, 100.0);
        let mut picked: Option<String> = None;

        if band <= 85.0 {
            let types = monster.type_names();
            if let Some(type_name) = rng.choose(&types) {
                picked = absorb(catalog.random_move_by_type(type_name), "按类型");
            }
            // 类型层落空时退属性层
            if picked.is_none() {
                if let Some(attribute) = &monster.attribute {
                    picked = absorb(catalog.random_move_by_attribute(attribute), "按属性");
                }
            }
        } else if band <= 95.0 {
            if let Some(attribute) = &monster.attribute {
                picked = absorb(catalog.random_move_by_attribute(attribute), "按属性");
            }
        }

        if picked.is_none() {
            picked = absorb(catalog.random_move(), "全随机");
        }

        moves.push(picked.unwrap_or_else(|| FALLBACK_MOVE.to_string()));
    }

    moves
}

/// 升级学习：返回一条不在current_moves中的招式，找不到返回None
///
/// 每次重试按当前来源查询一条；来源无候选或查到重复时降级为全随机
/// 继续重试。重试耗尽后尝试保底招式（若未掌握），否则本次不学习。
pub fn next_learnable_move(
    monster: &MonsterRecord,
    current_moves: &[String],
    source: MoveSource,
    catalog: &dyn MoveCatalog,
    rng: &mut RandomGenerator,
    max_attempts: usize,
) -> Option<String> {
    let mut source = source;

    for _ in 0..max_attempts {
        let candidate = match source {
            MoveSource::Normal => absorb(catalog.random_move_by_type(NORMAL_TYPE), "一般系"),
            MoveSource::TypeMatched => {
                let types = monster.type_names();
                match rng.choose(&types) {
                    Some(type_name) => {
                        absorb(catalog.random_move_by_type(type_name), "按类型")
                    }
                    None => {
                        // 没有类型可匹配，降级后重试
                        source = MoveSource::Random;
                        continue;
                    }
                }
            }
            MoveSource::AttributeMatched => match &monster.attribute {
                Some(attribute) => {
                    absorb(catalog.random_move_by_attribute(attribute), "按属性")
                }
                None => {
                    source = MoveSource::Random;
                    continue;
                }
            },
            MoveSource::Random => absorb(catalog.random_move(), "全随机"),
        };

        let candidate = match candidate {
            Some(name) => name,
            None => {
                // 该类目无候选，后续重试走全随机
                source = MoveSource::Random;
                continue;
            }
        };

        if !current_moves.contains(&candidate) {
            return Some(candidate);
        }

        debug!("招式重复: {}", candidate);
        if source != MoveSource::Random {
            source = MoveSource::Random;
        }
    }

    if !current_moves.iter().any(|known| known == FALLBACK_MOVE) {
        return Some(FALLBACK_MOVE.to_string());
    }

    None
}
