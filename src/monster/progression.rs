// 成长控制器
// 开发心理："仅在缺失时填充"收敛到一个辅助函数，调用方给的数据绝不覆盖
// 升级是读-算-写整条记录：同一只怪物的并发升级会互相覆盖（后写者赢），
// 互斥（行锁或逐怪物队列）是调用方的责任，引擎不自带锁

use chrono::Utc;
use log::{info, warn};

use crate::core::error::{EngineError, Result};
use crate::monster::moves::{self, MoveCatalog, MoveSource, MAX_LEARN_ATTEMPTS};
use crate::monster::record::{self, parse_move_list, Gender, MonsterRecord};
use crate::monster::stats::{compute_stats, GeneticProfile, Nature, StatBlock, StatType, EV_CAP, MAX_LEVEL};
use crate::utils::random::RandomGenerator;

/// 初始友好度上限（随机 0-70）
const INITIAL_FRIENDSHIP_MAX: i32 = 70;
/// 友好度上限
const FRIENDSHIP_CAP: u16 = 255;
/// 每升一级获得的努力值点数
const EV_POINTS_PER_LEVEL: u32 = 2;
/// 每升一级学习新招式的概率
const LEARN_CHANCE: f64 = 0.3;
/// 特性保底
const FALLBACK_ABILITIES: [&str; 2] = ["Adaptability", "Run Away"];
/// 默认获得地点
const DEFAULT_WHERE_MET: &str = "Adoption Center";

/// 外部怪物存储
pub trait MonsterStore {
    fn get_by_id(&self, id: i64) -> Result<Option<MonsterRecord>>;
    fn update(&mut self, id: i64, record: &MonsterRecord) -> Result<()>;
}

/// 仅在槽位缺失时生成填充，"调用方数据权威"的唯一执行点
fn fill_if_absent<T>(
    slot: &mut Option<T>,
    rng: &mut RandomGenerator,
    generate: impl FnOnce(&mut RandomGenerator) -> T,
) {
    if slot.is_none() {
        *slot = Some(generate(rng));
    }
}

/// 成长引擎：创建期初始化与升级
pub struct ProgressionEngine<C: MoveCatalog, S: MonsterStore> {
    catalog: C,
    store: S,
    rng: RandomGenerator,
}

impl<C: MoveCatalog, S: MonsterStore> ProgressionEngine<C, S> {
    pub fn new(catalog: C, store: S) -> Self {
        Self::with_rng(catalog, store, RandomGenerator::new())
    }

    /// 注入随机源，测试用固定种子钉住结果
    pub fn with_rng(catalog: C, store: S, rng: RandomGenerator) -> Self {
        Self { catalog, store, rng }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 初始化一份新草稿：补全缺失字段并重算派生属性，不落存储
    pub fn initialize(&mut self, draft: MonsterRecord) -> Result<MonsterRecord> {
        let mut monster = draft;
        if monster.level == 0 {
            monster.level = 1;
        }

        self.fill_missing_fields(&mut monster);

        info!("初始化完成: {}", monster.display_name());
        Ok(monster)
    }

    /// 按ID初始化已存在的记录并写回存储
    pub fn initialize_by_id(&mut self, id: i64) -> Result<MonsterRecord> {
        let record = self
            .store
            .get_by_id(id)?
            .ok_or(EngineError::MonsterNotFound(id))?;

        let initialized = self.initialize(record)?;
        self.store.update(id, &initialized)?;

        info!("已初始化并写回怪物 {}", id);
        Ok(initialized)
    }

    fn fill_missing_fields(&mut self, monster: &mut MonsterRecord) {
        let rng = &mut self.rng;

        fill_if_absent(&mut monster.ivs, rng, StatBlock::random_ivs);
        fill_if_absent(&mut monster.evs, rng, |_| StatBlock::default());
        fill_if_absent(&mut monster.nature, rng, Nature::random);
        fill_if_absent(&mut monster.characteristic, rng, record::random_characteristic);
        fill_if_absent(&mut monster.gender, rng, Gender::random);
        fill_if_absent(&mut monster.friendship, rng, |rng| {
            rng.range_inclusive(0, INITIAL_FRIENDSHIP_MAX) as u16
        });
        fill_if_absent(&mut monster.date_met, rng, |_| Utc::now().date_naive());
        fill_if_absent(&mut monster.where_met, rng, |_| DEFAULT_WHERE_MET.to_string());

        // 派生属性总是重算
        monster.stats = Some(compute_stats(monster.level, &self.profile_of(monster)));

        // 特性两槽一起补全；目录故障降级到保底特性
        if monster.ability1.is_none() {
            let abilities = match self.catalog.random_abilities(2) {
                Ok(found) => found,
                Err(error) => {
                    warn!("特性目录查询失败，使用保底特性: {}", error);
                    Vec::new()
                }
            };
            monster.ability1 = Some(
                abilities
                    .first()
                    .cloned()
                    .unwrap_or_else(|| FALLBACK_ABILITIES[0].to_string()),
            );
            monster.ability2 = Some(
                abilities
                    .get(1)
                    .cloned()
                    .unwrap_or_else(|| FALLBACK_ABILITIES[1].to_string()),
            );
        }

        // 起始招式：缺失或损坏时重建，每5级多一条
        if parse_move_list(monster.moveset.as_deref()).is_none() {
            let move_count = (monster.level / 5 + 1).max(1) as usize;
            let starter_moves =
                moves::moves_for_new_monster(monster, move_count, &self.catalog, &mut self.rng);
            monster.moveset = serde_json::to_string(&starter_moves).ok();
        }
    }

    fn profile_of(&self, monster: &MonsterRecord) -> GeneticProfile {
        GeneticProfile {
            ivs: monster.ivs.unwrap_or_default(),
            evs: monster.evs.unwrap_or_default(),
            nature: monster.nature,
        }
    }

    /// 升级：等级封顶100，努力值随机分配，友好度增长，概率学习新招式
    ///
    /// 整条记录读-算-写一次。同一记录的并发调用需要外部互斥。
    pub fn level_up(&mut self, id: i64, levels: u32) -> Result<MonsterRecord> {
        if levels == 0 {
            return Err(EngineError::InvalidLevelDelta(levels));
        }

        let mut monster = self
            .store
            .get_by_id(id)?
            .ok_or(EngineError::MonsterNotFound(id))?;

        let current_level = monster.level.max(1);
        if current_level >= MAX_LEVEL {
            info!("怪物 {} 已满级", id);
            return Ok(monster);
        }

        let new_level = (current_level + levels).min(MAX_LEVEL);
        let levels_gained = new_level - current_level;
        info!(
            "怪物 {} 升级: {} → {} (+{})",
            id, current_level, new_level, levels_gained
        );
        monster.level = new_level;

        // 努力值：每级2点随机分配，单项封顶255
        let evs = monster.evs.get_or_insert_with(StatBlock::default);
        for _ in 0..levels_gained * EV_POINTS_PER_LEVEL {
            if let Some(stat) = self.rng.choose_cloned(&StatType::ALL) {
                let value = evs.get_mut(stat);
                if *value < EV_CAP {
                    *value += 1;
                }
            }
        }

        // 友好度：每级1-3点，封顶255
        let gain_per_level = self.rng.range_inclusive(1, 3) as u16;
        let current_friendship = monster.friendship.unwrap_or(0);
        monster.friendship = Some(
            current_friendship
                .saturating_add(gain_per_level * levels_gained as u16)
                .min(FRIENDSHIP_CAP),
        );

        monster.stats = Some(compute_stats(new_level, &self.profile_of(&monster)));

        // 招式学习：每升一级30%判定
        let mut known = parse_move_list(monster.moveset.as_deref()).unwrap_or_default();
        let mut learned_any = false;
        for _ in 0..levels_gained {
            if !self.rng.chance(LEARN_CHANCE) {
                continue;
            }

            let source = MoveSource::roll(&mut self.rng);
            if let Some(new_move) = moves::next_learnable_move(
                &monster,
                &known,
                source,
                &self.catalog,
                &mut self.rng,
                MAX_LEARN_ATTEMPTS,
            ) {
                info!("怪物 {} 学会了 {}", id, new_move);
                known.push(new_move);
                learned_any = true;
            }
        }
        if learned_any {
            monster.moveset = Some(serde_json::to_string(&known)?);
        }

        self.store.update(id, &monster)?;
        Ok(monster)
    }

    /// 按当前等级/个体值/努力值重算派生属性并写回
    pub fn recalculate_stats(&mut self, id: i64) -> Result<MonsterRecord> {
        let mut monster = self
            .store
            .get_by_id(id)?
            .ok_or(EngineError::MonsterNotFound(id))?;

        monster.stats = Some(compute_stats(monster.level.max(1), &self.profile_of(&monster)));
        self.store.update(id, &monster)?;
        Ok(monster)
    }
}
