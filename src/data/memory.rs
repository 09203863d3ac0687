// 内存版目录与存储
// 开发心理：测试需要可控的目录内容和可切换的故障模式，内存实现两者都给

use std::cell::RefCell;
use std::collections::HashMap;

use crate::core::error::{EngineError, Result};
use crate::monster::moves::MoveCatalog;
use crate::monster::progression::MonsterStore;
use crate::monster::record::MonsterRecord;
use crate::utils::random::RandomGenerator;

#[derive(Debug, Clone)]
struct CatalogMove {
    name: String,
    move_type: String,
    attribute: String,
}

/// 内存招式/特性目录
///
/// failing模式下所有查询返回Catalog错误，用来验证引擎的降级路径。
#[derive(Debug)]
pub struct MemoryMoveCatalog {
    moves: Vec<CatalogMove>,
    abilities: Vec<String>,
    fail: bool,
    rng: RefCell<RandomGenerator>,
}

impl MemoryMoveCatalog {
    pub fn new() -> Self {
        Self {
            moves: Vec::new(),
            abilities: Vec::new(),
            fail: false,
            rng: RefCell::new(RandomGenerator::new()),
        }
    }

    pub fn with_move(mut self, name: &str, move_type: &str, attribute: &str) -> Self {
        self.moves.push(CatalogMove {
            name: name.to_string(),
            move_type: move_type.to_string(),
            attribute: attribute.to_string(),
        });
        self
    }

    pub fn with_ability(mut self, name: &str) -> Self {
        self.abilities.push(name.to_string());
        self
    }

    /// 切换到故障模式
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// 固定内部随机源的种子
    pub fn with_seed(self, seed: u64) -> Self {
        *self.rng.borrow_mut() = RandomGenerator::with_seed(seed);
        self
    }

    fn guard(&self) -> Result<()> {
        if self.fail {
            Err(EngineError::Catalog("目录不可用".to_string()))
        } else {
            Ok(())
        }
    }

    fn pick(&self, candidates: Vec<&CatalogMove>) -> Option<String> {
        let mut rng = self.rng.borrow_mut();
        rng.choose(&candidates).map(|found| found.name.clone())
    }
}

impl Default for MemoryMoveCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveCatalog for MemoryMoveCatalog {
    fn random_move_by_type(&self, type_name: &str) -> Result<Option<String>> {
        self.guard()?;
        let candidates: Vec<_> = self
            .moves
            .iter()
            .filter(|entry| entry.move_type == type_name)
            .collect();
        Ok(self.pick(candidates))
    }

    fn random_move_by_attribute(&self, attribute: &str) -> Result<Option<String>> {
        self.guard()?;
        let candidates: Vec<_> = self
            .moves
            .iter()
            .filter(|entry| entry.attribute == attribute)
            .collect();
        Ok(self.pick(candidates))
    }

    fn random_move(&self) -> Result<Option<String>> {
        self.guard()?;
        Ok(self.pick(self.moves.iter().collect()))
    }

    fn random_abilities(&self, count: usize) -> Result<Vec<String>> {
        self.guard()?;
        let mut pool = self.abilities.clone();
        self.rng.borrow_mut().shuffle(&mut pool);
        pool.truncate(count);
        Ok(pool)
    }
}

/// 内存怪物存储
#[derive(Debug, Default)]
pub struct MemoryMonsterStore {
    records: HashMap<i64, MonsterRecord>,
    next_id: i64,
}

impl MemoryMonsterStore {
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
            next_id: 1,
        }
    }

    /// 插入并返回分配的ID
    pub fn insert(&mut self, mut record: MonsterRecord) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        record.id = Some(id);
        self.records.insert(id, record);
        id
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl MonsterStore for MemoryMonsterStore {
    fn get_by_id(&self, id: i64) -> Result<Option<MonsterRecord>> {
        Ok(self.records.get(&id).cloned())
    }

    fn update(&mut self, id: i64, record: &MonsterRecord) -> Result<()> {
        if !self.records.contains_key(&id) {
            return Err(EngineError::MonsterNotFound(id));
        }
        self.records.insert(id, record.clone());
        Ok(())
    }
}
