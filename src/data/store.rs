// SQLite怪物存储
// 开发心理：列模型与记录一一对应，可补全字段存NULL，读取时还原为Option
// 个体值/努力值/派生值以hp列是否为NULL作为整块存在与否的标记

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

use crate::core::error::Result;
use crate::monster::progression::MonsterStore;
use crate::monster::record::{Gender, MonsterRecord};
use crate::monster::stats::{Nature, StatBlock};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// 基于SQLite的怪物存储
pub struct SqliteMonsterStore {
    conn: Connection,
}

impl SqliteMonsterStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            conn: Connection::open(path)?,
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// 建表，已存在则跳过
    pub fn create_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS monsters (
                 id INTEGER PRIMARY KEY,
                 name TEXT,
                 species1 TEXT, species2 TEXT, species3 TEXT,
                 type1 TEXT, type2 TEXT, type3 TEXT, type4 TEXT, type5 TEXT,
                 attribute TEXT,
                 level INTEGER NOT NULL DEFAULT 1,
                 hp_iv INTEGER, atk_iv INTEGER, def_iv INTEGER,
                 spa_iv INTEGER, spd_iv INTEGER, spe_iv INTEGER,
                 hp_ev INTEGER, atk_ev INTEGER, def_ev INTEGER,
                 spa_ev INTEGER, spd_ev INTEGER, spe_ev INTEGER,
                 hp_total INTEGER, atk_total INTEGER, def_total INTEGER,
                 spa_total INTEGER, spd_total INTEGER, spe_total INTEGER,
                 nature TEXT,
                 characteristic TEXT,
                 gender TEXT,
                 friendship INTEGER,
                 ability1 TEXT,
                 ability2 TEXT,
                 moveset TEXT,
                 date_met TEXT,
                 where_met TEXT
             );",
        )?;
        Ok(())
    }

    /// 插入新记录，返回分配的ID
    pub fn insert(&mut self, record: &MonsterRecord) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO monsters (
                 name, species1, species2, species3,
                 type1, type2, type3, type4, type5,
                 attribute, level,
                 hp_iv, atk_iv, def_iv, spa_iv, spd_iv, spe_iv,
                 hp_ev, atk_ev, def_ev, spa_ev, spd_ev, spe_ev,
                 hp_total, atk_total, def_total, spa_total, spd_total, spe_total,
                 nature, characteristic, gender, friendship,
                 ability1, ability2, moveset, date_met, where_met
             ) VALUES (
                 ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11,
                 ?12, ?13, ?14, ?15, ?16, ?17,
                 ?18, ?19, ?20, ?21, ?22, ?23,
                 ?24, ?25, ?26, ?27, ?28, ?29,
                 ?30, ?31, ?32, ?33, ?34, ?35, ?36, ?37, ?38
             )",
            rusqlite::params_from_iter(record_params(record)),
        )?;
        Ok(self.conn.last_insert_rowid())
    }
}

fn block_columns(block: &Option<StatBlock>) -> [Option<i64>; 6] {
    match block {
        Some(values) => [
            Some(values.hp as i64),
            Some(values.attack as i64),
            Some(values.defense as i64),
            Some(values.sp_attack as i64),
            Some(values.sp_defense as i64),
            Some(values.speed as i64),
        ],
        None => [None; 6],
    }
}

fn record_params(record: &MonsterRecord) -> Vec<Box<dyn rusqlite::ToSql>> {
    let ivs = block_columns(&record.ivs);
    let evs = block_columns(&record.evs);
    let totals = block_columns(&record.stats);

    let mut values: Vec<Box<dyn rusqlite::ToSql>> = vec![
        Box::new(record.name.clone()),
        Box::new(record.species1.clone()),
        Box::new(record.species2.clone()),
        Box::new(record.species3.clone()),
        Box::new(record.type1.clone()),
        Box::new(record.type2.clone()),
        Box::new(record.type3.clone()),
        Box::new(record.type4.clone()),
        Box::new(record.type5.clone()),
        Box::new(record.attribute.clone()),
        Box::new(record.level as i64),
    ];
    for column in ivs.into_iter().chain(evs).chain(totals) {
        values.push(Box::new(column));
    }
    values.push(Box::new(record.nature.map(|nature| nature.name())));
    values.push(Box::new(record.characteristic.clone()));
    values.push(Box::new(record.gender.map(|gender| gender.name())));
    values.push(Box::new(record.friendship.map(|value| value as i64)));
    values.push(Box::new(record.ability1.clone()));
    values.push(Box::new(record.ability2.clone()));
    values.push(Box::new(record.moveset.clone()));
    values.push(Box::new(
        record.date_met.map(|date| date.format(DATE_FORMAT).to_string()),
    ));
    values.push(Box::new(record.where_met.clone()));
    values
}

fn read_block(row: &Row, first_index: usize) -> rusqlite::Result<Option<StatBlock>> {
    // hp列为NULL视为整块缺失
    let hp: Option<i64> = row.get(first_index)?;
    let Some(hp) = hp else {
        return Ok(None);
    };

    let column = |offset: usize| -> rusqlite::Result<u16> {
        Ok(row.get::<_, Option<i64>>(first_index + offset)?.unwrap_or(0) as u16)
    };

    Ok(Some(StatBlock {
        hp: hp as u16,
        attack: column(1)?,
        defense: column(2)?,
        sp_attack: column(3)?,
        sp_defense: column(4)?,
        speed: column(5)?,
    }))
}

fn row_to_record(row: &Row) -> rusqlite::Result<MonsterRecord> {
    let nature: Option<String> = row.get(30)?;
    let gender: Option<String> = row.get(32)?;
    let date_met: Option<String> = row.get(37)?;

    Ok(MonsterRecord {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        species1: row.get(2)?,
        species2: row.get(3)?,
        species3: row.get(4)?,
        type1: row.get(5)?,
        type2: row.get(6)?,
        type3: row.get(7)?,
        type4: row.get(8)?,
        type5: row.get(9)?,
        attribute: row.get(10)?,
        level: row.get::<_, i64>(11)? as u32,
        ivs: read_block(row, 12)?,
        evs: read_block(row, 18)?,
        stats: read_block(row, 24)?,
        nature: nature.as_deref().and_then(Nature::from_name),
        characteristic: row.get(31)?,
        gender: gender.as_deref().and_then(Gender::from_name),
        friendship: row.get::<_, Option<i64>>(33)?.map(|value| value as u16),
        ability1: row.get(34)?,
        ability2: row.get(35)?,
        moveset: row.get(36)?,
        date_met: date_met
            .as_deref()
            .and_then(|raw| NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()),
        where_met: row.get(38)?,
    })
}

impl MonsterStore for SqliteMonsterStore {
    fn get_by_id(&self, id: i64) -> Result<Option<MonsterRecord>> {
        let record = self
            .conn
            .query_row(
                "SELECT id, name, species1, species2, species3,
                        type1, type2, type3, type4, type5,
                        attribute, level,
                        hp_iv, atk_iv, def_iv, spa_iv, spd_iv, spe_iv,
                        hp_ev, atk_ev, def_ev, spa_ev, spd_ev, spe_ev,
                        hp_total, atk_total, def_total, spa_total, spd_total, spe_total,
                        nature, characteristic, gender, friendship,
                        ability1, ability2, moveset, date_met, where_met
                 FROM monsters WHERE id = ?1",
                params![id],
                row_to_record,
            )
            .optional()?;
        Ok(record)
    }

    fn update(&mut self, id: i64, record: &MonsterRecord) -> Result<()> {
        let mut values = record_params(record);
        values.push(Box::new(id));

        self.conn.execute(
            "UPDATE monsters SET
                 name = ?1, species1 = ?2, species2 = ?3, species3 = ?4,
                 type1 = ?5, type2 = ?6, type3 = ?7, type4 = ?8, type5 = ?9,
                 attribute = ?10, level = ?11,
                 hp_iv = ?12, atk_iv = ?13, def_iv = ?14,
                 spa_iv = ?15, spd_iv = ?16, spe_iv = ?17,
                 hp_ev = ?18, atk_ev = ?19, def_ev = ?20,
                 spa_ev = ?21, spd_ev = ?22, spe_ev = ?23,
                 hp_total = ?24, atk_total = ?25, def_total = ?26,
                 spa_total = ?27, spd_total = ?28, spe_total = ?29,
                 nature = ?30, characteristic = ?31, gender = ?32, friendship = ?33,
                 ability1 = ?34, ability2 = ?35, moveset = ?36,
                 date_met = ?37, where_met = ?38
             WHERE id = ?39",
            rusqlite::params_from_iter(values),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monster::stats::Nature;

    fn store() -> SqliteMonsterStore {
        let _ = env_logger::builder().is_test(true).try_init();
        let store = SqliteMonsterStore::open_in_memory().unwrap();
        store.create_schema().unwrap();
        store
    }

    fn sample() -> MonsterRecord {
        MonsterRecord {
            name: Some("Cinder".to_string()),
            species1: Some("Charcoal Pup".to_string()),
            type1: Some("Fire".to_string()),
            type2: Some("Ghost".to_string()),
            attribute: Some("Spooky".to_string()),
            level: 12,
            ivs: Some(StatBlock {
                hp: 31,
                attack: 20,
                defense: 10,
                sp_attack: 5,
                sp_defense: 0,
                speed: 31,
            }),
            evs: Some(StatBlock::default()),
            nature: Some(Nature::Adamant),
            gender: Some(Gender::NonBinary),
            friendship: Some(70),
            ability1: Some("Blaze".to_string()),
            moveset: Some(r#"["Ember","Haunt"]"#.to_string()),
            date_met: NaiveDate::from_ymd_opt(2024, 3, 17),
            where_met: Some("Adoption Center".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_insert_get_roundtrip() {
        let mut store = store();
        let record = sample();
        let id = store.insert(&record).unwrap();

        let loaded = store.get_by_id(id).unwrap().unwrap();
        assert_eq!(loaded.id, Some(id));
        assert_eq!(loaded.name, record.name);
        assert_eq!(loaded.ivs, record.ivs);
        assert_eq!(loaded.evs, record.evs);
        assert_eq!(loaded.stats, None);
        assert_eq!(loaded.nature, Some(Nature::Adamant));
        assert_eq!(loaded.gender, Some(Gender::NonBinary));
        assert_eq!(loaded.friendship, Some(70));
        assert_eq!(loaded.moveset, record.moveset);
        assert_eq!(loaded.date_met, record.date_met);
    }

    #[test]
    fn test_update_roundtrip() {
        let mut store = store();
        let id = store.insert(&sample()).unwrap();

        let mut record = store.get_by_id(id).unwrap().unwrap();
        record.level = 13;
        record.friendship = Some(80);
        record.stats = Some(StatBlock {
            hp: 60,
            attack: 40,
            defense: 35,
            sp_attack: 30,
            sp_defense: 28,
            speed: 45,
        });
        store.update(id, &record).unwrap();

        let loaded = store.get_by_id(id).unwrap().unwrap();
        assert_eq!(loaded.level, 13);
        assert_eq!(loaded.friendship, Some(80));
        assert_eq!(loaded.stats, record.stats);
    }

    #[test]
    fn test_get_missing_returns_none() {
        let store = store();
        assert_eq!(store.get_by_id(404).unwrap(), None);
    }
}
