// SQLite招式/特性目录
// 开发心理：随机行用 ORDER BY RANDOM() LIMIT n 交给数据库完成，结果可为空

use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

use crate::core::error::Result;
use crate::monster::moves::MoveCatalog;

/// 基于SQLite的招式/特性目录
pub struct SqliteMoveCatalog {
    conn: Connection,
}

impl SqliteMoveCatalog {
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
            "CREATE TABLE IF NOT EXISTS moves (
                 id INTEGER PRIMARY KEY,
                 move_name TEXT NOT NULL,
                 move_type TEXT,
                 attribute TEXT
             );
             CREATE TABLE IF NOT EXISTS abilities (
                 id INTEGER PRIMARY KEY,
                 ability_name TEXT NOT NULL
             );",
        )?;
        Ok(())
    }

    pub fn insert_move(&self, name: &str, move_type: &str, attribute: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO moves (move_name, move_type, attribute) VALUES (?1, ?2, ?3)",
            (name, move_type, attribute),
        )?;
        Ok(())
    }

    pub fn insert_ability(&self, name: &str) -> Result<()> {
        self.conn
            .execute("INSERT INTO abilities (ability_name) VALUES (?1)", (name,))?;
        Ok(())
    }

    fn random_row(&self, sql: &str, params: &[&dyn rusqlite::ToSql]) -> Result<Option<String>> {
        let found = self
            .conn
            .query_row(sql, params, |row| row.get::<_, String>(0))
            .optional()?;
        Ok(found)
    }
}

impl MoveCatalog for SqliteMoveCatalog {
    fn random_move_by_type(&self, type_name: &str) -> Result<Option<String>> {
        self.random_row(
            "SELECT move_name FROM moves WHERE move_type = ?1 ORDER BY RANDOM() LIMIT 1",
            &[&type_name],
        )
    }

    fn random_move_by_attribute(&self, attribute: &str) -> Result<Option<String>> {
        self.random_row(
            "SELECT move_name FROM moves WHERE attribute = ?1 ORDER BY RANDOM() LIMIT 1",
            &[&attribute],
        )
    }

    fn random_move(&self) -> Result<Option<String>> {
        self.random_row("SELECT move_name FROM moves ORDER BY RANDOM() LIMIT 1", &[])
    }

    fn random_abilities(&self, count: usize) -> Result<Vec<String>> {
        let mut statement = self
            .conn
            .prepare("SELECT ability_name FROM abilities ORDER BY RANDOM() LIMIT ?1")?;
        let rows = statement.query_map([count as i64], |row| row.get::<_, String>(0))?;

        let mut abilities = Vec::new();
        for row in rows {
            abilities.push(row?);
        }
        Ok(abilities)
    }
}
