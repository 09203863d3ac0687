// 数据适配层 - 招式目录与怪物存储的参考实现
// 开发心理：引擎只认trait契约；SQLite实现对接真实库表，内存实现服务测试与夹具

pub mod catalog;
pub mod memory;
pub mod store;

pub use catalog::SqliteMoveCatalog;
pub use memory::{MemoryMonsterStore, MemoryMoveCatalog};
pub use store::SqliteMonsterStore;
