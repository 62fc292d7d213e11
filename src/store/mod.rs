pub mod connection;
pub mod migrations;
pub mod storage;
pub mod task_store;

pub use storage::{MemoryStorage, SqliteStorage, Storage};
pub use task_store::{TaskStore, TASKS_KEY};
