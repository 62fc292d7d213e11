use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::TaskboardError;

use super::connection;

/// Durable string key-value storage backing a `TaskStore`.
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, TaskboardError>;

    /// Overwrites the whole value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), TaskboardError>;
}

/// Key-value storage in a single SQLite table.
#[derive(Debug)]
pub struct SqliteStorage {
    conn: Connection,
    path: Option<PathBuf>,
}

impl SqliteStorage {
    pub fn open(path: &Path) -> Result<Self, TaskboardError> {
        Ok(Self {
            conn: connection::open_db(path)?,
            path: Some(path.to_path_buf()),
        })
    }

    pub fn in_memory() -> Result<Self, TaskboardError> {
        Ok(Self {
            conn: connection::open_in_memory()?,
            path: None,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl Storage for SqliteStorage {
    fn get(&self, key: &str) -> Result<Option<String>, TaskboardError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), TaskboardError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.entries.insert(key.to_string(), value.to_string());
        storage
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, TaskboardError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), TaskboardError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
