//! Key-value persistence behind the task store.

use std::collections::HashMap;

use log::error;
use rusqlite::Connection;

use crate::db::kv_repo;
use crate::error::TaskboardError;

/// Key under which the serialized task collection is stored.
pub const STORAGE_KEY: &str = "taskboard-tasks";

pub trait KeyValueStore {
    /// Returns `None` when the key was never written or cannot be read.
    fn load(&self, key: &str) -> Option<String>;

    /// Replaces the value stored under `key`.
    fn save(&mut self, key: &str, value: &str) -> Result<(), TaskboardError>;
}

/// SQLite-backed store using the `kv_store` table.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueStore for SqliteStore {
    fn load(&self, key: &str) -> Option<String> {
        match kv_repo::get_value(&self.conn, key) {
            Ok(value) => value,
            Err(e) => {
                error!("event=storage_load module=storage status=error key={key} error={e}");
                None
            }
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), TaskboardError> {
        kv_repo::set_value(&self.conn, key, value)
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), TaskboardError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
