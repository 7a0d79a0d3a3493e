use rusqlite::{params, Connection, OptionalExtension};

use crate::error::TaskboardError;

pub fn get_value(conn: &Connection, key: &str) -> Result<Option<String>, TaskboardError> {
    let value = conn
        .query_row(
            "SELECT value FROM kv_store WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value)
}

/// Overwrite the value stored under `key`.
pub fn set_value(conn: &Connection, key: &str, value: &str) -> Result<(), TaskboardError> {
    conn.execute(
        "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![key, value],
    )?;
    Ok(())
}
