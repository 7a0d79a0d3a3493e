use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::error::TaskboardError;

use super::migrations;

/// Open a connection to the database. Returns error if not initialized.
pub fn open_db(path: &Path) -> Result<Connection, TaskboardError> {
    if !path.exists() {
        return Err(TaskboardError::not_initialized());
    }
    let conn = Connection::open(path)?;
    configure_connection(&conn)?;
    Ok(conn)
}

/// Initialize the database: create directories, database, and run migrations.
pub fn init_db(path: &Path) -> Result<PathBuf, TaskboardError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| TaskboardError::storage(e.to_string()))?;
    }
    let conn = Connection::open(path)?;
    configure_connection(&conn)?;
    migrations::run_migrations(&conn)?;
    Ok(path.to_path_buf())
}

fn configure_connection(conn: &Connection) -> Result<(), TaskboardError> {
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA busy_timeout=5000;",
    )?;
    Ok(())
}
