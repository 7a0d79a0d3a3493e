pub mod commands;
pub mod init;
pub mod shell;
pub mod task;

pub use commands::*;

use crate::config::Config;
use crate::db::connection;
use crate::error::TaskboardError;
use crate::output;
use crate::storage::SqliteStore;
use crate::store::TaskStore;

/// Open the initialized database and load the task collection from it.
pub fn open_store(config: &Config) -> Result<TaskStore<SqliteStore>, TaskboardError> {
    let conn = connection::open_db(&config.db_path)?;
    Ok(TaskStore::open(SqliteStore::new(conn)))
}

/// Print `err` in the requested format and return the error exit code.
pub fn report_error(err: &TaskboardError, json_output: bool) -> i32 {
    if json_output {
        match serde_json::to_string_pretty(&output::json::error(err)) {
            Ok(s) => println!("{s}"),
            Err(_) => eprintln!("Error: {}", err.message),
        }
    } else {
        eprintln!("Error: {}", err.message);
    }
    1
}

pub(crate) fn print_json(value: &serde_json::Value) -> Result<(), TaskboardError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| TaskboardError::storage(e.to_string()))?;
    println!("{rendered}");
    Ok(())
}
