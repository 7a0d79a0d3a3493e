use serde_json::json;

use crate::cli::{print_json, report_error};
use crate::config::Config;
use crate::db::connection;
use crate::error::TaskboardError;
use crate::storage::SqliteStore;
use crate::store::TaskStore;

pub fn run(config: &Config, json_output: bool) -> i32 {
    match run_inner(config, json_output) {
        Ok(code) => code,
        Err(e) => report_error(&e, json_output),
    }
}

fn run_inner(config: &Config, json_output: bool) -> Result<i32, TaskboardError> {
    let path = connection::init_db(&config.db_path)?;
    // Loading once writes the seed collection on a fresh board.
    let store = TaskStore::open(SqliteStore::new(connection::open_db(&path)?));

    if json_output {
        print_json(&crate::output::json::success(json!({
            "path": path.to_string_lossy(),
            "tasks": store.tasks().len()
        })))?;
    } else {
        println!("Initialized taskboard at {}", path.display());
    }
    Ok(0)
}
