use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::TaskboardError;
use crate::models::TaskStatus;
use crate::presenter::SectionVisibility;

pub const DB_ENV: &str = "TASKBOARD_DB";
pub const LOG_ENV: &str = "TASKBOARD_LOG";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

const DATA_DIR: &str = ".taskboard";
const DB_FILE: &str = "taskboard.db";
const CONFIG_FILE: &str = "config.json";

/// Optional settings read from `config.json` next to the database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub log_level: Option<String>,
    /// Sections that start expanded in the list view.
    #[serde(default)]
    pub expanded_sections: Option<Vec<TaskStatus>>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub settings: Settings,
}

impl Config {
    /// Resolve the database location and load settings beside it.
    pub fn resolve(db_flag: Option<&Path>) -> Result<Self, TaskboardError> {
        let db_path = resolve_db_path(db_flag)?;
        let settings = load_settings(&config_path(&db_path))?;
        Ok(Self { db_path, settings })
    }

    /// Sections expanded when the list screen opens.
    pub fn default_sections(&self) -> SectionVisibility {
        match &self.settings.expanded_sections {
            Some(expanded) => SectionVisibility::only(expanded),
            None => SectionVisibility::default(),
        }
    }

    /// Flag beats environment beats config file.
    pub fn log_level(&self, flag: Option<&str>) -> String {
        flag.map(str::to_string)
            .or_else(|| env::var(LOG_ENV).ok().filter(|v| !v.trim().is_empty()))
            .or_else(|| self.settings.log_level.clone())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
    }
}

/// Find the .git root by walking up from current directory.
pub fn find_git_root(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        if dir.join(".git").exists() {
            return Some(dir);
        }
        if !dir.pop() {
            return None;
        }
    }
}

pub fn resolve_db_path(db_flag: Option<&Path>) -> Result<PathBuf, TaskboardError> {
    if let Some(path) = db_flag {
        return Ok(path.to_path_buf());
    }
    if let Ok(path) = env::var(DB_ENV) {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    let cwd = env::current_dir().map_err(|e| TaskboardError::config(e.to_string()))?;
    let root = find_git_root(&cwd).unwrap_or(cwd);
    Ok(root.join(DATA_DIR).join(DB_FILE))
}

/// Get the config file path.
pub fn config_path(db_path: &Path) -> PathBuf {
    db_path
        .parent()
        .map(|dir| dir.join(CONFIG_FILE))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}

pub fn load_settings(path: &Path) -> Result<Settings, TaskboardError> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let raw = fs::read_to_string(path).map_err(|e| {
        TaskboardError::config(format!("cannot read {}: {e}", path.display()))
    })?;
    serde_json::from_str(&raw)
        .map_err(|e| TaskboardError::config(format!("invalid {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_config_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = load_settings(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn config_file_lists_expanded_sections() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"{"log_level":"debug","expanded_sections":["Pending","Completed"]}"#,
        )
        .unwrap();
        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.log_level.as_deref(), Some("debug"));
        assert_eq!(
            settings.expanded_sections,
            Some(vec![TaskStatus::Pending, TaskStatus::Completed])
        );
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "{not json").unwrap();
        let err = load_settings(&path).unwrap_err();
        assert_eq!(err.code.as_str(), "CONFIG_ERROR");
    }

    #[test]
    fn git_root_is_found_from_nested_dir() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        assert_eq!(find_git_root(&nested).as_deref(), Some(dir.path()));
    }

    #[test]
    fn db_flag_wins() {
        let path = resolve_db_path(Some(Path::new("/tmp/x/tasks.db"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/x/tasks.db"));
        assert_eq!(config_path(&path), PathBuf::from("/tmp/x/config.json"));
    }
}
