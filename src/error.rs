use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NotInitialized,
    TaskNotFound,
    ValidationError,
    InvalidIntent,
    IdsExhausted,
    PersistenceReadError,
    StorageError,
    ConfigError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotInitialized => "NOT_INITIALIZED",
            Self::TaskNotFound => "TASK_NOT_FOUND",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidIntent => "INVALID_INTENT",
            Self::IdsExhausted => "IDS_EXHAUSTED",
            Self::PersistenceReadError => "PERSISTENCE_READ_ERROR",
            Self::StorageError => "STORAGE_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TaskboardError {
    pub code: ErrorCode,
    pub message: String,
}

impl TaskboardError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn not_initialized() -> Self {
        Self::new(
            ErrorCode::NotInitialized,
            "taskboard is not initialized. Run `taskboard init` first.",
        )
    }

    pub fn task_not_found(id: i64) -> Self {
        Self::new(ErrorCode::TaskNotFound, format!("Task not found: {id}"))
    }

    pub fn empty_title() -> Self {
        Self::validation("Please enter a task title.")
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn invalid_intent(view: &str, intent: &str) -> Self {
        Self::new(
            ErrorCode::InvalidIntent,
            format!("`{intent}` is not available on the {view} screen"),
        )
    }

    pub fn ids_exhausted() -> Self {
        Self::new(
            ErrorCode::IdsExhausted,
            "No task id left above the largest stored id",
        )
    }

    pub fn persistence_read(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PersistenceReadError, message)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }
}

impl From<rusqlite::Error> for TaskboardError {
    fn from(e: rusqlite::Error) -> Self {
        Self::storage(e.to_string())
    }
}

impl From<serde_json::Error> for TaskboardError {
    fn from(e: serde_json::Error) -> Self {
        Self::persistence_read(e.to_string())
    }
}
