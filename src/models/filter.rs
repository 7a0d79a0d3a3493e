use serde::{Deserialize, Serialize};

use super::TaskStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TaskStatus),
}

impl StatusFilter {
    pub const OPTIONS: [StatusFilter; 4] = [
        Self::All,
        Self::Only(TaskStatus::Pending),
        Self::Only(TaskStatus::InProgress),
        Self::Only(TaskStatus::Completed),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(status) => status.as_str(),
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Some(Self::All);
        }
        TaskStatus::from_str(s).map(Self::Only)
    }

    pub fn admits(&self, status: TaskStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == status,
        }
    }
}
