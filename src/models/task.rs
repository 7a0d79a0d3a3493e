use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TaskboardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "Pending")]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

impl TaskStatus {
    /// Display order of the grouped list view.
    pub const SECTION_ORDER: [TaskStatus; 3] =
        [Self::InProgress, Self::Pending, Self::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    /// Accepts the stored spelling as well as `in-progress` / `in_progress`,
    /// ignoring case.
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '-' | '_' => ' ',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        match normalized.as_str() {
            "pending" => Some(Self::Pending),
            "in progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Avatar letter shown next to a task: the first title character, upper-cased.
    pub fn avatar(&self) -> char {
        self.title
            .chars()
            .next()
            .map(|c| c.to_uppercase().next().unwrap_or(c))
            .unwrap_or('?')
    }

    /// Creation date in the list layout, e.g. `Wed, Jul 31, 2024`.
    pub fn created_label(&self) -> String {
        self.created_at.format("%a, %b %-d, %Y").to_string()
    }

    pub fn matches_query(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty()
            || self.title.to_lowercase().contains(needle_lower)
            || self.description.to_lowercase().contains(needle_lower)
    }
}

/// Rejects titles that are empty once trimmed.
pub fn validate_title(title: &str) -> Result<(), TaskboardError> {
    if title.trim().is_empty() {
        return Err(TaskboardError::empty_title());
    }
    Ok(())
}
