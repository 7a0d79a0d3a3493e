//! Serialized form of the task collection.
//!
//! The collection is stored as a JSON array of task records. `createdAt` uses
//! RFC 3339 text so stored values sort and parse without a custom format.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::error::TaskboardError;
use crate::models::{Task, TaskStatus};

const SEED_DESCRIPTION: &str =
    "Lorem Ipsum is simply dummy text of the printing and typesetting industry.";

pub fn encode(tasks: &[Task]) -> Result<String, TaskboardError> {
    serde_json::to_string(tasks).map_err(|e| TaskboardError::storage(e.to_string()))
}

/// Decode a stored collection. Records that violate the collection
/// invariants (non-positive or duplicate ids, empty titles) make the whole
/// value malformed.
pub fn decode(raw: &str) -> Result<Vec<Task>, TaskboardError> {
    let tasks: Vec<Task> = serde_json::from_str(raw)?;

    let mut seen = HashSet::with_capacity(tasks.len());
    for task in &tasks {
        if task.id <= 0 {
            return Err(TaskboardError::persistence_read(format!(
                "task id {} is not positive",
                task.id
            )));
        }
        if !seen.insert(task.id) {
            return Err(TaskboardError::persistence_read(format!(
                "duplicate task id {} in stored collection",
                task.id
            )));
        }
        if task.title.trim().is_empty() {
            return Err(TaskboardError::persistence_read(format!(
                "task {} has an empty title",
                task.id
            )));
        }
    }
    Ok(tasks)
}

/// The collection shown when nothing usable is stored.
pub fn seed_tasks(now: DateTime<Utc>) -> Vec<Task> {
    let seed = |id: i64, title: &str, description: &str, status: TaskStatus| Task {
        id,
        title: title.to_string(),
        description: description.to_string(),
        status,
        created_at: now,
    };
    vec![
        seed(1, "Lorem Ipsum Task 1", SEED_DESCRIPTION, TaskStatus::InProgress),
        seed(2, "Lorem Ipsum Task 2", SEED_DESCRIPTION, TaskStatus::InProgress),
        seed(3, "Pending Task 1", "Another task description", TaskStatus::Pending),
        seed(4, "Completed Task 1", "Finished this one", TaskStatus::Completed),
    ]
}
