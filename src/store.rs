//! The task collection and its write-through persistence.

use chrono::Utc;
use log::{error, info, warn};

use crate::codec;
use crate::error::TaskboardError;
use crate::models::{validate_title, Task, TaskStatus};
use crate::storage::{KeyValueStore, STORAGE_KEY};

/// Owns the ordered task collection (newest first). Every successful
/// mutation re-serializes the whole collection into the backing store.
pub struct TaskStore<S: KeyValueStore> {
    tasks: Vec<Task>,
    storage: S,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Load the collection from `storage`, falling back to the seed
    /// collection when nothing usable is stored.
    pub fn open(storage: S) -> Self {
        let loaded = match storage.load(STORAGE_KEY) {
            Some(raw) => match codec::decode(&raw) {
                Ok(tasks) => Some(tasks),
                Err(e) => {
                    warn!(
                        "event=store_load module=store status=fallback reason=malformed error={}",
                        e.message
                    );
                    None
                }
            },
            None => {
                info!("event=store_load module=store status=fallback reason=absent");
                None
            }
        };

        let seeded = loaded.is_none();
        let mut store = Self {
            tasks: loaded.unwrap_or_else(|| codec::seed_tasks(Utc::now())),
            storage,
        };
        if seeded {
            store.persist();
        }
        store
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn add(&mut self, title: &str, description: &str) -> Result<Task, TaskboardError> {
        validate_title(title)?;
        let task = Task {
            id: self.next_id()?,
            title: title.to_string(),
            description: description.to_string(),
            status: TaskStatus::Pending,
            created_at: Utc::now(),
        };
        self.tasks.insert(0, task.clone());
        info!("event=task_add module=store status=ok id={}", task.id);
        self.persist();
        Ok(task)
    }

    pub fn update(
        &mut self,
        id: i64,
        title: &str,
        description: &str,
    ) -> Result<Task, TaskboardError> {
        validate_title(title)?;
        let task = self.get_mut(id)?;
        task.title = title.to_string();
        task.description = description.to_string();
        let updated = task.clone();
        info!("event=task_update module=store status=ok id={id}");
        self.persist();
        Ok(updated)
    }

    pub fn set_status(&mut self, id: i64, status: TaskStatus) -> Result<Task, TaskboardError> {
        let task = self.get_mut(id)?;
        task.status = status;
        let updated = task.clone();
        info!(
            "event=task_status module=store status=ok id={id} new_status={}",
            status.as_str()
        );
        self.persist();
        Ok(updated)
    }

    /// Remove a task. Removing an unknown id changes nothing.
    pub fn remove(&mut self, id: i64) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        let removed = self.tasks.remove(index);
        info!("event=task_remove module=store status=ok id={id}");
        self.persist();
        Some(removed)
    }

    fn get_mut(&mut self, id: i64) -> Result<&mut Task, TaskboardError> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TaskboardError::task_not_found(id))
    }

    /// Millisecond timestamp, bumped past every id already in the collection.
    fn next_id(&self) -> Result<i64, TaskboardError> {
        let now = Utc::now().timestamp_millis();
        match self.tasks.iter().map(|t| t.id).max() {
            Some(max) if max >= now => max
                .checked_add(1)
                .ok_or_else(TaskboardError::ids_exhausted),
            _ => Ok(now),
        }
    }

    fn persist(&mut self) {
        let result = codec::encode(&self.tasks)
            .and_then(|raw| self.storage.save(STORAGE_KEY, &raw));
        if let Err(e) = result {
            error!(
                "event=store_save module=store status=error code={} error={}",
                e.code.as_str(),
                e.message
            );
        }
    }
}
