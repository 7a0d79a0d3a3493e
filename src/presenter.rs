//! Filtered, searched and grouped views over the task collection.
//!
//! Nothing here is cached: views are derived from the current collection and
//! the list-screen toggles every time they are requested.

use serde::Serialize;

use crate::models::{StatusFilter, Task, TaskStatus};

/// Expand/collapse flag per status section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionVisibility {
    pub in_progress: bool,
    pub pending: bool,
    pub completed: bool,
}

impl Default for SectionVisibility {
    fn default() -> Self {
        Self {
            in_progress: true,
            pending: false,
            completed: false,
        }
    }
}

impl SectionVisibility {
    pub fn all_expanded() -> Self {
        Self {
            in_progress: true,
            pending: true,
            completed: true,
        }
    }

    /// Only the listed sections are expanded.
    pub fn only(expanded: &[TaskStatus]) -> Self {
        Self {
            in_progress: expanded.contains(&TaskStatus::InProgress),
            pending: expanded.contains(&TaskStatus::Pending),
            completed: expanded.contains(&TaskStatus::Completed),
        }
    }

    pub fn is_expanded(&self, status: TaskStatus) -> bool {
        match status {
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Pending => self.pending,
            TaskStatus::Completed => self.completed,
        }
    }

    pub fn toggled(self, status: TaskStatus) -> Self {
        let mut next = self;
        match status {
            TaskStatus::InProgress => next.in_progress = !next.in_progress,
            TaskStatus::Pending => next.pending = !next.pending,
            TaskStatus::Completed => next.completed = !next.completed,
        }
        next
    }
}

/// Transient toggles of the list screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListState {
    pub search: String,
    pub filter: StatusFilter,
    pub sections: SectionVisibility,
}

impl ListState {
    pub fn with_sections(sections: SectionVisibility) -> Self {
        Self {
            sections,
            ..Self::default()
        }
    }

    pub fn with_search(self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..self
        }
    }

    pub fn with_filter(self, filter: StatusFilter) -> Self {
        Self { filter, ..self }
    }

    pub fn with_section_toggled(self, status: TaskStatus) -> Self {
        Self {
            sections: self.sections.toggled(status),
            ..self
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Section<'a> {
    pub status: TaskStatus,
    pub count: usize,
    pub expanded: bool,
    /// Empty while the section is collapsed.
    pub tasks: Vec<&'a Task>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListView<'a> {
    pub sections: Vec<Section<'a>>,
}

impl<'a> ListView<'a> {
    pub fn section(&self, status: TaskStatus) -> Option<&Section<'a>> {
        self.sections.iter().find(|s| s.status == status)
    }

    pub fn total(&self) -> usize {
        self.sections.iter().map(|s| s.count).sum()
    }
}

/// Status filter first, then case-insensitive search over title and description.
pub fn filter_tasks<'a>(tasks: &'a [Task], filter: StatusFilter, search: &str) -> Vec<&'a Task> {
    let needle = search.to_lowercase();
    tasks
        .iter()
        .filter(|t| filter.admits(t.status))
        .filter(|t| t.matches_query(&needle))
        .collect()
}

pub fn present<'a>(tasks: &'a [Task], state: &ListState) -> ListView<'a> {
    let matching = filter_tasks(tasks, state.filter, &state.search);

    let sections = TaskStatus::SECTION_ORDER
        .iter()
        .map(|&status| {
            let bucket: Vec<&Task> = matching
                .iter()
                .copied()
                .filter(|t| t.status == status)
                .collect();
            let expanded = state.sections.is_expanded(status);
            Section {
                status,
                count: bucket.len(),
                expanded,
                tasks: if expanded { bucket } else { Vec::new() },
            }
        })
        .collect();

    ListView { sections }
}
