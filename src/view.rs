//! Screen state machine: List, Add and Edit.
//!
//! `ViewState` is a plain value. `ViewController::dispatch` takes the current
//! state and an intent and returns the next state; on error the caller keeps
//! the state it already has.

use log::debug;

use crate::error::TaskboardError;
use crate::models::{StatusFilter, Task, TaskStatus};
use crate::presenter::{self, ListState, ListView, SectionVisibility};
use crate::storage::KeyValueStore;
use crate::store::TaskStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    List(ListState),
    Add,
    Edit { task_id: i64 },
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::List(_) => "list",
            Self::Add => "add",
            Self::Edit { .. } => "edit",
        }
    }

    pub fn header(&self) -> Header {
        match self {
            Self::List(_) => Header {
                title: "TO-DO APP",
                show_back: false,
            },
            Self::Add => Header {
                title: "Add New Task",
                show_back: true,
            },
            Self::Edit { .. } => Header {
                title: "Edit Task",
                show_back: true,
            },
        }
    }

    pub fn edit_target(&self) -> Option<i64> {
        match self {
            Self::Edit { task_id } => Some(*task_id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub title: &'static str,
    pub show_back: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    NewTask,
    EditTask(i64),
    DeleteTask(i64),
    Search(String),
    Filter(StatusFilter),
    ToggleSection(TaskStatus),
    SubmitAdd { title: String, description: String },
    /// `description: None` keeps the task's current description.
    SubmitEdit {
        title: String,
        description: Option<String>,
    },
    ChangeStatus(TaskStatus),
    /// Cancel button or header back action.
    Cancel,
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::NewTask => "new",
            Self::EditTask(_) => "edit",
            Self::DeleteTask(_) => "delete",
            Self::Search(_) => "search",
            Self::Filter(_) => "filter",
            Self::ToggleSection(_) => "toggle",
            Self::SubmitAdd { .. } | Self::SubmitEdit { .. } => "save",
            Self::ChangeStatus(_) => "status",
            Self::Cancel => "cancel",
        }
    }
}

/// What the current state resolves to against the store.
#[derive(Debug)]
pub enum Screen<'a> {
    List(ListView<'a>),
    AddForm,
    EditForm(&'a Task),
    NotFound { task_id: i64 },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ViewController {
    default_sections: SectionVisibility,
}

impl ViewController {
    pub fn new(default_sections: SectionVisibility) -> Self {
        Self { default_sections }
    }

    pub fn initial(&self) -> ViewState {
        self.list()
    }

    fn list(&self) -> ViewState {
        ViewState::List(ListState::with_sections(self.default_sections))
    }

    pub fn dispatch<S: KeyValueStore>(
        &self,
        state: &ViewState,
        intent: Intent,
        store: &mut TaskStore<S>,
    ) -> Result<ViewState, TaskboardError> {
        debug!(
            "event=dispatch module=view view={} intent={}",
            state.name(),
            intent.name()
        );
        match (state, intent) {
            (_, Intent::Cancel) => Ok(self.list()),

            (ViewState::List(_), Intent::NewTask) => Ok(ViewState::Add),
            (ViewState::List(_), Intent::EditTask(task_id)) => Ok(ViewState::Edit { task_id }),
            (ViewState::List(list), Intent::DeleteTask(id)) => {
                store.remove(id);
                Ok(ViewState::List(list.clone()))
            }
            (ViewState::List(list), Intent::Search(query)) => {
                Ok(ViewState::List(list.clone().with_search(query)))
            }
            (ViewState::List(list), Intent::Filter(filter)) => {
                Ok(ViewState::List(list.clone().with_filter(filter)))
            }
            (ViewState::List(list), Intent::ToggleSection(status)) => {
                Ok(ViewState::List(list.clone().with_section_toggled(status)))
            }

            (ViewState::Add, Intent::SubmitAdd { title, description }) => {
                store.add(&title, &description)?;
                Ok(self.list())
            }

            (ViewState::Edit { task_id }, Intent::SubmitEdit { title, description }) => {
                let description = match description {
                    Some(description) => description,
                    None => store
                        .get(*task_id)
                        .ok_or_else(|| TaskboardError::task_not_found(*task_id))?
                        .description
                        .clone(),
                };
                store.update(*task_id, &title, &description)?;
                Ok(self.list())
            }
            (ViewState::Edit { task_id }, Intent::ChangeStatus(status)) => {
                store.set_status(*task_id, status)?;
                Ok(state.clone())
            }

            (state, intent) => Err(TaskboardError::invalid_intent(state.name(), intent.name())),
        }
    }

    pub fn render<'a, S: KeyValueStore>(
        &self,
        state: &'a ViewState,
        store: &'a TaskStore<S>,
    ) -> Screen<'a> {
        match state {
            ViewState::List(list) => Screen::List(presenter::present(store.tasks(), list)),
            ViewState::Add => Screen::AddForm,
            ViewState::Edit { task_id } => match store.get(*task_id) {
                Some(task) => Screen::EditForm(task),
                None => Screen::NotFound { task_id: *task_id },
            },
        }
    }
}
