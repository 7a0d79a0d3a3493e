use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::models::{StatusFilter, TaskStatus};

const VERSION: &str = env!("GIT_VERSION");

#[derive(Parser)]
#[command(
    name = "taskboard",
    version = VERSION,
    about = "Personal task board: pending, in progress, completed",
    after_help = "\
NOTE:
  Data is stored at <git-root>/.taskboard/taskboard.db (or <cwd>/.taskboard when
  not inside a git repository). Override with --db or TASKBOARD_DB.
  Run `taskboard init` before any other command. A fresh board starts with four
  example tasks.

STATUS VALUES:
  pending | in-progress | completed   (case-insensitive; `in_progress` also works)

EXIT CODES:
  0  Success
  1  Error (validation, task not found, storage, etc.)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to the database file
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the task board database
    Init,

    #[command(flatten)]
    Task(TaskCommands),

    /// Interactive session with list, add and edit screens
    #[command(after_help = "\
LIST SCREEN:
  new | edit <id> | delete <id> | search [text] | filter <all|status> | toggle <status>
ADD / EDIT SCREEN:
  save <title> [:: <description>] | cancel (or back)
EDIT SCREEN ONLY:
  status <status>
ANYWHERE:
  help | quit")]
    Shell,
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a new task (starts as Pending)
    Add {
        /// Task title
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Edit a task's title and/or description
    Edit {
        #[arg(allow_negative_numbers = true)]
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Change a task's status
    Status {
        #[arg(allow_negative_numbers = true)]
        id: i64,
        #[arg(value_parser = parse_status)]
        status: TaskStatus,
    },
    /// Delete a task (deleting an unknown id is not an error)
    Delete {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
    /// Show task details
    Show {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
    /// Show tasks grouped by status
    List {
        /// Only show tasks with this status (or `all`)
        #[arg(long, value_parser = parse_filter, default_value = "all")]
        filter: StatusFilter,
        /// Case-insensitive text to match in title or description
        #[arg(long, default_value = "")]
        search: String,
        /// Expand this section (repeatable); replaces the default expansion
        #[arg(long, value_parser = parse_status)]
        expand: Vec<TaskStatus>,
        /// Expand every section
        #[arg(long, conflicts_with = "expand")]
        expand_all: bool,
    },
}

pub fn parse_status(s: &str) -> Result<TaskStatus, String> {
    TaskStatus::from_str(s)
        .ok_or_else(|| format!("unknown status `{s}`; expected pending, in-progress or completed"))
}

pub fn parse_filter(s: &str) -> Result<StatusFilter, String> {
    StatusFilter::from_str(s).ok_or_else(|| {
        format!("unknown filter `{s}`; expected all, pending, in-progress or completed")
    })
}
