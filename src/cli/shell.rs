use std::io::{self, BufRead, Write};

use log::info;

use crate::cli::{open_store, report_error};
use crate::config::Config;
use crate::error::TaskboardError;
use crate::models::{StatusFilter, TaskStatus};
use crate::output;
use crate::storage::KeyValueStore;
use crate::store::TaskStore;
use crate::view::{Intent, ViewController, ViewState};

const HELP: &str = "\
list screen:  new | edit <id> | delete <id> | search [text] | filter <all|status> | toggle <status>
add screen:   save <title> [:: <description>] | cancel
edit screen:  save <title> [:: <description>] | status <status> | cancel
              (omitting `::` keeps the current description)
anywhere:     back | help | quit";

#[derive(Debug, PartialEq, Eq)]
pub enum ShellCommand {
    Intent(Intent),
    Help,
    Quit,
    Empty,
}

pub fn run(config: &Config) -> i32 {
    let mut store = match open_store(config) {
        Ok(store) => store,
        Err(e) => return report_error(&e, false),
    };
    let controller = ViewController::new(config.default_sections());
    let stdin = io::stdin();
    let stdout = io::stdout();
    match run_session(stdin.lock(), stdout.lock(), &controller, &mut store) {
        Ok(()) => 0,
        Err(e) => report_error(&TaskboardError::storage(e.to_string()), false),
    }
}

/// Read commands line by line until `quit` or end of input, re-rendering the
/// current screen after every command.
pub fn run_session<R, W, S>(
    input: R,
    mut out: W,
    controller: &ViewController,
    store: &mut TaskStore<S>,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    S: KeyValueStore,
{
    let mut state = controller.initial();
    render(&mut out, controller, &state, store)?;

    for line in input.lines() {
        let line = line?;
        let command = match parse_command(&state, &line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "Error: {}", e.message)?;
                continue;
            }
        };
        match command {
            ShellCommand::Empty => continue,
            ShellCommand::Quit => break,
            ShellCommand::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            ShellCommand::Intent(intent) => match controller.dispatch(&state, intent, store) {
                Ok(next) => state = next,
                Err(e) => {
                    writeln!(out, "Error: {}", e.message)?;
                    continue;
                }
            },
        }
        render(&mut out, controller, &state, store)?;
    }

    info!("event=shell_exit module=cli status=ok view={}", state.name());
    Ok(())
}

fn render<W: Write, S: KeyValueStore>(
    out: &mut W,
    controller: &ViewController,
    state: &ViewState,
    store: &TaskStore<S>,
) -> io::Result<()> {
    let screen = controller.render(state, store);
    let list = match state {
        ViewState::List(list) => Some(list),
        _ => None,
    };
    writeln!(
        out,
        "{}",
        output::text::render_screen(&state.header(), &screen, list)
    )
}

/// Turn one input line into a command for the current screen. `save` means
/// add or update depending on which form is open.
pub fn parse_command(state: &ViewState, line: &str) -> Result<ShellCommand, TaskboardError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let intent = match word.to_ascii_lowercase().as_str() {
        "" => return Ok(ShellCommand::Empty),
        "help" | "?" => return Ok(ShellCommand::Help),
        "quit" | "exit" => return Ok(ShellCommand::Quit),
        "cancel" | "back" => Intent::Cancel,
        "new" | "add" => Intent::NewTask,
        "edit" => Intent::EditTask(parse_id(rest)?),
        "delete" | "rm" => Intent::DeleteTask(parse_id(rest)?),
        "search" => Intent::Search(rest.to_string()),
        "filter" => Intent::Filter(
            StatusFilter::from_str(rest)
                .ok_or_else(|| TaskboardError::validation(format!("unknown filter `{rest}`")))?,
        ),
        "toggle" => Intent::ToggleSection(parse_status(rest)?),
        "status" => Intent::ChangeStatus(parse_status(rest)?),
        "save" => {
            let (title, description) = match rest.split_once("::") {
                Some((title, description)) => {
                    (title.trim(), Some(description.trim().to_string()))
                }
                None => (rest, None),
            };
            let title = title.to_string();
            match state {
                ViewState::Edit { .. } => Intent::SubmitEdit { title, description },
                _ => Intent::SubmitAdd {
                    title,
                    description: description.unwrap_or_default(),
                },
            }
        }
        other => {
            return Err(TaskboardError::validation(format!(
                "unknown command `{other}`; type `help`"
            )))
        }
    };
    Ok(ShellCommand::Intent(intent))
}

fn parse_id(s: &str) -> Result<i64, TaskboardError> {
    s.parse()
        .map_err(|_| TaskboardError::validation(format!("invalid task id `{s}`")))
}

fn parse_status(s: &str) -> Result<TaskStatus, TaskboardError> {
    TaskStatus::from_str(s)
        .ok_or_else(|| TaskboardError::validation(format!("unknown status `{s}`")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::ListState;
    use crate::storage::{MemoryStore, STORAGE_KEY};

    fn list() -> ViewState {
        ViewState::List(ListState::default())
    }

    #[test]
    fn save_targets_the_open_form() {
        assert_eq!(
            parse_command(&ViewState::Add, "save Buy milk :: two litres").unwrap(),
            ShellCommand::Intent(Intent::SubmitAdd {
                title: "Buy milk".into(),
                description: "two litres".into()
            })
        );
        assert_eq!(
            parse_command(&ViewState::Edit { task_id: 3 }, "save Renamed").unwrap(),
            ShellCommand::Intent(Intent::SubmitEdit {
                title: "Renamed".into(),
                description: None
            })
        );
        assert_eq!(
            parse_command(&ViewState::Edit { task_id: 3 }, "save Renamed ::").unwrap(),
            ShellCommand::Intent(Intent::SubmitEdit {
                title: "Renamed".into(),
                description: Some(String::new())
            })
        );
    }

    #[test]
    fn parse_rejects_bad_arguments() {
        assert!(parse_command(&list(), "edit abc").is_err());
        assert!(parse_command(&list(), "toggle done").is_err());
        assert!(parse_command(&list(), "frobnicate").is_err());
        assert_eq!(parse_command(&list(), "   ").unwrap(), ShellCommand::Empty);
    }

    #[test]
    fn session_adds_task_and_returns_to_list() {
        let mut store = TaskStore::open(MemoryStore::with_value(STORAGE_KEY, "[]"));
        let controller = ViewController::default();
        let input = "new\nsave\nsave Write report :: quarterly\nquit\n";
        let mut out = Vec::new();
        run_session(input.as_bytes(), &mut out, &controller, &mut store).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Add New Task"));
        assert!(out.contains("Error: Please enter a task title."));
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].title, "Write report");
        assert_eq!(store.tasks()[0].description, "quarterly");
    }

    #[test]
    fn session_edit_save_without_description_keeps_it() {
        let mut store = TaskStore::open(MemoryStore::with_value(STORAGE_KEY, "[]"));
        let id = store.add("Draft", "keep me").unwrap().id;
        let controller = ViewController::default();
        let input = format!("edit {id}\nsave Renamed\nquit\n");
        let mut out = Vec::new();
        run_session(input.as_bytes(), &mut out, &controller, &mut store).unwrap();

        let task = store.get(id).unwrap();
        assert_eq!(task.title, "Renamed");
        assert_eq!(task.description, "keep me");
    }

    #[test]
    fn session_shows_not_found_for_missing_edit_target() {
        let mut store = TaskStore::open(MemoryStore::with_value(STORAGE_KEY, "[]"));
        let controller = ViewController::default();
        let mut out = Vec::new();
        run_session("edit 99\nback\n".as_bytes(), &mut out, &controller, &mut store).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Error: Task not found (99)."));
        assert!(out.trim_end().ends_with("Completed (0) ▼"));
    }
}
