use serde_json::json;

use crate::cli::commands::TaskCommands;
use crate::cli::{open_store, print_json, report_error};
use crate::config::Config;
use crate::error::TaskboardError;
use crate::models::{StatusFilter, TaskStatus};
use crate::output;
use crate::presenter::{self, ListState, SectionVisibility};

pub fn run(cmd: TaskCommands, config: &Config, json_output: bool) -> i32 {
    let result = match cmd {
        TaskCommands::Add { title, description } => {
            run_add(config, &title, &description, json_output)
        }
        TaskCommands::Edit { id, title, description } => {
            run_edit(config, id, title.as_deref(), description.as_deref(), json_output)
        }
        TaskCommands::Status { id, status } => run_status(config, id, status, json_output),
        TaskCommands::Delete { id } => run_delete(config, id, json_output),
        TaskCommands::Show { id } => run_show(config, id, json_output),
        TaskCommands::List { filter, search, expand, expand_all } => {
            let sections = if expand_all {
                SectionVisibility::all_expanded()
            } else if !expand.is_empty() {
                SectionVisibility::only(&expand)
            } else {
                config.default_sections()
            };
            run_list(config, filter, &search, sections, json_output)
        }
    };
    match result {
        Ok(code) => code,
        Err(e) => report_error(&e, json_output),
    }
}

fn run_add(
    config: &Config,
    title: &str,
    description: &str,
    json_output: bool,
) -> Result<i32, TaskboardError> {
    let mut store = open_store(config)?;
    let task = store.add(title, description)?;

    if json_output {
        print_json(&output::json::success(json!({
            "task": output::json::task_json(&task)
        })))?;
    } else {
        println!("Added task: {} ({})", task.title, task.id);
    }
    Ok(0)
}

fn run_edit(
    config: &Config,
    id: i64,
    title: Option<&str>,
    description: Option<&str>,
    json_output: bool,
) -> Result<i32, TaskboardError> {
    let mut store = open_store(config)?;
    let current = store.get(id).ok_or_else(|| TaskboardError::task_not_found(id))?;
    let title = title.unwrap_or(current.title.as_str()).to_string();
    let description = description.unwrap_or(current.description.as_str()).to_string();
    let task = store.update(id, &title, &description)?;

    if json_output {
        print_json(&output::json::success(json!({
            "task": output::json::task_json(&task)
        })))?;
    } else {
        println!("Updated task: {} ({})", task.title, task.id);
    }
    Ok(0)
}

fn run_status(
    config: &Config,
    id: i64,
    status: TaskStatus,
    json_output: bool,
) -> Result<i32, TaskboardError> {
    let mut store = open_store(config)?;
    let task = store.set_status(id, status)?;

    if json_output {
        print_json(&output::json::success(json!({
            "task": output::json::task_json(&task)
        })))?;
    } else {
        println!("Task {} is now {}", task.id, task.status.as_str());
    }
    Ok(0)
}

fn run_delete(config: &Config, id: i64, json_output: bool) -> Result<i32, TaskboardError> {
    let mut store = open_store(config)?;
    let removed = store.remove(id);

    if json_output {
        print_json(&output::json::success(json!({
            "id": id,
            "deleted": removed.is_some(),
            "task": removed.as_ref().map(output::json::task_json)
        })))?;
    } else {
        match removed {
            Some(task) => println!("Deleted task: {} ({})", task.title, task.id),
            None => println!("No task with id {id}; nothing deleted."),
        }
    }
    Ok(0)
}

fn run_show(config: &Config, id: i64, json_output: bool) -> Result<i32, TaskboardError> {
    let store = open_store(config)?;
    let task = store.get(id).ok_or_else(|| TaskboardError::task_not_found(id))?;

    if json_output {
        print_json(&output::json::success(json!({
            "task": output::json::task_json(task)
        })))?;
    } else {
        println!("{}", output::text::render_task(task));
    }
    Ok(0)
}

fn run_list(
    config: &Config,
    filter: StatusFilter,
    search: &str,
    sections: SectionVisibility,
    json_output: bool,
) -> Result<i32, TaskboardError> {
    let store = open_store(config)?;
    let state = ListState::with_sections(sections)
        .with_search(search)
        .with_filter(filter);
    let view = presenter::present(store.tasks(), &state);

    if json_output {
        let mut data = output::json::list_view_json(&view);
        data["filter"] = json!(filter.as_str());
        data["search"] = json!(search);
        print_json(&output::json::success(data))?;
    } else {
        println!("{}", output::text::render_filters(&state));
        println!("{}", output::text::render_list_view(&view));
    }
    Ok(0)
}
