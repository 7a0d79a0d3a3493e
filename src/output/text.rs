use std::fmt::Write;

use crate::models::{StatusFilter, Task};
use crate::presenter::{ListState, ListView};
use crate::view::{Header, Screen};

pub fn render_header(h: &Header) -> String {
    if h.show_back {
        format!("< {}  (back: cancel)", h.title)
    } else {
        format!("== {} ==", h.title)
    }
}

/// One line per task: avatar, title, id, status and creation date.
pub fn render_task_line(t: &Task) -> String {
    let mut line = format!("  [{}] {} ({}) {}", t.avatar(), t.title, t.id, t.status.as_str());
    let _ = write!(line, " - {}", t.created_label());
    if !t.description.is_empty() {
        let _ = write!(line, "\n      {}", t.description);
    }
    line
}

pub fn render_task(t: &Task) -> String {
    let mut out = format!("Task: {} ({})\n", t.title, t.id);
    if !t.description.is_empty() {
        let _ = writeln!(out, "  Description: {}", t.description);
    }
    let _ = writeln!(out, "  Status: {}", t.status.as_str());
    let _ = write!(out, "  Created: {}", t.created_label());
    out
}

pub fn render_filters(state: &ListState) -> String {
    let buttons: Vec<String> = StatusFilter::OPTIONS
        .iter()
        .map(|f| {
            if *f == state.filter {
                format!("[{}]", f.as_str())
            } else {
                f.as_str().to_string()
            }
        })
        .collect();
    let mut out = format!("Filter: {}", buttons.join(" "));
    if !state.search.is_empty() {
        let _ = write!(out, "\nSearch: {}", state.search);
    }
    out
}

pub fn render_list_view(view: &ListView<'_>) -> String {
    let mut out = String::new();
    for section in &view.sections {
        let marker = if section.expanded { '▲' } else { '▼' };
        let _ = writeln!(out, "{} ({}) {marker}", section.status.as_str(), section.count);
        if section.expanded {
            if section.tasks.is_empty() {
                let _ = writeln!(out, "  No tasks found.");
            }
            for t in &section.tasks {
                let _ = writeln!(out, "{}", render_task_line(t));
            }
        }
    }
    out.trim_end().to_string()
}

pub fn render_screen(header: &Header, screen: &Screen<'_>, list: Option<&ListState>) -> String {
    let mut out = render_header(header);
    out.push('\n');
    match screen {
        Screen::List(view) => {
            if let Some(state) = list {
                let _ = writeln!(out, "{}", render_filters(state));
            }
            out.push_str(&render_list_view(view));
        }
        Screen::AddForm => {
            out.push_str("Enter: save <title> [:: <description>]  |  cancel");
        }
        Screen::EditForm(task) => {
            let _ = writeln!(out, "{}", render_task(task));
            out.push_str(
                "Enter: save <title> [:: <description>]  |  status <pending|in-progress|completed>  |  cancel",
            );
        }
        Screen::NotFound { task_id } => {
            let _ = write!(out, "Error: Task not found ({task_id}).\nEnter: back");
        }
    }
    out
}
