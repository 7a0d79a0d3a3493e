use serde_json::{json, Value};

use crate::error::TaskboardError;
use crate::models::Task;
use crate::presenter::{ListView, Section};

pub fn success(data: Value) -> Value {
    json!({
        "success": true,
        "data": data
    })
}

pub fn error(err: &TaskboardError) -> Value {
    json!({
        "success": false,
        "error": {
            "code": err.code.as_str(),
            "message": err.message
        }
    })
}

pub fn task_json(t: &Task) -> Value {
    json!({
        "id": t.id,
        "title": t.title,
        "description": t.description,
        "status": t.status.as_str(),
        "createdAt": t.created_at.to_rfc3339()
    })
}

pub fn section_json(s: &Section<'_>) -> Value {
    json!({
        "status": s.status.as_str(),
        "count": s.count,
        "expanded": s.expanded,
        "tasks": s.tasks.iter().map(|t| task_json(t)).collect::<Vec<_>>()
    })
}

pub fn list_view_json(view: &ListView<'_>) -> Value {
    json!({
        "total": view.total(),
        "sections": view.sections.iter().map(section_json).collect::<Vec<_>>()
    })
}
