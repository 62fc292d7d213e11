use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::error::TaskboardError;
use crate::filter::{Columns, TaskFilter};
use crate::models::Task;

pub fn print(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Error: failed to render JSON: {e}"),
    }
}

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

pub fn task_json(t: &Task, today: NaiveDate) -> Value {
    json!({
        "id": t.id,
        "title": t.title,
        "description": t.description,
        "priority": t.priority.as_str(),
        "dueDate": t.due_date.map(|d| d.format("%Y-%m-%d").to_string()),
        "status": t.status.as_str(),
        "createdAt": t.created_at.to_rfc3339(),
        "overdue": t.is_overdue(today)
    })
}

pub fn filter_json(f: &TaskFilter) -> Value {
    json!({
        "search": f.search,
        "status": f.status.to_string(),
        "priority": f.priority.to_string()
    })
}

pub fn columns_json(columns: &Columns<'_>, today: NaiveDate) -> Value {
    let mut out = serde_json::Map::new();
    for (status, tasks) in columns.iter() {
        out.insert(
            status.as_str().to_string(),
            Value::Array(tasks.iter().map(|t| task_json(t, today)).collect()),
        );
    }
    Value::Object(out)
}

pub fn counts_json(columns: &Columns<'_>) -> Value {
    json!({
        "total": columns.total(),
        "todo": columns.todo.len(),
        "in-progress": columns.in_progress.len(),
        "completed": columns.completed.len()
    })
}
