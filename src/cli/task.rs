use chrono::{Local, NaiveDate};
use serde_json::json;

use crate::board::{Board, SubmitOutcome};
use crate::cli::commands::{EditArgs, TaskCommands};
use crate::config::Config;
use crate::error::TaskboardError;
use crate::models::{Priority, Status};
use crate::output;
use crate::store::Storage;

use super::{finish, open_board};

pub fn run(cmd: TaskCommands, config: &Config, json_output: bool) -> i32 {
    finish(run_inner(cmd, config, json_output), json_output)
}

fn run_inner(cmd: TaskCommands, config: &Config, json_output: bool) -> Result<i32, TaskboardError> {
    let mut board = open_board(config)?;
    match cmd {
        TaskCommands::Add { title, description, priority, due } => {
            run_add(&mut board, title, description, priority, due, json_output)
        }
        TaskCommands::Edit { id, changes } => run_edit(&mut board, &id, changes, json_output),
        TaskCommands::Rm { id } => run_remove(&mut board, &id, json_output),
        TaskCommands::Toggle { id } => run_toggle(&mut board, &id, json_output),
        TaskCommands::Move { id, status } => run_move(&mut board, &id, status, json_output),
        TaskCommands::Show { id } => run_show(&board, &id, json_output),
    }
}

fn run_add<S: Storage>(
    board: &mut Board<S>,
    title: String,
    description: String,
    priority: Priority,
    due: Option<NaiveDate>,
    json_output: bool,
) -> Result<i32, TaskboardError> {
    board.open_create();
    if let Some(form) = board.form_mut() {
        form.title = title;
        form.description = description;
        form.priority = priority;
        form.due_date = due;
    }

    match board.submit()? {
        SubmitOutcome::Created(task) => {
            if json_output {
                output::json::print(&output::json::success(json!({
                    "task": output::json::task_json(&task, today())
                })));
            } else {
                println!("Added task: {} ({})", task.title, task.id);
            }
            Ok(0)
        }
        _ => Err(TaskboardError::empty_title()),
    }
}

fn run_edit<S: Storage>(
    board: &mut Board<S>,
    reference: &str,
    args: EditArgs,
    json_output: bool,
) -> Result<i32, TaskboardError> {
    let Some(id) = resolve_id(board, reference)? else {
        return report_unknown(reference, json_output);
    };

    board.open_edit(&id);
    if let Some(form) = board.form_mut() {
        if let Some(title) = args.title {
            form.title = title;
        }
        if let Some(description) = args.description {
            form.description = description;
        }
        if let Some(priority) = args.priority {
            form.priority = priority;
        }
        if args.clear_due {
            form.due_date = None;
        } else if args.due.is_some() {
            form.due_date = args.due;
        }
    }

    match board.submit()? {
        SubmitOutcome::Updated { id, changed } => report_task(board, &id, changed, "Updated", json_output),
        _ => Err(TaskboardError::empty_title()),
    }
}

fn run_remove<S: Storage>(
    board: &mut Board<S>,
    reference: &str,
    json_output: bool,
) -> Result<i32, TaskboardError> {
    let Some(id) = resolve_id(board, reference)? else {
        return report_unknown(reference, json_output);
    };
    let title = board.store().get(&id).map(|t| t.title.clone()).unwrap_or_default();
    let changed = board.delete(&id)?;

    if json_output {
        output::json::print(&output::json::success(json!({
            "changed": changed,
            "removed": { "id": id, "title": title }
        })));
    } else {
        println!("Deleted task: {title} ({id})");
    }
    Ok(0)
}

fn run_toggle<S: Storage>(
    board: &mut Board<S>,
    reference: &str,
    json_output: bool,
) -> Result<i32, TaskboardError> {
    let Some(id) = resolve_id(board, reference)? else {
        return report_unknown(reference, json_output);
    };
    let changed = board.toggle_complete(&id)?;
    report_task(board, &id, changed, "Toggled", json_output)
}

fn run_move<S: Storage>(
    board: &mut Board<S>,
    reference: &str,
    status: Status,
    json_output: bool,
) -> Result<i32, TaskboardError> {
    let Some(id) = resolve_id(board, reference)? else {
        return report_unknown(reference, json_output);
    };
    board.begin_drag(&id);
    let changed = board.drop_on(Some(status))?;

    if !changed && !json_output {
        println!("Task {id} is already in {}", status.label());
        return Ok(0);
    }
    report_task(board, &id, changed, "Moved", json_output)
}

fn run_show<S: Storage>(
    board: &Board<S>,
    reference: &str,
    json_output: bool,
) -> Result<i32, TaskboardError> {
    let task = board
        .store()
        .resolve(reference)?
        .ok_or_else(|| TaskboardError::task_not_found(reference))?;

    if json_output {
        output::json::print(&output::json::success(json!({
            "task": output::json::task_json(task, today())
        })));
    } else {
        output::text::print_task(task, today());
    }
    Ok(0)
}

fn resolve_id<S: Storage>(board: &Board<S>, reference: &str) -> Result<Option<String>, TaskboardError> {
    Ok(board.store().resolve(reference)?.map(|t| t.id.clone()))
}

fn report_task<S: Storage>(
    board: &Board<S>,
    id: &str,
    changed: bool,
    verb: &str,
    json_output: bool,
) -> Result<i32, TaskboardError> {
    let Some(task) = board.store().get(id) else {
        return report_unknown(id, json_output);
    };
    if json_output {
        output::json::print(&output::json::success(json!({
            "changed": changed,
            "task": output::json::task_json(task, today())
        })));
    } else {
        println!("{verb} task: {} ({}) [{}]", task.title, task.id, task.status.as_str());
    }
    Ok(0)
}

fn report_unknown(reference: &str, json_output: bool) -> Result<i32, TaskboardError> {
    if json_output {
        output::json::print(&output::json::success(json!({
            "changed": false,
            "reference": reference
        })));
    } else {
        println!("No task matches '{reference}'; nothing changed.");
    }
    Ok(0)
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}
