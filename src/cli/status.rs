use serde_json::json;

use crate::config::Config;
use crate::error::TaskboardError;
use crate::filter::Columns;
use crate::output;

use super::task::today;
use super::{finish, open_board};

pub fn run(config: &Config, json_output: bool) -> i32 {
    finish(run_inner(config, json_output), json_output)
}

fn run_inner(config: &Config, json_output: bool) -> Result<i32, TaskboardError> {
    let board = open_board(config)?;
    let tasks = board.store().tasks();
    let columns = Columns::partition(tasks);
    let overdue = tasks.iter().filter(|t| t.is_overdue(today())).count();

    if json_output {
        output::json::print(&output::json::success(json!({
            "store": config.store_path.to_string_lossy(),
            "counts": output::json::counts_json(&columns),
            "overdue": overdue
        })));
    } else {
        println!("Store: {}", config.store_path.display());
        output::text::print_counts(&columns);
        if overdue > 0 {
            println!("  Overdue: {overdue}");
        }
    }
    Ok(0)
}
