use serde_json::json;

use crate::config::Config;
use crate::error::TaskboardError;
use crate::filter::TaskFilter;
use crate::output;

use super::task::today;
use super::{finish, open_board};

pub fn run(config: &Config, filter: TaskFilter, json_output: bool) -> i32 {
    finish(run_inner(config, filter, json_output), json_output)
}

fn run_inner(config: &Config, filter: TaskFilter, json_output: bool) -> Result<i32, TaskboardError> {
    let mut board = open_board(config)?;
    board.set_filter(filter);
    let columns = board.columns();

    if json_output {
        output::json::print(&output::json::success(json!({
            "filter": output::json::filter_json(board.filter()),
            "columns": output::json::columns_json(&columns, today()),
            "visible": columns.total(),
            "total": board.store().len()
        })));
    } else {
        output::text::print_board(&columns, today());
    }
    Ok(0)
}
