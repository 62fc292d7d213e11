pub mod board;
pub mod commands;
pub mod init;
pub mod status;
pub mod task;

pub use commands::*;

use crate::board::Board;
use crate::config::Config;
use crate::error::TaskboardError;
use crate::output;
use crate::store::{SqliteStorage, TaskStore};

/// Open the configured store and wrap it in a board.
pub fn open_board(config: &Config) -> Result<Board<SqliteStorage>, TaskboardError> {
    let storage = SqliteStorage::open(&config.store_path)?;
    Ok(Board::new(TaskStore::open(storage)?))
}

/// Turn a handler result into an exit code, reporting the error.
pub fn finish(result: Result<i32, TaskboardError>, json_output: bool) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            if json_output {
                output::json::print(&output::json::error(&e));
            } else {
                eprintln!("Error: {}", e.message);
            }
            1
        }
    }
}
