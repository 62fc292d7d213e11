use serde_json::json;

use crate::config::Config;
use crate::error::TaskboardError;
use crate::output;
use crate::store::{SqliteStorage, TaskStore};

pub fn run(config: &Config, json_output: bool) -> i32 {
    super::finish(run_inner(config, json_output), json_output)
}

fn run_inner(config: &Config, json_output: bool) -> Result<i32, TaskboardError> {
    let storage = SqliteStorage::open(&config.store_path)?;
    let store = TaskStore::open(storage)?;

    if json_output {
        output::json::print(&output::json::success(json!({
            "path": config.store_path.to_string_lossy(),
            "tasks": store.len()
        })));
    } else {
        println!(
            "Initialized taskboard at {} ({} tasks)",
            config.store_path.display(),
            store.len()
        );
    }
    Ok(0)
}
