use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};

use crate::filter::Selector;
use crate::models::{parse_due_date, Priority, Status};

const VERSION: &str = env!("TASKBOARD_VERSION");

#[derive(Parser)]
#[command(
    name = "taskboard",
    version = VERSION,
    about = "Local task board with To Do / In Progress / Completed columns",
    after_help = "\
STORE:
  Tasks live in a SQLite file. Resolution order: --store, $TASKBOARD_STORE,
  <git-root>/.taskboard/taskboard.db, then ./.taskboard/taskboard.db.
  The store is created on first use; `init` only does so explicitly.

EXIT CODES:
  0  Success (including no-ops on unknown task ids)
  1  Error (empty title, ambiguous id, invalid value, storage failure)

BEHAVIOR NOTES:
  Task ids may be abbreviated to any unique prefix.
  `toggle` flips completed -> todo, and todo/in-progress -> completed.
  `move` to the task's current column changes nothing.
  Unreadable saved data is treated as an empty board."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Path of the store database
    #[arg(long, global = true, env = "TASKBOARD_STORE")]
    pub store: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Less log output
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the task store
    Init,

    #[command(flatten)]
    Task(TaskCommands),

    /// Show the board, optionally filtered
    #[command(visible_alias = "ls")]
    List {
        /// Case-insensitive text matched against title and description
        #[arg(long, short, default_value = "")]
        search: String,
        /// all, todo, in-progress or completed
        #[arg(long, default_value = "all")]
        status: Selector<Status>,
        /// all, low, medium or high
        #[arg(long, default_value = "all")]
        priority: Selector<Priority>,
    },

    /// Show column counts for the whole board
    Status,
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task to the To Do column
    Add {
        /// Task title (must not be blank)
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// low, medium or high
        #[arg(long, default_value = "medium")]
        priority: Priority,
        /// Due date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_due_date)]
        due: Option<NaiveDate>,
    },

    /// Edit a task; omitted fields keep their current value
    Edit {
        /// Task ID or prefix
        id: String,
        #[command(flatten)]
        changes: EditArgs,
    },

    /// Delete a task (no confirmation)
    #[command(visible_alias = "delete")]
    Rm {
        /// Task ID or prefix
        id: String,
    },

    /// Toggle a task between completed and todo
    Toggle {
        /// Task ID or prefix
        id: String,
    },

    /// Move a task to another column
    Move {
        /// Task ID or prefix
        id: String,
        /// Target column: todo, in-progress or completed
        status: Status,
    },

    /// Show task details
    Show {
        /// Task ID or prefix
        id: String,
    },
}

/// Values from `edit` flags; omitted flags keep the current value.
#[derive(Args, Debug, Default)]
pub struct EditArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub priority: Option<Priority>,
    /// Due date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_due_date, conflicts_with = "clear_due")]
    pub due: Option<NaiveDate>,
    /// Remove the due date
    #[arg(long)]
    pub clear_due: bool,
}
