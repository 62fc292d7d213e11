use std::fs;
use std::path::Path;

use rusqlite::Connection;
use tracing::debug;

use crate::error::TaskboardError;

use super::migrations;

/// Open the store database, creating the file, parent directories and
/// schema when they do not exist yet.
pub fn open_db(path: &Path) -> Result<Connection, TaskboardError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            TaskboardError::database(format!("failed to create {}: {e}", parent.display()))
        })?;
    }
    let conn = Connection::open(path)?;
    configure_connection(&conn)?;
    migrations::run_migrations(&conn)?;
    debug!(path = %path.display(), "opened store database");
    Ok(conn)
}

/// In-memory database with the same schema, used by tests.
pub fn open_in_memory() -> Result<Connection, TaskboardError> {
    let conn = Connection::open_in_memory()?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}

fn configure_connection(conn: &Connection) -> Result<(), TaskboardError> {
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA busy_timeout=5000;",
    )?;
    Ok(())
}
