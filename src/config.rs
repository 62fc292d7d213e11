use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::TaskboardError;

pub const STORE_DIR: &str = ".taskboard";
pub const STORE_FILE: &str = "taskboard.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store_path: PathBuf,
}

impl Config {
    /// Resolve settings. An explicit path (flag or `TASKBOARD_STORE`) wins;
    /// otherwise the store lives under the enclosing git repository, or under
    /// the current directory outside one.
    pub fn resolve(store_override: Option<&Path>) -> Result<Self, TaskboardError> {
        let store_path = match store_override {
            Some(path) => path.to_path_buf(),
            None => {
                let cwd = env::current_dir()?;
                let root = find_git_root(&cwd).unwrap_or(cwd);
                root.join(STORE_DIR).join(STORE_FILE)
            }
        };
        debug!(store = %store_path.display(), "resolved store path");
        Ok(Self { store_path })
    }
}

/// Find the .git root by walking up from `start`.
pub fn find_git_root(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        if dir.join(".git").exists() {
            return Some(dir);
        }
        if !dir.pop() {
            return None;
        }
    }
}
