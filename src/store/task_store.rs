use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::TaskboardError;
use crate::models::{NewTask, Status, Task, TaskPatch};

use super::storage::Storage;

/// Key under which the whole task collection is stored.
pub const TASKS_KEY: &str = "tasks";

/// In-memory task collection, written through to storage on every mutation.
///
/// Operations on an id that is not in the collection are no-ops and return
/// `false`; they never fail.
#[derive(Debug)]
pub struct TaskStore<S: Storage> {
    storage: S,
    tasks: Vec<Task>,
}

impl<S: Storage> TaskStore<S> {
    /// Hydrate the store. Missing or unparseable data yields an empty collection.
    #[tracing::instrument(skip(storage))]
    pub fn open(storage: S) -> Result<Self, TaskboardError> {
        let tasks = load(&storage)?;
        Ok(Self { storage, tasks })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Resolve a task by exact id, then by unique id prefix.
    pub fn resolve(&self, reference: &str) -> Result<Option<&Task>, TaskboardError> {
        if let Some(task) = self.get(reference) {
            return Ok(Some(task));
        }
        if reference.is_empty() {
            return Ok(None);
        }

        let needle = reference.to_ascii_uppercase();
        let matches: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| t.id.to_ascii_uppercase().starts_with(&needle))
            .collect();

        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.into_iter().next()),
            _ => {
                let candidates: Vec<String> = matches
                    .iter()
                    .map(|t| format!("{} ({})", t.title, t.id))
                    .collect();
                Err(TaskboardError::ambiguous_ref(reference, &candidates))
            }
        }
    }

    /// Serialize the full collection and overwrite the stored record.
    pub fn persist(&mut self) -> Result<(), TaskboardError> {
        write_tasks(&mut self.storage, &self.tasks)
    }

    /// Write `next` to storage and adopt it only once the write succeeded.
    fn commit(&mut self, next: Vec<Task>) -> Result<(), TaskboardError> {
        write_tasks(&mut self.storage, &next)?;
        self.tasks = next;
        Ok(())
    }

    /// Append a new `todo` task. Title validation is the caller's job.
    pub fn add(&mut self, new: NewTask) -> Result<Task, TaskboardError> {
        let task = Task {
            id: self.fresh_id(),
            title: new.title,
            description: new.description,
            priority: new.priority,
            due_date: new.due_date,
            status: Status::Todo,
            created_at: Utc::now(),
        };
        let mut next = self.tasks.clone();
        next.push(task.clone());
        self.commit(next)?;
        info!(id = %task.id, title = %task.title, "added task");
        Ok(task)
    }

    pub fn update(&mut self, id: &str, patch: TaskPatch) -> Result<bool, TaskboardError> {
        let Some(idx) = self.tasks.iter().position(|t| t.id == id) else {
            debug!(id, "update skipped: no such task");
            return Ok(false);
        };
        let mut next = self.tasks.clone();
        patch.apply_to(&mut next[idx]);
        self.commit(next)?;
        info!(id, "updated task");
        Ok(true)
    }

    pub fn remove(&mut self, id: &str) -> Result<bool, TaskboardError> {
        let Some(idx) = self.tasks.iter().position(|t| t.id == id) else {
            debug!(id, "remove skipped: no such task");
            return Ok(false);
        };
        let mut next = self.tasks.clone();
        next.remove(idx);
        self.commit(next)?;
        info!(id, "removed task");
        Ok(true)
    }

    pub fn set_status(&mut self, id: &str, status: Status) -> Result<bool, TaskboardError> {
        self.update(id, TaskPatch::status(status))
    }

    /// `completed` goes back to `todo`; anything else becomes `completed`.
    pub fn toggle_status(&mut self, id: &str) -> Result<bool, TaskboardError> {
        let Some(current) = self.get(id).map(|t| t.status) else {
            debug!(id, "toggle skipped: no such task");
            return Ok(false);
        };
        self.set_status(id, current.toggled())
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = ulid::Ulid::new().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

fn write_tasks<S: Storage>(storage: &mut S, tasks: &[Task]) -> Result<(), TaskboardError> {
    let payload = serde_json::to_string(tasks)?;
    storage.set(TASKS_KEY, &payload)?;
    debug!(count = tasks.len(), bytes = payload.len(), "persisted tasks");
    Ok(())
}

#[tracing::instrument(skip(storage))]
fn load<S: Storage>(storage: &S) -> Result<Vec<Task>, TaskboardError> {
    let Some(raw) = storage.get(TASKS_KEY)? else {
        debug!("no saved tasks");
        return Ok(Vec::new());
    };
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    match serde_json::from_str::<Vec<Task>>(&raw) {
        Ok(tasks) => {
            debug!(count = tasks.len(), "loaded tasks");
            Ok(tasks)
        }
        Err(err) => {
            warn!(error = %err, "saved tasks are unreadable; starting with an empty board");
            Ok(Vec::new())
        }
    }
}
