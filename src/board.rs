//! The interaction layer: user operations on the board and the create/edit
//! form that feeds them.
//!
//! A `Board` owns the injected `TaskStore` plus the transient UI state: the
//! current filter, the open form (if any) and the card being dragged. Every
//! operation runs to completion and persists through the store before it
//! returns.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::TaskboardError;
use crate::filter::{Columns, Selector, TaskFilter};
use crate::models::{NewTask, Priority, Status, Task, TaskPatch};
use crate::store::{Storage, TaskStore};

/// Fields captured by the create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
}

impl TaskForm {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            due_date: task.due_date,
        }
    }

    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }

    fn into_new_task(self) -> NewTask {
        NewTask {
            title: self.title,
            description: self.description,
            priority: self.priority,
            due_date: self.due_date,
        }
    }

    fn into_patch(self) -> TaskPatch {
        TaskPatch {
            title: Some(self.title),
            description: Some(self.description),
            priority: Some(self.priority),
            due_date: Some(self.due_date),
            status: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Modal {
    #[default]
    Closed,
    Creating(TaskForm),
    Editing { id: String, form: TaskForm },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(Task),
    /// The edit was applied; `changed` is false if the task had disappeared.
    Updated { id: String, changed: bool },
    /// Empty title: nothing saved and the form stays open.
    Rejected,
    /// No form was open.
    NoForm,
}

#[derive(Debug)]
pub struct Board<S: Storage> {
    store: TaskStore<S>,
    filter: TaskFilter,
    modal: Modal,
    dragging: Option<String>,
}

impl<S: Storage> Board<S> {
    pub fn new(store: TaskStore<S>) -> Self {
        Self {
            store,
            filter: TaskFilter::default(),
            modal: Modal::Closed,
            dragging: None,
        }
    }

    pub fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    pub fn into_store(self) -> TaskStore<S> {
        self.store
    }

    // ── filters ────────────────────────────────────────────────────

    pub fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.filter = filter;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
    }

    pub fn set_status_filter(&mut self, status: Selector<Status>) {
        self.filter.status = status;
    }

    pub fn set_priority_filter(&mut self, priority: Selector<Priority>) {
        self.filter.priority = priority;
    }

    pub fn visible(&self) -> Vec<&Task> {
        self.filter.apply(self.store.tasks())
    }

    pub fn columns(&self) -> Columns<'_> {
        Columns::partition(self.visible())
    }

    // ── form ───────────────────────────────────────────────────────

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn is_form_open(&self) -> bool {
        self.modal != Modal::Closed
    }

    pub fn open_create(&mut self) {
        self.modal = Modal::Creating(TaskForm::default());
    }

    /// Open the form pre-filled from an existing task. Returns `false` and
    /// leaves the form closed when the id is unknown.
    pub fn open_edit(&mut self, id: &str) -> bool {
        match self.store.get(id) {
            Some(task) => {
                self.modal = Modal::Editing {
                    id: task.id.clone(),
                    form: TaskForm::from_task(task),
                };
                true
            }
            None => false,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut TaskForm> {
        match &mut self.modal {
            Modal::Closed => None,
            Modal::Creating(form) | Modal::Editing { form, .. } => Some(form),
        }
    }

    pub fn cancel(&mut self) {
        self.modal = Modal::Closed;
    }

    pub fn submit(&mut self) -> Result<SubmitOutcome, TaskboardError> {
        match &self.modal {
            Modal::Closed => return Ok(SubmitOutcome::NoForm),
            Modal::Creating(form) | Modal::Editing { form, .. } if !form.has_title() => {
                debug!("form submission rejected: empty title");
                return Ok(SubmitOutcome::Rejected);
            }
            _ => {}
        }

        match std::mem::take(&mut self.modal) {
            Modal::Creating(form) => {
                let task = self.store.add(form.into_new_task())?;
                Ok(SubmitOutcome::Created(task))
            }
            Modal::Editing { id, form } => {
                let changed = self.store.update(&id, form.into_patch())?;
                Ok(SubmitOutcome::Updated { id, changed })
            }
            Modal::Closed => Ok(SubmitOutcome::NoForm),
        }
    }

    // ── card actions ───────────────────────────────────────────────

    /// Delete immediately, without confirmation.
    pub fn delete(&mut self, id: &str) -> Result<bool, TaskboardError> {
        self.store.remove(id)
    }

    pub fn toggle_complete(&mut self, id: &str) -> Result<bool, TaskboardError> {
        self.store.toggle_status(id)
    }

    // ── drag and drop ──────────────────────────────────────────────

    pub fn dragging(&self) -> Option<&str> {
        self.dragging.as_deref()
    }

    pub fn begin_drag(&mut self, id: &str) -> bool {
        if self.store.get(id).is_none() {
            return false;
        }
        self.dragging = Some(id.to_string());
        true
    }

    /// Drop the dragged card on a column (`None` for outside any column).
    /// The drag selection is cleared whatever the outcome.
    pub fn drop_on(&mut self, target: Option<Status>) -> Result<bool, TaskboardError> {
        let dragged = self.dragging.take();
        match (dragged, target) {
            (Some(id), Some(status)) => self.move_to_status(&id, status),
            _ => Ok(false),
        }
    }

    /// Move a card to another column. Same-column moves are no-ops.
    pub fn move_to_status(&mut self, id: &str, status: Status) -> Result<bool, TaskboardError> {
        match self.store.get(id) {
            Some(task) if task.status != status => self.store.set_status(id, status),
            _ => Ok(false),
        }
    }
}
