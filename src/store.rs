// In-memory task store shared by every consumer of a board

use crate::config::{BoardConfig, StatusValidation};
use crate::filter::{self, Filter};
use crate::models::{Column, NewTask, Task, TaskPatch, TaskStatus};
use eyre::{Result, eyre};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info};

/// Prefix of every id the store hands out
pub const ID_PREFIX: &str = "task-";

struct Inner {
    columns: Vec<Column>,
    validation: StatusValidation,
    sample_tasks: Vec<NewTask>,
    tasks: RefCell<Vec<Task>>,
}

/// Handle to a task board
///
/// Cloning a `Store` clones the handle, not the board: every clone reads and
/// mutates the same tasks. Build one with [`Store::new`] at startup and pass
/// clones to whatever needs it; tests build their own isolated instances.
///
/// The store is single-threaded. No borrow of the task list outlives a method
/// call, so operations never observe each other half-done.
#[derive(Clone)]
pub struct Store {
    inner: Rc<Inner>,
}

impl Store {
    /// Create an empty board with the given columns and options
    ///
    /// The config must pass [`BoardConfig::validate`]; presets and
    /// [`BoardConfig::load`] already do. Debug builds assert it.
    pub fn new(config: BoardConfig) -> Self {
        debug_assert!(
            config.validate().is_ok(),
            "Store::new called with an invalid board config: {:?}",
            config.validate().err()
        );
        let sample_tasks = config.sample_tasks();
        debug!(columns = config.columns.len(), validation = ?config.validation, "Creating store");

        Self {
            inner: Rc::new(Inner {
                columns: config.columns,
                validation: config.validation,
                sample_tasks,
                tasks: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Configured columns, in display order
    pub fn columns(&self) -> &[Column] {
        &self.inner.columns
    }

    pub fn column(&self, status: &TaskStatus) -> Option<&Column> {
        self.inner.columns.iter().find(|c| &c.id == status)
    }

    pub fn is_known_status(&self, status: &TaskStatus) -> bool {
        self.column(status).is_some()
    }

    pub fn validation(&self) -> StatusValidation {
        self.inner.validation
    }

    /// True when both handles point at the same board
    pub fn same_board(&self, other: &Store) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    // ========================================================================
    // CRUD API
    // ========================================================================

    /// Append a new task and return it with its freshly assigned id
    ///
    /// The status is not checked against the columns; see [`Store::add_task_checked`].
    pub fn add_task(&self, new_task: NewTask) -> Task {
        let task = new_task.into_task(generate_id());
        debug!(id = %task.id, status = %task.status, "add_task");

        self.inner.tasks.borrow_mut().push(task.clone());
        task
    }

    /// Merge `patch` into the task with the given id
    ///
    /// Returns the updated task, or `None` (with nothing changed) when no task has that id.
    pub fn update_task(&self, id: &str, patch: TaskPatch) -> Option<Task> {
        let mut tasks = self.inner.tasks.borrow_mut();
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            debug!(id, "update_task: not found");
            return None;
        };

        task.apply(patch);
        debug!(id, status = %task.status, "update_task");
        Some(task.clone())
    }

    /// Remove the task with the given id; false when there was none
    pub fn delete_task(&self, id: &str) -> bool {
        let mut tasks = self.inner.tasks.borrow_mut();
        match tasks.iter().position(|t| t.id == id) {
            Some(index) => {
                tasks.remove(index);
                debug!(id, "delete_task");
                true
            }
            None => {
                debug!(id, "delete_task: not found");
                false
            }
        }
    }

    /// Shorthand for updating only the status
    pub fn move_task(&self, id: &str, status: impl Into<TaskStatus>) -> Option<Task> {
        self.update_task(id, TaskPatch::new().status(status))
    }

    pub fn get_task(&self, id: &str) -> Option<Task> {
        self.inner.tasks.borrow().iter().find(|t| t.id == id).cloned()
    }

    /// Snapshot of the tasks matching every filter, in insertion order
    pub fn list(&self, filters: &[Filter]) -> Vec<Task> {
        self.inner
            .tasks
            .borrow()
            .iter()
            .filter(|t| filter::matches_all(filters, t))
            .cloned()
            .collect()
    }

    /// Number of tasks matching every filter
    pub fn count(&self, filters: &[Filter]) -> usize {
        self.inner
            .tasks
            .borrow()
            .iter()
            .filter(|t| filter::matches_all(filters, t))
            .count()
    }

    pub fn len(&self) -> usize {
        self.inner.tasks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.tasks.borrow().is_empty()
    }

    /// Remove every task
    pub fn clear_all_tasks(&self) {
        let removed = std::mem::take(&mut *self.inner.tasks.borrow_mut()).len();
        info!(removed, "Cleared all tasks");
    }

    /// Append the seed tasks for this board. Existing tasks are kept.
    pub fn initialize_sample_data(&self) {
        for new_task in self.inner.sample_tasks.clone() {
            self.add_task(new_task);
        }
        info!(added = self.inner.sample_tasks.len(), "Initialized sample data");
    }

    // ========================================================================
    // Live views
    // ========================================================================

    /// Every task, re-read on each access
    pub fn all_tasks(&self) -> TaskView {
        TaskView::new(self.clone(), Vec::new())
    }

    /// Tasks filed under `status`, re-read on each access
    pub fn tasks_by_status(&self, status: impl Into<TaskStatus>) -> TaskView {
        let status = status.into();
        TaskView::new(self.clone(), vec![Filter::status_eq(&status)])
    }

    /// Tasks matching arbitrary filters, re-read on each access
    pub fn view(&self, filters: Vec<Filter>) -> TaskView {
        TaskView::new(self.clone(), filters)
    }

    /// Number of tasks filed under `status`, re-counted on each access
    pub fn task_count(&self, status: impl Into<TaskStatus>) -> TaskCount {
        TaskCount {
            view: self.tasks_by_status(status),
        }
    }

    /// Per-column counts in column order
    pub fn counts(&self) -> Vec<(Column, usize)> {
        self.inner
            .columns
            .iter()
            .map(|c| (c.clone(), self.count(&[Filter::status_eq(&c.id)])))
            .collect()
    }

    /// Tasks whose status matches no configured column
    pub fn unassigned(&self) -> Vec<Task> {
        self.inner
            .tasks
            .borrow()
            .iter()
            .filter(|t| !self.is_known_status(&t.status))
            .cloned()
            .collect()
    }

    // ========================================================================
    // Checked mutations
    // ========================================================================

    /// `add_task`, rejecting unknown statuses when the board is strict
    pub fn add_task_checked(&self, new_task: NewTask) -> Result<Task> {
        self.check_status(&new_task.status)?;
        Ok(self.add_task(new_task))
    }

    /// `update_task`, rejecting unknown statuses when the board is strict
    ///
    /// A missing id is still `Ok(None)`; only the status check can fail.
    pub fn update_task_checked(&self, id: &str, patch: TaskPatch) -> Result<Option<Task>> {
        if let Some(status) = &patch.status {
            self.check_status(status)?;
        }
        Ok(self.update_task(id, patch))
    }

    /// `move_task`, rejecting unknown statuses when the board is strict
    pub fn move_task_checked(&self, id: &str, status: impl Into<TaskStatus>) -> Result<Option<Task>> {
        self.update_task_checked(id, TaskPatch::new().status(status))
    }

    fn check_status(&self, status: &TaskStatus) -> Result<()> {
        match self.inner.validation {
            StatusValidation::Permissive => Ok(()),
            StatusValidation::Strict if self.is_known_status(status) => Ok(()),
            StatusValidation::Strict => {
                let known: Vec<&str> = self.inner.columns.iter().map(|c| c.id.as_str()).collect();
                Err(eyre!("Unknown status: {} (expected one of: {})", status, known.join(", ")))
            }
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("columns", &self.inner.columns)
            .field("validation", &self.inner.validation)
            .field("tasks", &self.len())
            .finish()
    }
}

/// A query over the store that is re-evaluated on every read
#[derive(Debug, Clone)]
pub struct TaskView {
    store: Store,
    filters: Vec<Filter>,
}

impl TaskView {
    fn new(store: Store, filters: Vec<Filter>) -> Self {
        Self { store, filters }
    }

    /// Current matching tasks, in insertion order
    pub fn get(&self) -> Vec<Task> {
        self.store.list(&self.filters)
    }

    pub fn len(&self) -> usize {
        self.store.count(&self.filters)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }
}

/// A task count that is re-evaluated on every read
#[derive(Debug, Clone)]
pub struct TaskCount {
    view: TaskView,
}

impl TaskCount {
    pub fn get(&self) -> usize {
        self.view.len()
    }
}

fn generate_id() -> String {
    format!("{}{}", ID_PREFIX, uuid::Uuid::now_v7())
}
