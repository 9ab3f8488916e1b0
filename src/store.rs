// Task store: ordered collection with silent no-op mutation semantics

use crate::filter::Query;
use crate::models::{Stats, Task};
use crate::storage::TaskStorage;
use tracing::{debug, warn};

/// Owns the ordered task collection and persists it through the backend
/// after every mutation that changed something.
///
/// Every mutation that references an unknown id or receives an empty name
/// is a silent no-op; nothing here returns an error. A failed save is
/// logged and dropped, the in-memory collection stays authoritative.
pub struct TaskStore<S: TaskStorage> {
    storage: S,
    tasks: Vec<Task>,
    next_id: u64,
    edit_target: Option<u64>,
}

impl<S: TaskStorage> TaskStore<S> {
    /// Load the persisted collection from the given backend
    pub fn open(storage: S) -> Self {
        let tasks = storage.load();
        let next_id = tasks.iter().map(|t| t.id).max().map_or(1, |max| max + 1);
        debug!(count = tasks.len(), next_id, "Opened task store");
        Self {
            storage,
            tasks,
            next_id,
            edit_target: None,
        }
    }

    /// The full collection, in append order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Append a new task and return its id
    ///
    /// An empty or whitespace-only name is dropped silently.
    pub fn add_task(&mut self, name: &str, due_date: Option<&str>) -> Option<u64> {
        if name.trim().is_empty() {
            debug!("add_task: blank name, ignoring");
            return None;
        }

        let id = self.next_id;
        self.next_id += 1;
        self.tasks.push(Task {
            id,
            name: name.to_string(),
            completed: false,
            due_date: normalize_due(due_date),
        });

        debug!(id, "Added task");
        self.persist();
        Some(id)
    }

    /// Replace the name and due date of an existing task
    ///
    /// Completion flag and id are untouched. Unknown id or blank name is a
    /// no-op. Updating the current edit target clears it.
    pub fn update_task(&mut self, id: u64, name: &str, due_date: Option<&str>) -> bool {
        if name.trim().is_empty() {
            debug!(id, "update_task: blank name, ignoring");
            return false;
        }
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            debug!(id, "update_task: no such task");
            return false;
        };

        task.name = name.to_string();
        task.due_date = normalize_due(due_date);
        if self.edit_target == Some(id) {
            self.edit_target = None;
        }

        self.persist();
        true
    }

    /// Remove the task with the given id, if present
    pub fn delete_task(&mut self, id: u64) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            debug!(id, "delete_task: no such task");
            return false;
        }

        if self.edit_target == Some(id) {
            self.edit_target = None;
        }
        self.persist();
        true
    }

    /// Flip the completed flag of the task with the given id, if present
    pub fn toggle_completed(&mut self, id: u64) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            debug!(id, "toggle_completed: no such task");
            return false;
        };

        task.completed = !task.completed;
        self.persist();
        true
    }

    /// Set every task completed
    pub fn mark_all_completed(&mut self) {
        let mut changed = false;
        for task in &mut self.tasks {
            changed |= !task.completed;
            task.completed = true;
        }
        if changed {
            self.persist();
        }
    }

    /// Remove every completed task, returning how many were removed
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        let removed = before - self.tasks.len();
        if removed > 0 {
            if self
                .edit_target
                .is_some_and(|id| !self.tasks.iter().any(|t| t.id == id))
            {
                self.edit_target = None;
            }
            self.persist();
        }
        removed
    }

    /// Mark a task as the edit target and hand it back so the caller can
    /// prefill its input fields. Unknown id leaves the target untouched.
    pub fn begin_edit(&mut self, id: u64) -> Option<&Task> {
        let task = self.tasks.iter().find(|t| t.id == id)?;
        self.edit_target = Some(id);
        Some(task)
    }

    /// Id of the task currently being edited, if any
    pub fn edit_target(&self) -> Option<u64> {
        self.edit_target
    }

    pub fn cancel_edit(&mut self) {
        self.edit_target = None;
    }

    /// Add-or-update entry point: updates the edit target when one is set,
    /// appends a new task otherwise. Returns whether anything changed.
    pub fn submit(&mut self, name: &str, due_date: Option<&str>) -> bool {
        match self.edit_target {
            Some(id) => self.update_task(id, name, due_date),
            None => self.add_task(name, due_date).is_some(),
        }
    }

    /// Pure projection: tasks admitted by the query, in collection order
    pub fn query(&self, query: &Query) -> Vec<&Task> {
        self.tasks.iter().filter(|t| query.matches(t)).collect()
    }

    /// Active / completed / total counts over the full collection
    pub fn stats(&self) -> Stats {
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        Stats {
            active: self.tasks.len() - completed,
            completed,
            total: self.tasks.len(),
        }
    }

    fn persist(&self) {
        if let Err(e) = self.storage.save(&self.tasks) {
            warn!(error = ?e, "Failed to save task collection");
        }
    }
}

fn normalize_due(due_date: Option<&str>) -> Option<String> {
    due_date
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}
