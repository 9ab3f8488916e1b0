// Data models for the task list

use serde::{Deserialize, Serialize};

/// A single to-do item
///
/// Serialized field names match the persisted slot layout: `dueDate` is
/// omitted entirely when no due date is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub name: String,
    pub completed: bool,
    #[serde(rename = "dueDate", default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

/// Derived counts over the task collection
///
/// `active + completed == total` holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub active: usize,
    pub completed: usize,
    pub total: usize,
}
