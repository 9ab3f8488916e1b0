// tasklist - Local task list management backed by a single JSON slot

pub mod filter;
pub mod models;
pub mod storage;
pub mod store;

// Re-export main types for convenience
pub use filter::{FilterMode, Query};
pub use models::{Stats, Task};
pub use storage::{TaskFile, TaskStorage};
pub use store::TaskStore;
