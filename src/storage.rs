// Single-slot JSON persistence for the task collection

use crate::models::Task;
use eyre::{Context, Result};
use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Persistence contract consumed by the store
///
/// `load` is forgiving: missing, unreadable or malformed state comes back as
/// an empty collection, never an error. `save` replaces the whole slot with
/// the given collection.
pub trait TaskStorage {
    fn load(&self) -> Vec<Task>;
    fn save(&self, tasks: &[Task]) -> Result<()>;
}

/// File-backed slot holding the serialized task array
#[derive(Debug, Clone)]
pub struct TaskFile {
    path: PathBuf,
}

impl TaskFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TaskStorage for TaskFile {
    fn load(&self) -> Vec<Task> {
        if !self.path.exists() {
            return Vec::new();
        }

        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) => {
                warn!(file = ?self.path, error = ?e, "Failed to read task file, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Task>>(&data) {
            Ok(tasks) => {
                debug!(file = ?self.path, count = tasks.len(), "Loaded task collection");
                tasks
            }
            Err(e) => {
                warn!(file = ?self.path, error = ?e, "Task file is malformed, treating as empty");
                Vec::new()
            }
        }
    }

    fn save(&self, tasks: &[Task]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).context("Failed to create store directory")?;
            }
        }

        // Hold an exclusive lock on the slot while swapping in the new content
        let slot = OpenOptions::new()
            .create(true)
            .write(true)
            .open(&self.path)
            .context("Failed to open task file")?;
        slot.lock_exclusive().context("Failed to acquire file lock")?;

        let json = serde_json::to_string_pretty(tasks)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        debug!(file = ?self.path, count = tasks.len(), "Saved task collection");

        // Lock is released when slot is dropped
        Ok(())
    }
}
