// Query projection over the task collection

use crate::models::Task;

/// Which tasks a query admits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterMode {
    #[default]
    All,
    Active,
    Completed,
}

impl FilterMode {
    pub fn admits(self, task: &Task) -> bool {
        match self {
            FilterMode::All => true,
            FilterMode::Active => !task.completed,
            FilterMode::Completed => task.completed,
        }
    }
}

impl std::str::FromStr for FilterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(FilterMode::All),
            "active" => Ok(FilterMode::Active),
            "completed" => Ok(FilterMode::Completed),
            other => Err(format!(
                "unknown filter mode '{}' (expected all, active or completed)",
                other
            )),
        }
    }
}

impl std::fmt::Display for FilterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterMode::All => write!(f, "all"),
            FilterMode::Active => write!(f, "active"),
            FilterMode::Completed => write!(f, "completed"),
        }
    }
}

/// A pure projection over the collection: filter mode plus case-insensitive
/// substring search on task names. Never mutates anything.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub mode: FilterMode,
    pub search: String,
}

impl Query {
    pub fn new(mode: FilterMode, search: impl Into<String>) -> Self {
        Self {
            mode,
            search: search.into(),
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.mode.admits(task)
            && task
                .name
                .to_lowercase()
                .contains(&self.search.to_lowercase())
    }
}
