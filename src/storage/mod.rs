//! # Storage Layer
//!
//! Persistence for the task list, plus configuration.
//!
//! ## Storage Format
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Tasks | JSON array of `[priority, due_date, task]` | `tareas.json` (configurable) |
//! | Config | TOML | `<config dir>/taskheap/config.toml` |
//!
//! ## Key Types
//!
//! - [`TaskPersistence`] - Load/save contract for a task backend
//! - [`JsonTaskFile`] - File-backed backend (atomic rewrite on save)
//! - [`MemoryStore`] - In-memory backend
//! - [`TaskManager`] - Queue + backend; the operations the CLI calls
//! - [`Config`] - User configuration

mod json;
mod memory;
mod config;
mod manager;

use anyhow::Result;

use crate::domain::Task;

pub use json::{JsonTaskFile, DEFAULT_FILE_NAME};
pub use memory::MemoryStore;
pub use config::{Config, ConfigError, OutputFormat};
pub use manager::{TaskError, TaskManager};

/// Backend that a [`TaskManager`] saves to after every mutation
pub trait TaskPersistence {
    /// Reads every stored task. A backend with nothing stored yields an empty list.
    fn load(&self) -> Result<Vec<Task>>;

    /// Replaces the stored tasks with `tasks`
    fn save(&self, tasks: &[Task]) -> Result<()>;
}
