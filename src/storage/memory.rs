//! In-memory task storage
//!
//! Keeps the last saved task list in memory. Used by tests, and by callers
//! that embed the manager without a backing file.

use std::cell::{Cell, RefCell};

use anyhow::{bail, Result};

use super::TaskPersistence;
use crate::domain::Task;

#[derive(Debug, Default)]
pub struct MemoryStore {
    tasks: RefCell<Vec<Task>>,
    saves: Cell<usize>,
    read_only: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that loads the given tasks
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: RefCell::new(tasks),
            ..Self::default()
        }
    }

    /// Returns a copy of the last saved task list
    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.borrow().clone()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    /// Makes subsequent saves fail, to exercise write errors
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }
}

impl TaskPersistence for MemoryStore {
    fn load(&self) -> Result<Vec<Task>> {
        Ok(self.snapshot())
    }

    fn save(&self, tasks: &[Task]) -> Result<()> {
        if self.read_only.get() {
            bail!("Task store is read-only");
        }
        *self.tasks.borrow_mut() = tasks.to_vec();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
