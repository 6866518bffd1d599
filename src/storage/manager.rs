//! Task manager
//!
//! Ties the in-memory [`TaskQueue`] to a [`TaskPersistence`] backend. Every
//! mutation is followed by a full save. This is the whole surface the CLI
//! shell talks to.
//!
//! Not synchronized: callers sharing a manager across threads must hold one
//! lock around each mutation and its save.

use anyhow::Result;
use thiserror::Error;

use super::TaskPersistence;
use crate::domain::{build_task, InvalidInput, Task, TaskQueue};

#[derive(Debug, Error)]
pub enum TaskError {
    #[error(transparent)]
    Invalid(#[from] InvalidInput),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Pending tasks plus the backend they are persisted to
pub struct TaskManager<P: TaskPersistence> {
    queue: TaskQueue,
    persistence: P,
}

impl<P: TaskPersistence> TaskManager<P> {
    /// Loads the stored tasks and opens a manager over them
    pub fn open(persistence: P) -> Result<Self> {
        let queue: TaskQueue = persistence.load()?.into_iter().collect();
        tracing::debug!(count = queue.len(), "task manager opened");
        Ok(Self { queue, persistence })
    }

    /// Validates raw input, inserts the task, and saves
    ///
    /// On invalid input nothing is inserted and nothing is written.
    pub fn add_task<S: AsRef<str>>(
        &mut self,
        name: &str,
        priority: &str,
        due_date: &str,
        dependencies: &[S],
    ) -> Result<Task, TaskError> {
        let task = build_task(name, priority, due_date, dependencies)?;
        self.queue.insert(task.clone());
        tracing::debug!(name = %task.name, priority = task.priority, due = %task.due_date, "task added");
        self.persist()?;
        Ok(task)
    }

    /// All pending tasks by priority, then due date
    pub fn list_by_priority(&self) -> Vec<Task> {
        self.queue.list_by_priority()
    }

    /// All pending tasks by due date
    pub fn list_by_due_date(&self) -> Vec<Task> {
        self.queue.list_by_due_date()
    }

    /// Removes every task named exactly `name`, then saves
    ///
    /// Returns how many tasks were removed; zero is not an error.
    pub fn complete_task(&mut self, name: &str) -> Result<usize> {
        let removed = self.queue.complete(name);
        tracing::debug!(name, removed, "tasks completed");
        self.persist()?;
        Ok(removed)
    }

    /// The task to work on next, if any
    pub fn peek_next(&self) -> Option<&Task> {
        self.queue.peek_next()
    }

    /// Number of pending tasks
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns true if no tasks are pending
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the persistence backend
    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    fn persist(&self) -> Result<()> {
        self.persistence.save(&self.queue.list_by_priority())
    }
}
