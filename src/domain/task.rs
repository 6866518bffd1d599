//! Task domain model
//!
//! A task is a named unit of work with an integer priority (lower runs
//! first), a calendar due date, and free-form dependency labels.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A pending task
///
/// Serialized field names match the task file format shared with earlier
/// versions of the tool, so existing `tareas.json` files keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Task {
    /// Trimmed, non-empty name. Not unique.
    #[serde(rename = "nombre")]
    pub name: String,

    /// Lower value = higher priority. Zero and negatives are valid.
    #[serde(rename = "prioridad")]
    pub priority: i64,

    /// Due date, no time component
    #[serde(rename = "fecha_vencimiento")]
    pub due_date: NaiveDate,

    /// Labels of other tasks. Informational only, never resolved.
    #[serde(rename = "dependencias", default)]
    pub dependencies: Vec<String>,
}

impl Task {
    /// Creates a task from already-validated parts
    pub fn new(
        name: impl Into<String>,
        priority: i64,
        due_date: NaiveDate,
        dependencies: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            priority,
            due_date,
            dependencies,
        }
    }

    /// Returns the dependency labels joined for display, or `None` if there are none
    pub fn dependency_summary(&self) -> Option<String> {
        if self.dependencies.is_empty() {
            None
        } else {
            Some(self.dependencies.join(", "))
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (priority: {}, due: {}, depends on: {})",
            self.name,
            self.priority,
            self.due_date,
            self.dependency_summary().as_deref().unwrap_or("none")
        )
    }
}

/// Composite ordering key for the task queue
///
/// Compares by priority, then due date, then insertion sequence. The
/// sequence makes every key distinct so ordering never has to look at the
/// task payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskKey {
    pub priority: i64,
    pub due_date: NaiveDate,
    pub seq: u64,
}

impl TaskKey {
    /// Builds the key for a task inserted at position `seq`
    pub fn for_task(task: &Task, seq: u64) -> Self {
        Self {
            priority: task.priority,
            due_date: task.due_date,
            seq,
        }
    }

    /// Orders by due date alone, falling back to insertion order
    pub fn cmp_by_due_date(&self, other: &Self) -> Ordering {
        self.due_date
            .cmp(&other.due_date)
            .then(self.seq.cmp(&other.seq))
    }
}
