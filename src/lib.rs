//! Taskheap - a single-user task manager
//!
//! Tasks carry a priority, a due date, and dependency labels. They are kept
//! in a min-heap ordered by `(priority, due_date)`, saved to a JSON file
//! after every change, and can be listed by priority or by due date.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{InvalidInput, Task, TaskQueue};
pub use storage::{JsonTaskFile, MemoryStore, TaskError, TaskManager, TaskPersistence};
