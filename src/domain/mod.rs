//! Domain models for the task manager
//!
//! Contains the task entity, input validation, and the priority queue,
//! without any I/O concerns.

mod task;
mod validate;
mod queue;

pub use task::{Task, TaskKey};
pub use validate::{
    build_task, parse_dependency_list, parse_iso_date, validate_dependencies, validate_due_date,
    validate_name, validate_priority, InvalidInput, DUE_DATE_FORMAT,
};
pub use queue::TaskQueue;
