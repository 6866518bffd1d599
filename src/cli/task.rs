//! Task CLI commands

use anyhow::Result;

use super::output::Output;
use crate::domain::{parse_dependency_list, Task};
use crate::storage::{TaskManager, TaskPersistence};

pub(crate) const EMPTY_MESSAGE: &str = "No pending tasks.";

/// Sort order for `list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SortKey {
    /// Priority, then due date
    #[default]
    Priority,
    /// Due date only
    Due,
}

pub fn add<P: TaskPersistence>(
    manager: &mut TaskManager<P>,
    output: &Output,
    name: &str,
    priority: &str,
    due: &str,
    deps: &str,
) -> Result<()> {
    let task = manager.add_task(name, priority, due, &parse_dependency_list(deps))?;

    output.emit(&task, || added_message(&task))
}

pub fn list<P: TaskPersistence>(
    manager: &TaskManager<P>,
    output: &Output,
    by: SortKey,
) -> Result<()> {
    let tasks = match by {
        SortKey::Priority => manager.list_by_priority(),
        SortKey::Due => manager.list_by_due_date(),
    };

    output.emit(&tasks, || render_list(&tasks, by))
}

pub fn next<P: TaskPersistence>(manager: &TaskManager<P>, output: &Output) -> Result<()> {
    let next = manager.peek_next();

    output.emit(&next, || render_next(next))
}

pub fn done<P: TaskPersistence>(
    manager: &mut TaskManager<P>,
    output: &Output,
    name: &str,
) -> Result<()> {
    let removed = manager.complete_task(name)?;

    let summary = serde_json::json!({
        "name": name,
        "removed": removed,
    });
    output.emit(&summary, || completed_message(name, removed))
}

pub(crate) fn added_message(task: &Task) -> String {
    format!(
        "Added task '{}' with priority {} due {}.",
        task.name, task.priority, task.due_date
    )
}

pub(crate) fn completed_message(name: &str, removed: usize) -> String {
    format!("Completed '{}' ({} task(s) removed).", name, removed)
}

/// Renders a listing, one task per line, or the empty message
pub(crate) fn render_list(tasks: &[Task], by: SortKey) -> String {
    if tasks.is_empty() {
        return format!("{}\n", EMPTY_MESSAGE);
    }

    let heading = match by {
        SortKey::Priority => "Pending tasks (by priority):",
        SortKey::Due => "Pending tasks (by due date):",
    };

    let mut out = format!("{}\n", heading);
    for task in tasks {
        let line = match by {
            SortKey::Priority => format!("  - {}\n", task),
            SortKey::Due => format!(
                "  - {} (due: {}, priority: {}, depends on: {})\n",
                task.name,
                task.due_date,
                task.priority,
                task.dependency_summary().as_deref().unwrap_or("none")
            ),
        };
        out.push_str(&line);
    }
    out
}

pub(crate) fn render_next(task: Option<&Task>) -> String {
    match task {
        Some(task) => format!("Next task: {}\n", task),
        None => format!("{}\n", EMPTY_MESSAGE),
    }
}
