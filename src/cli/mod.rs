//! # Command-Line Interface
//!
//! User-facing commands and output formatting. Every command opens the task
//! file, calls one [`TaskManager`](crate::storage::TaskManager) operation,
//! and prints the result.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `add` | Validate and add a task |
//! | `list` | Pending tasks by priority or `--by due` |
//! | `next` | The task to work on next |
//! | `done` | Remove every task with a given name |
//! | `menu` | Interactive numbered menu |
//!
//! ## Output Formats
//!
//! All commands support `--format`:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod task;
mod menu;

pub use app::{Cli, Commands, run};
pub use menu::run_menu;
pub use output::{Output, OutputFormat};
pub use task::SortKey;
