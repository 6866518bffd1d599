//! Main CLI application structure

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use super::output::{Output, OutputFormat};
use super::task::SortKey;
use super::{menu, task};
use crate::storage::{Config, JsonTaskFile, TaskManager};

#[derive(Parser)]
#[command(name = "taskheap")]
#[command(author, version, about = "Task manager with priorities, due dates, and dependencies")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Task file (defaults to the configured path, then ./tareas.json)
    #[arg(long, global = true, env = "TASKHEAP_FILE")]
    pub file: Option<PathBuf>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, env = "TASKHEAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format (defaults to the configured format, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task
    ///
    /// Example:
    ///   taskheap add "Write report" --priority 2 --due 2025-03-01 --deps Draft,Review
    Add {
        /// Task name
        name: String,

        /// Priority (integer, lower = more urgent)
        #[arg(long, short, allow_hyphen_values = true)]
        priority: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long, short)]
        due: String,

        /// Comma-separated dependency labels
        #[arg(long, default_value = "")]
        deps: String,
    },

    /// List pending tasks
    List {
        /// Sort order
        #[arg(long, value_enum, default_value_t = SortKey::Priority)]
        by: SortKey,
    },

    /// Show the task to work on next
    Next,

    /// Complete (remove) every task with this exact name
    Done {
        /// Task name
        name: String,
    },

    /// Run the interactive menu
    Menu,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let format = cli.format.unwrap_or_else(|| config.default_format.into());
    let output = Output::new(format);

    let path = config.resolve_store_path(cli.file.as_deref());
    tracing::debug!(path = %path.display(), "using task file");
    let mut manager = TaskManager::open(JsonTaskFile::new(path))?;

    match cli.command {
        Commands::Add {
            name,
            priority,
            due,
            deps,
        } => task::add(&mut manager, &output, &name, &priority, &due, &deps)?,
        Commands::List { by } => task::list(&manager, &output, by)?,
        Commands::Next => task::next(&manager, &output)?,
        Commands::Done { name } => task::done(&mut manager, &output, &name)?,
        Commands::Menu => {
            let stdin = io::stdin();
            menu::run_menu(&mut manager, stdin.lock(), &mut io::stdout())?
        }
    }

    tracing::debug!("command completed");
    Ok(())
}

/// Installs the stderr subscriber; `RUST_LOG` overrides `--verbose`
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "taskheap=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
