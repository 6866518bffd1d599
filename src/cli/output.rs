//! Output formatting for CLI commands

use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::storage;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl From<storage::OutputFormat> for OutputFormat {
    fn from(format: storage::OutputFormat) -> Self {
        match format {
            storage::OutputFormat::Text => OutputFormat::Text,
            storage::OutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Prints a command result to stdout: `data` as one JSON line, or the
    /// rendered text
    pub fn emit<T: Serialize>(&self, data: &T, text: impl FnOnce() -> String) -> Result<()> {
        let stdout = io::stdout();
        self.emit_to(&mut stdout.lock(), data, text)
    }

    /// Same as [`Output::emit`], writing to `out`
    pub fn emit_to<W: Write, T: Serialize>(
        &self,
        out: &mut W,
        data: &T,
        text: impl FnOnce() -> String,
    ) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                writeln!(out, "{}", text().trim_end_matches('\n')).context("Failed to write output")
            }
            OutputFormat::Json => {
                let json = serde_json::to_string(data).context("Failed to serialize output")?;
                writeln!(out, "{}", json).context("Failed to write output")
            }
        }
    }
}
