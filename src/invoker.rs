//! Command invocation for resolved argument bundles
//!
//! Once every placeholder of a bundle's `args` is resolved, the action hands
//! the command name and the resolved value to a [`CommandInvoker`]:
//!
//! - [`ProcessInvoker`] spawns the program with `tokio::process`
//! - [`PrintInvoker`] writes what would run (`--dry-run`)

use anyhow::{Context, Result};
use serde_json::Value;
use std::future::Future;
use std::io::Write;
use std::sync::Mutex;
use tokio::process::Command;
use tracing::debug;

use crate::core::RecentlyError;

/// Executes a named command with a resolved argument value.
pub trait CommandInvoker {
    /// Run `command` with `argument`.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be started or reports failure.
    fn invoke(&self, command: &str, argument: &Value) -> impl Future<Output = Result<()>> + Send;
}

/// Convert a resolved argument value into a process argument vector.
///
/// - a string is a single argument
/// - an array is one argument per element; strings are passed raw, other
///   elements as compact JSON
/// - `null` is no arguments
/// - anything else is a single JSON argument
#[must_use]
pub fn argv_from_value(argument: &Value) -> Vec<String> {
    match argument {
        Value::Null => Vec::new(),
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        other => vec![other.to_string()],
    }
}

/// Spawns the command as a child process with inherited stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessInvoker;

impl ProcessInvoker {
    /// Create a process invoker.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl CommandInvoker for ProcessInvoker {
    async fn invoke(&self, command: &str, argument: &Value) -> Result<()> {
        let program = which::which(command).map_err(|_| RecentlyError::CommandNotFound {
            command: command.to_string(),
        })?;
        let argv = argv_from_value(argument);
        debug!("Running {} {:?}", program.display(), argv);

        let status = Command::new(&program)
            .args(&argv)
            .status()
            .await
            .with_context(|| format!("Failed to execute {}", program.display()))?;

        if !status.success() {
            return Err(RecentlyError::CommandFailed {
                command: command.to_string(),
                status: status.to_string(),
            }
            .into());
        }
        Ok(())
    }
}

/// Writes the command and its pretty-printed argument instead of running it.
#[derive(Debug)]
pub struct PrintInvoker<W> {
    out: Mutex<W>,
}

impl PrintInvoker<std::io::Stdout> {
    /// Print to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> PrintInvoker<W> {
    /// Print to `out`.
    pub const fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Recover the writer.
    ///
    /// # Errors
    ///
    /// Returns an error if a previous write panicked while holding the writer.
    pub fn into_inner(self) -> Result<W> {
        self.out.into_inner().map_err(|_| anyhow::anyhow!("Output writer lock was poisoned"))
    }
}

impl<W: Write + Send> CommandInvoker for PrintInvoker<W> {
    async fn invoke(&self, command: &str, argument: &Value) -> Result<()> {
        let pretty = serde_json::to_string_pretty(argument).map_err(RecentlyError::from)?;
        let mut out =
            self.out.lock().map_err(|_| anyhow::anyhow!("Output writer lock was poisoned"))?;
        writeln!(out, "{command}").context("Failed to write command")?;
        writeln!(out, "{pretty}").context("Failed to write arguments")?;
        out.flush().context("Failed to flush output")?;
        Ok(())
    }
}
