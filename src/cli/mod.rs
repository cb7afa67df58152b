//! Command-line interface for recently
//!
//! # Commands
//!
//! - `run` - Pick an argument set, fill in its placeholders and run it
//! - `session` - Keep running argument sets with shared recency until dismissed
//! - `list` - Show the configured argument sets
//! - `init` - Write an example settings file
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug output
//! - `--quiet` - Only report errors
//! - `--config <PATH>` - Use a specific settings file (or `RECENTLY_CONFIG`)
//!
//! # Examples
//!
//! ```bash
//! recently init
//! recently run
//! recently run --set grep --dry-run
//! recently run --bundle '{"command": "echo", "args": ["${recently:word}"]}'
//! recently --verbose session
//! recently list --format json
//! ```

mod init;
mod list;
mod run;
mod session;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::constants::CONFIG_ENV_VAR;

pub use init::InitCommand;
pub use list::{ListCommand, OutputFormat};
pub use run::RunCommand;
pub use session::SessionCommand;

/// Runtime configuration derived from the global flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Log filter directive; `None` defers to `RUST_LOG`
    pub log_level: Option<String>,
    /// Explicit settings file
    pub config_path: Option<String>,
}

impl CliConfig {
    /// Create a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The log filter to install: the explicit level, else `RUST_LOG`, else `warn`.
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        match &self.log_level {
            Some(level) => EnvFilter::new(level),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        }
    }

    /// Install the global tracing subscriber writing to stderr.
    ///
    /// Does nothing if a subscriber is already installed.
    pub fn init_tracing(&self) {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(self.env_filter())
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    /// Load the settings selected by `config_path` or discovery.
    ///
    /// # Errors
    ///
    /// Returns an error if the selected settings file cannot be loaded.
    pub async fn load_settings(&self) -> Result<Settings> {
        Settings::discover(self.config_path.as_deref()).await
    }
}

/// Recently-used pickers for templated command arguments.
#[derive(Parser, Debug)]
#[command(
    name = "recently",
    about = "Run commands whose arguments come from recently-used pickers",
    version,
    long_about = "recently runs configured argument sets. Every ${recently:<name>} placeholder \
                  in an argument set opens a picker that remembers and floats your latest choices."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the settings file
    ///
    /// Defaults to recently.toml or recently.json in the current directory or
    /// a parent, then ~/.recently/config.toml.
    #[arg(short, long, global = true, env = CONFIG_ENV_VAR)]
    config: Option<String>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pick an argument set, resolve its placeholders and run it
    Run(RunCommand),

    /// Run argument sets repeatedly with shared recency until dismissed
    Session(SessionCommand),

    /// List the configured argument sets
    List(ListCommand),

    /// Write an example settings file
    Init(InitCommand),
}

impl Cli {
    /// Execute the CLI with configuration built from the parsed flags.
    ///
    /// # Errors
    ///
    /// Returns the subcommand's error for display by `main`.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Build a [`CliConfig`] from the global flags.
    ///
    /// `--verbose` selects `debug`, `--quiet` selects `error`; otherwise
    /// `RUST_LOG` applies.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    /// Execute the CLI with a specific configuration.
    ///
    /// # Errors
    ///
    /// Returns the subcommand's error for display by `main`.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        match self.command {
            Commands::Run(cmd) => cmd.execute(&config).await,
            Commands::Session(cmd) => cmd.execute(&config).await,
            Commands::List(cmd) => cmd.execute(&config).await,
            Commands::Init(cmd) => cmd.execute().await,
        }
    }
}
