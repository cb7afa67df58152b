//! Error handling for recently
//!
//! Picker and template code never treats a dismissed prompt as an error: a
//! cancellation is an `Ok(None)` that every layer propagates. The types in
//! this module cover everything else, the host-side failures that can happen
//! around an activation:
//!
//! - [`RecentlyError`] - enumerated failure kinds (settings files, terminal
//!   prompts, spawned commands)
//! - [`ErrorContext`] - wrapper that adds a user-facing suggestion and details
//! - [`user_friendly_error`] - converts any [`anyhow::Error`] into an
//!   [`ErrorContext`] for display by the CLI
//!
//! # Examples
//!
//! ```rust,no_run
//! use recently_cli::core::{RecentlyError, user_friendly_error};
//!
//! let err = anyhow::Error::from(RecentlyError::CommandNotFound {
//!     command: "rg".to_string(),
//! });
//! user_friendly_error(err).display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for recently operations
///
/// # Error Categories
///
/// ## Settings
/// - [`ConfigNotFound`] - an explicitly requested settings file is missing
/// - [`ConfigParseError`] - a settings file has invalid TOML/JSON syntax
/// - [`InvalidConfig`] - a settings value has an unusable shape where the
///   host (not the picker) needs it, such as `--bundle` input
///
/// ## Host interaction
/// - [`PromptFailed`] - the terminal could not show a picker or text prompt
/// - [`CommandNotFound`] - the program named by a bundle is not on `PATH`
/// - [`CommandFailed`] - the spawned program exited unsuccessfully
///
/// [`ConfigNotFound`]: RecentlyError::ConfigNotFound
/// [`ConfigParseError`]: RecentlyError::ConfigParseError
/// [`InvalidConfig`]: RecentlyError::InvalidConfig
/// [`PromptFailed`]: RecentlyError::PromptFailed
/// [`CommandNotFound`]: RecentlyError::CommandNotFound
/// [`CommandFailed`]: RecentlyError::CommandFailed
#[derive(Error, Debug)]
pub enum RecentlyError {
    /// Settings file not found
    #[error("Settings file not found: {path}")]
    ConfigNotFound {
        /// Path to the settings file that was requested
        path: String,
    },

    /// Settings file could not be parsed
    #[error("Invalid settings file syntax in {file}")]
    ConfigParseError {
        /// Path to the settings file that failed to parse
        file: String,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// Settings value has an unusable shape
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Why the value was rejected
        reason: String,
    },

    /// Terminal prompt failed
    ///
    /// Raised when the interactive picker or input box cannot be shown, most
    /// commonly because stdin/stderr is not attached to a terminal.
    #[error("Interactive prompt failed: {reason}")]
    PromptFailed {
        /// Underlying terminal error
        reason: String,
    },

    /// Command executable not found
    #[error("Command '{command}' was not found in PATH")]
    CommandNotFound {
        /// Program name taken from the argument bundle
        command: String,
    },

    /// Command exited unsuccessfully
    #[error("Command '{command}' failed with {status}")]
    CommandFailed {
        /// Program name taken from the argument bundle
        command: String,
        /// Exit status description
        status: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl From<dialoguer::Error> for RecentlyError {
    fn from(error: dialoguer::Error) -> Self {
        Self::PromptFailed {
            reason: error.to_string(),
        }
    }
}

/// Error wrapper carrying a suggestion and extra details for CLI display
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: RecentlyError,
    /// Actionable hint shown to the user
    pub suggestion: Option<String>,
    /// Extra explanation of the failure
    pub details: Option<String>,
}

impl ErrorContext {
    /// Wrap an error without suggestion or details.
    #[must_use]
    pub const fn new(error: RecentlyError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Attach a suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach details.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into a user-friendly [`ErrorContext`].
///
/// Known [`RecentlyError`] variants get tailored suggestions, and bare
/// permission errors get a hint. Everything else is reported with its full
/// cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(recently_error) = error.downcast_ref::<RecentlyError>() {
        return create_error_context(recently_error);
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        if io_error.kind() == std::io::ErrorKind::PermissionDenied {
            return ErrorContext::new(RecentlyError::Other {
                message: chain_message(&error),
            })
            .with_suggestion("Check the permissions of the settings file and its directory");
        }
    }

    ErrorContext::new(RecentlyError::Other {
        message: chain_message(&error),
    })
}

fn chain_message(error: &anyhow::Error) -> String {
    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }
    message
}

fn create_error_context(error: &RecentlyError) -> ErrorContext {
    match error {
        RecentlyError::ConfigNotFound {
            path,
        } => ErrorContext::new(RecentlyError::ConfigNotFound {
            path: path.clone(),
        })
        .with_suggestion("Run 'recently init' to create an example settings file, or fix the --config path")
        .with_details(
            "Without --config, recently searches for recently.toml upward from the current directory, then ~/.recently/config.toml",
        ),

        RecentlyError::ConfigParseError {
            file,
            reason,
        } => ErrorContext::new(RecentlyError::ConfigParseError {
            file: file.clone(),
            reason: reason.clone(),
        })
        .with_suggestion(format!("Check the syntax in {file}. Common issues: missing quotes, unmatched brackets"))
        .with_details(reason.clone()),

        RecentlyError::PromptFailed {
            reason,
        } => ErrorContext::new(RecentlyError::PromptFailed {
            reason: reason.clone(),
        })
        .with_suggestion("Run recently from an interactive terminal, or pass --bundle with a fully resolved bundle")
        .with_details("Pickers and text prompts need a TTY on stdin and stderr"),

        RecentlyError::CommandNotFound {
            command,
        } => ErrorContext::new(RecentlyError::CommandNotFound {
            command: command.clone(),
        })
        .with_suggestion(format!("Install '{command}' or fix the 'command' field of the argument bundle"))
        .with_details("Use --dry-run to print the resolved command without executing it"),

        RecentlyError::CommandFailed {
            command,
            status,
        } => ErrorContext::new(RecentlyError::CommandFailed {
            command: command.clone(),
            status: status.clone(),
        })
        .with_details("The command ran but reported failure; its own output above explains why"),

        RecentlyError::InvalidConfig {
            reason,
        } => ErrorContext::new(RecentlyError::InvalidConfig {
            reason: reason.clone(),
        })
        .with_suggestion("An argument bundle is an object with a 'command' string and an 'args' value"),

        RecentlyError::IoError(io_error) => ErrorContext::new(RecentlyError::Other {
            message: format!("IO error: {io_error}"),
        })
        .with_suggestion("Check that the settings path is a readable file"),

        other => ErrorContext::new(RecentlyError::Other {
            message: other.to_string(),
        }),
    }
}
