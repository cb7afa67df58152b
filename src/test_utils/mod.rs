//! Test utilities for recently
//!
//! Scripted stand-ins for every host seam, so picker, template and action
//! flows can be exercised without a terminal or spawned processes:
//!
//! - [`ScriptedUi`] replays a queue of [`UiStep`]s and records what it was shown
//! - [`RecordingInvoker`] records commands instead of running them
//! - [`MemoryConfig`] serves settings from an in-memory JSON value
//!
//! # Example
//!
//! ```rust,no_run
//! use recently_cli::picker::{FixedSet, Picker};
//! use recently_cli::test_utils::{ScriptedUi, UiStep};
//! use serde_json::json;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let ui = ScriptedUi::new([UiStep::Pick("b".to_string())]);
//! let mut picker = Picker::new(FixedSet);
//! let picked = picker.pick_item(Some(&json!({ "a": "A", "b": "B" })), &ui).await?;
//! assert_eq!(picked.as_deref(), Some("b"));
//! assert_eq!(ui.shown(), vec![vec!["a".to_string(), "b".to_string()]]);
//! # Ok(())
//! # }
//! ```

use anyhow::Result;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Mutex, Once};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::ConfigSource;
use crate::core::RecentlyError;
use crate::interaction::{Chooser, ChooserOptions, TextPrompt, TextPromptOptions};
use crate::invoker::CommandInvoker;
use crate::picker::Candidate;
use crate::utils::value::get_path;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Installs the tracing subscriber at most once per test binary. Uses the
/// provided level, or `RUST_LOG` when no level is given. Without either,
/// logging stays off.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}

/// One scripted user reaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiStep {
    /// Choose the candidate whose key equals the string
    Pick(String),
    /// Dismiss the candidate list
    Dismiss,
    /// Type the string into the text prompt
    Type(String),
    /// Dismiss the text prompt
    CancelText,
}

#[derive(Debug, Default)]
struct Script {
    steps: VecDeque<UiStep>,
    shown: Vec<Vec<String>>,
    chooser_options: Vec<ChooserOptions>,
    prompts: Vec<TextPromptOptions>,
}

/// Interaction double that replays [`UiStep`]s in order.
///
/// Panics when the flow asks for an interaction the script does not expect,
/// which fails the calling test with a readable message.
#[derive(Debug, Default)]
pub struct ScriptedUi {
    script: Mutex<Script>,
}

impl ScriptedUi {
    /// Create a UI that will replay `steps`.
    pub fn new(steps: impl IntoIterator<Item = UiStep>) -> Self {
        Self {
            script: Mutex::new(Script {
                steps: steps.into_iter().collect(),
                ..Script::default()
            }),
        }
    }

    /// Candidate keys of every list shown so far, in presentation order.
    pub fn shown(&self) -> Vec<Vec<String>> {
        self.script.lock().unwrap().shown.clone()
    }

    /// Options of every list shown so far.
    pub fn chooser_options(&self) -> Vec<ChooserOptions> {
        self.script.lock().unwrap().chooser_options.clone()
    }

    /// Options of every text prompt shown so far.
    pub fn prompts(&self) -> Vec<TextPromptOptions> {
        self.script.lock().unwrap().prompts.clone()
    }

    /// Steps that have not been consumed yet.
    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap().steps.len()
    }
}

impl Chooser for ScriptedUi {
    async fn choose(
        &self,
        candidates: &[Candidate],
        options: &ChooserOptions,
    ) -> Result<Option<usize>> {
        let mut script = self.script.lock().unwrap();
        let keys: Vec<String> = candidates.iter().map(|c| c.key.clone()).collect();
        script.shown.push(keys.clone());
        script.chooser_options.push(options.clone());

        match script.steps.pop_front() {
            Some(UiStep::Pick(key)) => {
                let index = keys
                    .iter()
                    .position(|k| *k == key)
                    .unwrap_or_else(|| panic!("scripted pick '{key}' not among {keys:?}"));
                Ok(Some(index))
            }
            Some(UiStep::Dismiss) => Ok(None),
            other => panic!("expected a pick or dismissal for {keys:?}, script has {other:?}"),
        }
    }
}

impl TextPrompt for ScriptedUi {
    async fn prompt_text(&self, options: &TextPromptOptions) -> Result<Option<String>> {
        let mut script = self.script.lock().unwrap();
        script.prompts.push(options.clone());

        match script.steps.pop_front() {
            Some(UiStep::Type(text)) => Ok(Some(text)),
            Some(UiStep::CancelText) => Ok(None),
            other => panic!("expected typed text for {options:?}, script has {other:?}"),
        }
    }
}

/// Invoker double that records every call.
#[derive(Debug, Default)]
pub struct RecordingInvoker {
    calls: Mutex<Vec<(String, Value)>>,
    fail_with_status: Option<String>,
}

impl RecordingInvoker {
    /// Create an invoker that records calls and succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an invoker that records calls and then reports a failed command.
    pub fn failing(status: impl Into<String>) -> Self {
        Self {
            calls: Mutex::default(),
            fail_with_status: Some(status.into()),
        }
    }

    /// Every `(command, argument)` pair received so far.
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandInvoker for RecordingInvoker {
    async fn invoke(&self, command: &str, argument: &Value) -> Result<()> {
        self.calls.lock().unwrap().push((command.to_string(), argument.clone()));
        match &self.fail_with_status {
            Some(status) => Err(RecentlyError::CommandFailed {
                command: command.to_string(),
                status: status.clone(),
            }
            .into()),
            None => Ok(()),
        }
    }
}

/// Settings served from an in-memory JSON value.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfig {
    root: Value,
}

impl MemoryConfig {
    /// Serve `root` as the settings document.
    pub const fn new(root: Value) -> Self {
        Self {
            root,
        }
    }
}

impl ConfigSource for MemoryConfig {
    fn get(&self, setting_path: &str) -> Option<Value> {
        get_path(&self.root, setting_path).cloned()
    }
}
