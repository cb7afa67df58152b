//! Run a single argument set.

use anyhow::Result;
use clap::Args;
use serde_json::Value;
use tracing::debug;

use super::CliConfig;
use crate::action::{Activation, ArgumentsAction};
use crate::config::Settings;
use crate::core::RecentlyError;
use crate::interaction::{Interaction, TerminalUi};
use crate::invoker::{CommandInvoker, PrintInvoker, ProcessInvoker};

/// Pick an argument set, resolve its placeholders and run it.
///
/// # Examples
///
/// ```bash
/// recently run                       # choose from [arguments]
/// recently run --set grep            # skip the argument-set picker
/// recently run --bundle '{"command": "echo", "args": ["${recently:word}"]}'
/// recently run --dry-run             # print instead of running
/// ```
#[derive(Args, Debug)]
pub struct RunCommand {
    /// Argument bundle as JSON, used instead of the configured sets
    #[arg(long, conflicts_with = "set")]
    pub(crate) bundle: Option<String>,

    /// Name of a configured argument set to run without picking
    #[arg(long)]
    pub(crate) set: Option<String>,

    /// Print the command and resolved arguments instead of running them
    #[arg(long)]
    pub(crate) dry_run: bool,
}

impl RunCommand {
    /// Execute the run command.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings or `--bundle` cannot be parsed, a
    /// prompt cannot be shown, or the command fails.
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let settings = config.load_settings().await?;
        let ui = TerminalUi::new();
        let mut action = ArgumentsAction::new();

        let outcome = if self.dry_run {
            self.activate(&mut action, &settings, &ui, &PrintInvoker::stdout()).await?
        } else {
            self.activate(&mut action, &settings, &ui, &ProcessInvoker::new()).await?
        };

        if outcome == Activation::Cancelled {
            debug!("Nothing was run");
        }
        Ok(())
    }

    /// Run one activation according to the flags.
    ///
    /// # Errors
    ///
    /// See [`RunCommand::execute`].
    pub async fn activate<U, I>(
        &self,
        action: &mut ArgumentsAction,
        settings: &Settings,
        ui: &U,
        invoker: &I,
    ) -> Result<Activation>
    where
        U: Interaction,
        I: CommandInvoker,
    {
        if let Some(name) = &self.set {
            return action.activate_named(name, settings, ui, invoker).await;
        }
        let bundle = self.bundle.as_deref().map(parse_bundle).transpose()?;
        action.activate(bundle, settings, ui, invoker).await
    }
}

/// Parse the `--bundle` JSON text.
///
/// # Errors
///
/// Returns [`RecentlyError::InvalidConfig`] if the text is not valid JSON.
pub fn parse_bundle(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|e| {
        RecentlyError::InvalidConfig {
            reason: format!("--bundle is not valid JSON: {e}"),
        }
        .into()
    })
}
