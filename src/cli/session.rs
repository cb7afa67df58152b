//! Run argument sets repeatedly in one process.

use anyhow::Result;
use clap::Args;
use tracing::{debug, warn};

use super::CliConfig;
use crate::action::ArgumentsAction;
use crate::config::Settings;
use crate::core::{RecentlyError, user_friendly_error};
use crate::interaction::{Interaction, TerminalUi};
use crate::invoker::{CommandInvoker, PrintInvoker, ProcessInvoker};

/// Keep offering the argument-set picker until it is dismissed.
///
/// All activations share one set of pickers, so recent choices float to the
/// top for the rest of the session. A command that exits unsuccessfully is
/// reported and the session continues.
#[derive(Args, Debug)]
pub struct SessionCommand {
    /// Print commands and resolved arguments instead of running them
    #[arg(long)]
    pub(crate) dry_run: bool,
}

impl SessionCommand {
    /// Execute the session command.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be loaded or a prompt cannot
    /// be shown.
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let settings = config.load_settings().await?;
        let ui = TerminalUi::new();
        let mut action = ArgumentsAction::new();

        let runs = if self.dry_run {
            run_session(&mut action, &settings, &ui, &PrintInvoker::stdout()).await?
        } else {
            run_session(&mut action, &settings, &ui, &ProcessInvoker::new()).await?
        };
        debug!("Session ended after {} activations", runs);
        Ok(())
    }
}

/// Loop over activations until the argument-set picker is dismissed.
///
/// Returns the number of argument sets chosen.
///
/// # Errors
///
/// Propagates every failure except unsuccessful command exits.
pub async fn run_session<U, I>(
    action: &mut ArgumentsAction,
    settings: &Settings,
    ui: &U,
    invoker: &I,
) -> Result<usize>
where
    U: Interaction,
    I: CommandInvoker,
{
    let mut runs = 0;
    while let Some(name) = action.pick_set(settings, ui).await? {
        runs += 1;
        match action.activate_named(&name, settings, ui, invoker).await {
            Ok(outcome) => debug!("Activation of '{}' finished: {:?}", name, outcome),
            Err(e) if matches!(
                e.downcast_ref::<RecentlyError>(),
                Some(RecentlyError::CommandFailed { .. })
            ) =>
            {
                warn!("Argument set '{}' failed", name);
                user_friendly_error(e).display();
            }
            Err(e) => return Err(e),
        }
    }
    Ok(runs)
}
