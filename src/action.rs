//! The top-level "run with arguments" action.
//!
//! An activation turns an argument bundle into one command invocation:
//!
//! 1. without a bundle, the user picks one of the named bundles under the
//!    `arguments` setting (recency ordered)
//! 2. the bundle must carry a non-empty `command` and truthy `args`
//! 3. every `${recently:<name>}` placeholder in `args` is resolved through the
//!    picker registry, using the bundle itself as the lookup context
//! 4. the command is invoked with the resolved value
//!
//! Dismissing any picker or prompt ends the activation with
//! [`Activation::Cancelled`]; nothing is invoked and no error is raised.

use anyhow::Result;
use serde_json::Value;
use tracing::debug;

use crate::config::ConfigSource;
use crate::constants::ARGUMENTS_SETTING;
use crate::core::RecentlyError;
use crate::interaction::Interaction;
use crate::invoker::CommandInvoker;
use crate::picker::{FixedSet, Picker, PickerRegistry};
use crate::templating::TemplateResolver;
use crate::utils::value::{get_string, is_truthy};

/// Outcome of one activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// The command was invoked with the resolved argument value
    Invoked {
        /// Command name from the bundle
        command: String,
        /// Fully substituted `args`
        args: Value,
    },
    /// The user dismissed a picker, or the bundle was unusable
    Cancelled,
}

/// Owns the argument-set picker and the placeholder pickers.
///
/// Keep one instance alive to share recency across activations.
#[derive(Debug)]
pub struct ArgumentsAction {
    commands: Picker<FixedSet>,
    registry: PickerRegistry,
}

impl Default for ArgumentsAction {
    fn default() -> Self {
        Self::new()
    }
}

impl ArgumentsAction {
    /// Create an action with empty recency state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Picker::new(FixedSet::new()),
            registry: PickerRegistry::new(),
        }
    }

    /// Picker over the named argument bundles.
    #[must_use]
    pub const fn commands(&self) -> &Picker<FixedSet> {
        &self.commands
    }

    /// Placeholder pickers created so far.
    #[must_use]
    pub const fn registry(&self) -> &PickerRegistry {
        &self.registry
    }

    /// Run one activation.
    ///
    /// With `bundle == None` the user first picks a named bundle from the
    /// `arguments` setting of `config`.
    ///
    /// # Errors
    ///
    /// Returns an error only for host failures (terminal, settings, spawned
    /// command). Cancellation is reported as [`Activation::Cancelled`].
    pub async fn activate<C, U, I>(
        &mut self,
        bundle: Option<Value>,
        config: &C,
        ui: &U,
        invoker: &I,
    ) -> Result<Activation>
    where
        C: ConfigSource,
        U: Interaction,
        I: CommandInvoker,
    {
        let bundle = match bundle {
            Some(bundle) => bundle,
            None => {
                let Some(picked) = self.pick_set(config, ui).await? else {
                    return Ok(Activation::Cancelled);
                };
                match config.get(ARGUMENTS_SETTING).and_then(|a| a.get(&picked).cloned()) {
                    Some(bundle) => bundle,
                    None => return Ok(Activation::Cancelled),
                }
            }
        };

        self.run_bundle(&bundle, ui, invoker).await
    }

    /// Show the argument-set picker and return the chosen set name.
    ///
    /// # Errors
    ///
    /// Propagates failures of the host interaction.
    pub async fn pick_set<C, U>(&mut self, config: &C, ui: &U) -> Result<Option<String>>
    where
        C: ConfigSource,
        U: Interaction,
    {
        let arguments = config.get(ARGUMENTS_SETTING);
        let picked = self.commands.pick_item(arguments.as_ref(), ui).await?;
        if picked.is_none() {
            debug!("No argument set chosen");
        }
        Ok(picked)
    }

    /// Run the bundle stored under `arguments.<name>` without showing the
    /// argument-set picker. The choice still counts as recent.
    ///
    /// # Errors
    ///
    /// Returns [`RecentlyError::InvalidConfig`] if no bundle has that name, and
    /// host failures as for [`ArgumentsAction::activate`].
    pub async fn activate_named<C, U, I>(
        &mut self,
        name: &str,
        config: &C,
        ui: &U,
        invoker: &I,
    ) -> Result<Activation>
    where
        C: ConfigSource,
        U: Interaction,
        I: CommandInvoker,
    {
        let bundle = config
            .get(ARGUMENTS_SETTING)
            .and_then(|arguments| arguments.get(name).cloned())
            .ok_or_else(|| RecentlyError::InvalidConfig {
                reason: format!("no argument set named '{name}' under [{ARGUMENTS_SETTING}]"),
            })?;
        self.commands.record_choice(name);
        self.run_bundle(&bundle, ui, invoker).await
    }

    async fn run_bundle<U, I>(&mut self, bundle: &Value, ui: &U, invoker: &I) -> Result<Activation>
    where
        U: Interaction,
        I: CommandInvoker,
    {
        let command = get_string(bundle, "command").filter(|c| !c.is_empty());
        let args = bundle.get("args").filter(|a| is_truthy(a));
        let (Some(command), Some(args)) = (command, args) else {
            debug!("Bundle has no usable 'command' and 'args'; nothing to run");
            return Ok(Activation::Cancelled);
        };

        let mut resolver = TemplateResolver::new(&mut self.registry)?;
        let Some(resolved) = resolver.resolve(args, bundle, ui).await? else {
            debug!("Placeholder resolution for '{}' was cancelled", command);
            return Ok(Activation::Cancelled);
        };

        debug!("Invoking '{}' with {}", command, resolved);
        invoker.invoke(&command, &resolved).await?;
        Ok(Activation::Invoked {
            command,
            args: resolved,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{MemoryConfig, RecordingInvoker, ScriptedUi, UiStep};
    use serde_json::json;

    fn settings() -> MemoryConfig {
        MemoryConfig::new(json!({
            "arguments": {
                "title": "Run",
                "broken": { "label": "no command" },
                "echo": {
                    "command": "echo",
                    "args": ["${recently:word}"],
                    "recently": { "word": { "initial": ["hello", "world"] } }
                }
            }
        }))
    }

    #[tokio::test]
    async fn test_activation_picks_bundle_and_invokes() {
        let mut action = ArgumentsAction::new();
        let ui = ScriptedUi::new([UiStep::Pick("echo".into()), UiStep::Pick("world".into())]);
        let invoker = RecordingInvoker::new();

        let outcome = action.activate(None, &settings(), &ui, &invoker).await.unwrap();

        assert_eq!(outcome, Activation::Invoked {
            command: "echo".to_string(),
            args: json!(["world"]),
        });
        assert_eq!(invoker.calls(), vec![("echo".to_string(), json!(["world"]))]);
        assert_eq!(ui.shown()[0], ["broken", "echo"]);
    }

    #[tokio::test]
    async fn test_dismissing_top_level_picker_cancels() {
        let mut action = ArgumentsAction::new();
        let ui = ScriptedUi::new([UiStep::Dismiss]);
        let invoker = RecordingInvoker::new();

        let outcome = action.activate(None, &settings(), &ui, &invoker).await.unwrap();

        assert_eq!(outcome, Activation::Cancelled);
        assert!(invoker.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_arguments_setting_cancels_silently() {
        let mut action = ArgumentsAction::new();
        let ui = ScriptedUi::new([]);
        let invoker = RecordingInvoker::new();

        let outcome =
            action.activate(None, &MemoryConfig::new(json!({})), &ui, &invoker).await.unwrap();

        assert_eq!(outcome, Activation::Cancelled);
        assert!(ui.shown().is_empty());
    }

    #[tokio::test]
    async fn test_unusable_bundle_is_not_invoked() {
        let mut action = ArgumentsAction::new();
        let ui = ScriptedUi::new([UiStep::Pick("broken".into())]);
        let invoker = RecordingInvoker::new();

        let outcome = action.activate(None, &settings(), &ui, &invoker).await.unwrap();
        assert_eq!(outcome, Activation::Cancelled);

        for bundle in [
            json!({ "command": "", "args": ["x"] }),
            json!({ "command": "echo", "args": "" }),
            json!({ "command": "echo" }),
            json!({ "command": 3, "args": ["x"] }),
        ] {
            let outcome = action.activate(Some(bundle), &settings(), &ui, &invoker).await.unwrap();
            assert_eq!(outcome, Activation::Cancelled);
        }
        assert!(invoker.calls().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_placeholder_skips_invocation() {
        let mut action = ArgumentsAction::new();
        let ui = ScriptedUi::new([UiStep::Pick("echo".into()), UiStep::Dismiss]);
        let invoker = RecordingInvoker::new();

        let outcome = action.activate(None, &settings(), &ui, &invoker).await.unwrap();

        assert_eq!(outcome, Activation::Cancelled);
        assert!(invoker.calls().is_empty());
        assert_eq!(action.commands().recency().keys(), ["echo"]);
    }

    #[tokio::test]
    async fn test_supplied_bundle_uses_itself_as_context() {
        let mut action = ArgumentsAction::new();
        let ui = ScriptedUi::new([]);
        let invoker = RecordingInvoker::new();
        let bundle = json!({
            "command": "say",
            "args": { "text": "${recently:missing}", "n": 2 }
        });

        let outcome = action.activate(Some(bundle), &settings(), &ui, &invoker).await.unwrap();

        assert_eq!(outcome, Activation::Invoked {
            command: "say".to_string(),
            args: json!({ "text": "Unknown", "n": 2 }),
        });
        assert!(ui.shown().is_empty());
    }

    #[tokio::test]
    async fn test_activate_named_records_recency() {
        let mut action = ArgumentsAction::new();
        let ui = ScriptedUi::new([UiStep::Pick("hello".into()), UiStep::Dismiss]);
        let invoker = RecordingInvoker::new();

        action.activate_named("echo", &settings(), &ui, &invoker).await.unwrap();
        assert_eq!(invoker.calls()[0].1, json!(["hello"]));

        action.activate(None, &settings(), &ui, &invoker).await.unwrap();
        assert_eq!(ui.shown()[1], ["echo", "broken"]);

        let err = action.activate_named("nope", &settings(), &ui, &invoker).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RecentlyError>(),
            Some(RecentlyError::InvalidConfig { .. })
        ));
    }

    #[tokio::test]
    async fn test_invoker_failure_propagates() {
        let mut action = ArgumentsAction::new();
        let ui = ScriptedUi::new([]);
        let invoker = RecordingInvoker::failing("exit status: 2");
        let bundle = json!({ "command": "make", "args": ["all"] });

        let err = action.activate(Some(bundle), &settings(), &ui, &invoker).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<RecentlyError>(),
            Some(RecentlyError::CommandFailed { .. })
        ));
        assert_eq!(invoker.calls().len(), 1);
    }
}
