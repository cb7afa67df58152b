//! End-to-end activations through the library.

use recently_cli::action::{Activation, ArgumentsAction};
use recently_cli::config::Settings;
use recently_cli::constants::DEFAULT_NEW_LABEL;
use recently_cli::test_utils::{
    MemoryConfig, RecordingInvoker, ScriptedUi, UiStep, init_test_logging,
};
use serde_json::json;

use crate::common::{GREP_SETTINGS, TestProject};

fn pick(key: &str) -> UiStep {
    UiStep::Pick(key.to_string())
}

#[tokio::test]
async fn test_typed_pattern_is_offered_first_next_time() {
    init_test_logging(None);
    let project = TestProject::new();
    let settings = Settings::load_from(&project.write_settings(GREP_SETTINGS)).await.unwrap();
    let ui = ScriptedUi::new([
        pick("grep"),
        pick("+ new pattern"),
        UiStep::Type("XXX".to_string()),
        pick("grep"),
        pick("FIXME"),
        pick("grep"),
        UiStep::Dismiss,
    ]);
    let invoker = RecordingInvoker::new();
    let mut action = ArgumentsAction::new();

    let first = action.activate(None, &settings, &ui, &invoker).await.unwrap();
    let second = action.activate(None, &settings, &ui, &invoker).await.unwrap();
    let third = action.activate(None, &settings, &ui, &invoker).await.unwrap();

    assert_eq!(first, Activation::Invoked {
        command: "rg".to_string(),
        args: json!(["-n", "XXX"]),
    });
    assert_eq!(second, Activation::Invoked {
        command: "rg".to_string(),
        args: json!(["-n", "FIXME"]),
    });
    assert_eq!(third, Activation::Cancelled);
    assert_eq!(invoker.calls().len(), 2);

    let shown = ui.shown();
    assert_eq!(shown[0], ["grep", "hello"]);
    assert_eq!(shown[1], ["TODO", "FIXME", "+ new pattern"]);
    assert_eq!(shown[3], ["XXX", "TODO", "FIXME", "+ new pattern"]);
    assert_eq!(shown[5], ["FIXME", "XXX", "TODO", "+ new pattern"]);

    let prompts = ui.prompts();
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0].prompt.as_deref(), Some("Pattern to search"));
}

#[tokio::test]
async fn test_nested_placeholders_are_all_or_nothing() {
    let bundle = json!({
        "command": "deploy",
        "args": {
            "env": "${recently:env}",
            "targets": ["${recently:region}", "${recently:region}-b"],
            "replicas": 3
        },
        "recently": {
            "env": { "initial": ["prod", "staging"] },
            "region": { "initial": ["eu", "us"] }
        }
    });
    let ui = ScriptedUi::new([
        pick("staging"),
        pick("us"),
        pick("eu"),
        pick("staging"),
        UiStep::Dismiss,
    ]);
    let invoker = RecordingInvoker::new();
    let config = MemoryConfig::new(json!({}));
    let mut action = ArgumentsAction::new();

    let first = action.activate(Some(bundle.clone()), &config, &ui, &invoker).await.unwrap();
    let second = action.activate(Some(bundle), &config, &ui, &invoker).await.unwrap();

    assert_eq!(first, Activation::Invoked {
        command: "deploy".to_string(),
        args: json!({ "env": "staging", "targets": ["us", "eu-b"], "replicas": 3 }),
    });
    assert_eq!(second, Activation::Cancelled);
    assert_eq!(invoker.calls().len(), 1);

    let shown = ui.shown();
    assert_eq!(shown[2], ["us", "eu", DEFAULT_NEW_LABEL]);
    assert_eq!(shown[3], ["staging", "prod", DEFAULT_NEW_LABEL]);
    assert_eq!(shown[4], ["eu", "us", DEFAULT_NEW_LABEL]);
    assert_eq!(action.registry().len(), 2);
}

#[tokio::test]
async fn test_settings_without_arguments_cancel_quietly() {
    let project = TestProject::new();
    let path = project.write_settings("[other]\nkey = 1\n");
    let settings = Settings::load_from(&path).await.unwrap();
    let ui = ScriptedUi::new([]);
    let invoker = RecordingInvoker::new();

    let outcome =
        ArgumentsAction::new().activate(None, &settings, &ui, &invoker).await.unwrap();

    assert_eq!(outcome, Activation::Cancelled);
    assert!(ui.shown().is_empty());
    assert!(invoker.calls().is_empty());
}
