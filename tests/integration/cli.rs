//! Behaviour of the `recently` binary that needs no terminal.

use predicates::prelude::*;
use std::fs;

use crate::common::{GREP_SETTINGS, TestProject};

#[test]
fn test_list_shows_sets_in_settings_order() {
    let project = TestProject::new();
    project.write_settings(GREP_SETTINGS);

    project
        .command()
        .args(["list", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""name": "grep""#))
        .stdout(predicate::str::contains(r#""label": "Search sources""#))
        .stdout(predicate::str::contains("Run a task").not());

    let output = project.command().args(["list", "--format", "json"]).output().unwrap();
    let listed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["grep", "hello"]);
}

#[test]
fn test_list_finds_settings_in_parent_directory() {
    let project = TestProject::new();
    project.write_settings(GREP_SETTINGS);
    fs::create_dir_all(project.path().join("nested/deeper")).unwrap();

    project
        .command()
        .current_dir(project.path().join("nested/deeper"))
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("grep"))
        .stdout(predicate::str::contains("hello"));
}

#[test]
fn test_list_without_settings() {
    let project = TestProject::new();

    project
        .command()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No argument sets configured"));
}

#[test]
fn test_config_flag_and_environment_variable() {
    let project = TestProject::new();
    let path = project.write_file("custom/tasks.json", r#"{ "arguments": { "only": "Only" } }"#);

    project
        .command()
        .args(["--config", path.to_str().unwrap(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("only"));

    project
        .command()
        .env("RECENTLY_CONFIG", &path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("only"));
}

#[test]
fn test_missing_config_fails_with_suggestion() {
    let project = TestProject::new();

    project
        .command()
        .args(["--config", "missing.toml", "list"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Settings file not found"))
        .stderr(predicate::str::contains("recently init"));
}

#[test]
fn test_invalid_settings_syntax_fails() {
    let project = TestProject::new();
    project.write_settings("[arguments\n");

    project
        .command()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid settings file syntax"));
}

#[test]
fn test_dry_run_bundle_without_placeholders() {
    let project = TestProject::new();

    project
        .command()
        .args(["run", "--dry-run", "--bundle", r#"{"command": "echo", "args": ["hi", 2]}"#])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("echo\n"))
        .stdout(predicate::str::contains("\"hi\""))
        .stdout(predicate::str::contains("2"));
}

#[test]
fn test_dry_run_substitutes_unknown_for_unconfigured_placeholder() {
    let project = TestProject::new();

    project
        .command()
        .args(["run", "--dry-run", "--bundle", r#"{"command": "echo", "args": "${recently:who}"}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Unknown\""));
}

#[test]
fn test_dry_run_named_set() {
    let project = TestProject::new();
    project.write_settings(GREP_SETTINGS);

    project
        .command()
        .args(["run", "--set", "hello", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("echo"))
        .stdout(predicate::str::contains("\"hello\""));

    project
        .command()
        .args(["run", "--set", "nope", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no argument set named 'nope'"));
}

#[test]
fn test_unusable_bundle_does_nothing() {
    let project = TestProject::new();

    project
        .command()
        .args(["run", "--dry-run", "--bundle", r#"{"args": ["x"]}"#])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_invalid_bundle_json_fails() {
    let project = TestProject::new();

    project
        .command()
        .args(["run", "--bundle", "{not json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--bundle is not valid JSON"));
}

#[test]
fn test_placeholder_without_terminal_reports_prompt_failure() {
    let project = TestProject::new();
    let bundle = r#"{"command": "echo", "args": "${recently:who}", "recently": {"who": {"initial": ["me"]}}}"#;

    project
        .command()
        .args(["run", "--dry-run", "--bundle", bundle])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Interactive prompt failed"));
}

#[cfg(unix)]
#[test]
fn test_run_spawns_command() {
    let project = TestProject::new();
    let marker = project.path().join("created.txt");
    let bundle = serde_json::json!({ "command": "touch", "args": [marker.to_str().unwrap()] });

    project.command().args(["run", "--bundle", &bundle.to_string()]).assert().success();

    assert!(marker.exists());
}

#[cfg(unix)]
#[test]
fn test_failing_command_exits_with_error() {
    let project = TestProject::new();

    project
        .command()
        .args(["run", "--bundle", r#"{"command": "false", "args": ["x"]}"#])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Command 'false' failed"));
}

#[test]
fn test_init_writes_settings_once() {
    let project = TestProject::new();

    project
        .command()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"));
    let content = fs::read_to_string(project.path().join("recently.toml")).unwrap();
    assert!(content.contains("[arguments.grep]"));

    project
        .command()
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    project.command().args(["init", "--force"]).assert().success();

    project
        .command()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("grep"));
}
