//! Shared helpers for integration tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary project directory with an isolated home directory.
pub struct TestProject {
    temp: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("home")).unwrap();
        fs::create_dir_all(temp.path().join("project")).unwrap();
        Self {
            temp,
        }
    }

    /// Project directory the binary runs in.
    pub fn path(&self) -> PathBuf {
        self.temp.path().join("project")
    }

    /// Home directory seen by the binary.
    pub fn home(&self) -> PathBuf {
        self.temp.path().join("home")
    }

    /// Write `recently.toml` in the project directory.
    pub fn write_settings(&self, content: &str) -> PathBuf {
        self.write_file("recently.toml", content)
    }

    pub fn write_file(&self, name: impl AsRef<Path>, content: &str) -> PathBuf {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// The `recently` binary, running in the project with an isolated home.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("recently").unwrap();
        cmd.current_dir(self.path())
            .env("HOME", self.home())
            .env_remove("RECENTLY_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }
}

pub const GREP_SETTINGS: &str = r#"
[arguments]
title = "Run a task"

[arguments.grep]
label = "Search sources"
description = "ripgrep"
command = "rg"
args = ["-n", "${recently:pattern}"]

[arguments.grep.recently.pattern]
initial = ["TODO", "FIXME"]
new = { label = "+ new pattern", prompt = "Pattern to search" }

[arguments.hello]
command = "echo"
args = ["hello"]
"#;
