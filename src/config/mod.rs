//! Settings storage for recently
//!
//! Settings are a free-form document, loaded from TOML or JSON into a
//! [`serde_json::Value`] with key order preserved. Key order matters: it is
//! the construction order of the argument-set picker.
//!
//! # Discovery
//!
//! [`Settings::discover`] looks for a settings file in this order:
//!
//! 1. an explicit path (`--config` or `RECENTLY_CONFIG`), with `~` expanded
//! 2. `recently.toml` or `recently.json` in the current directory or any parent
//! 3. the global file:
//!    - Unix/macOS: `~/.recently/config.toml`
//!    - Windows: `%LOCALAPPDATA%\recently\config.toml`
//!
//! If none exists the settings are empty, and the picker simply has nothing
//! to offer.
//!
//! # Format
//!
//! ```toml
//! [arguments]
//! title = "Run a task"
//!
//! [arguments.grep]
//! label = "Search sources"
//! command = "rg"
//! args = ["-n", "${recently:pattern}", "${recently:dir}"]
//!
//! [arguments.grep.recently.pattern]
//! initial = ["TODO", "FIXME"]
//! new = { label = "+ new pattern", prompt = "Pattern to search" }
//! ```

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::constants::{GLOBAL_CONFIG_DIR, GLOBAL_CONFIG_FILE, LOCAL_CONFIG_FILES};
use crate::core::RecentlyError;
use crate::utils::value::get_path;

/// Read access to settings by dotted path.
pub trait ConfigSource {
    /// Look up `setting_path` (such as `arguments` or `arguments.grep`).
    ///
    /// Returns `None` when any segment is missing.
    fn get(&self, setting_path: &str) -> Option<Value>;
}

/// Commented settings file written by `recently init`.
pub const EXAMPLE_SETTINGS: &str = r#"# recently settings
#
# Every entry under [arguments] is an argument set offered by `recently run`.
# Strings in `args` may contain ${recently:<name>} placeholders; each one opens
# a picker configured under `recently.<name>` of the same argument set.

[arguments]
title = "Run a task"
placeHolder = "Pick an argument set"

[arguments.grep]
label = "Search sources"
description = "ripgrep with a remembered pattern"
command = "rg"
args = ["-n", "${recently:pattern}", "${recently:dir}"]

[arguments.grep.recently.pattern]
initial = ["TODO", "FIXME"]
new = { label = "+ new pattern", prompt = "Pattern to search" }

[arguments.grep.recently.dir]
initial = ["src", "tests"]
"#;

/// A loaded settings document.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    root: Value,
    path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_value(Value::Object(Map::new()))
    }
}

impl Settings {
    /// Wrap an already parsed document.
    #[must_use]
    pub const fn from_value(root: Value) -> Self {
        Self {
            root,
            path: None,
        }
    }

    /// The whole settings document.
    #[must_use]
    pub const fn root(&self) -> &Value {
        &self.root
    }

    /// File the settings were loaded from, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Parse settings text. Files ending in `.json` are JSON, anything else is TOML.
    ///
    /// # Errors
    ///
    /// Returns [`RecentlyError::ConfigParseError`] on invalid syntax.
    pub fn parse(content: &str, path: &Path) -> Result<Value> {
        let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let parsed = if is_json {
            serde_json::from_str::<Value>(content).map_err(|e| e.to_string())
        } else {
            toml::from_str::<Value>(content).map_err(|e| e.to_string())
        };
        parsed.map_err(|reason| {
            RecentlyError::ConfigParseError {
                file: path.display().to_string(),
                reason,
            }
            .into()
        })
    }

    /// Load settings from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, or malformed.
    pub async fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(RecentlyError::ConfigNotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        let content = fs::read_to_string(path)
            .await
            .map_err(RecentlyError::from)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        let root = Self::parse(&content, path)?;
        debug!("Loaded settings from {}", path.display());
        Ok(Self {
            root,
            path: Some(path.to_path_buf()),
        })
    }

    /// Locate and load settings, starting the local search in the current
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit path does not exist, or if the
    /// selected file cannot be read or parsed.
    pub async fn discover(explicit: Option<&str>) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        let global = Self::default_path().ok();
        Self::discover_from(explicit, &cwd, global.as_deref()).await
    }

    /// Locate and load settings with explicit search roots.
    ///
    /// # Errors
    ///
    /// See [`Settings::discover`].
    pub async fn discover_from(
        explicit: Option<&str>,
        start: &Path,
        global: Option<&Path>,
    ) -> Result<Self> {
        if let Some(explicit) = explicit {
            let expanded = shellexpand::tilde(explicit);
            return Self::load_from(Path::new(expanded.as_ref())).await;
        }

        if let Some(local) = Self::find_local(start) {
            return Self::load_from(&local).await;
        }

        if let Some(global) = global.filter(|p| p.exists()) {
            return Self::load_from(global).await;
        }

        debug!("No settings file found; using empty settings");
        Ok(Self::default())
    }

    /// Search `start` and its ancestors for a local settings file.
    #[must_use]
    pub fn find_local(start: &Path) -> Option<PathBuf> {
        start.ancestors().find_map(|dir| {
            LOCAL_CONFIG_FILES.iter().map(|name| dir.join(name)).find(|candidate| candidate.is_file())
        })
    }

    /// Location of the global settings file.
    ///
    /// # Errors
    ///
    /// Returns an error if the home (or local data) directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("recently")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(GLOBAL_CONFIG_DIR)
        };

        Ok(config_dir.join(GLOBAL_CONFIG_FILE))
    }
}

impl ConfigSource for Settings {
    fn get(&self, setting_path: &str) -> Option<Value> {
        get_path(&self.root, setting_path).cloned()
    }
}
