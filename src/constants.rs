//! Global constants used throughout the recently codebase.
//!
//! This module collects the sentinel labels, reserved configuration keys and
//! file names that are shared between the picker engine, the template
//! resolver and the CLI host.

/// Default key and label of the synthetic "create new" candidate.
///
/// Used by [`ExtensibleSet`](crate::picker::ExtensibleSet) when the
/// configuration does not provide `new.label`.
pub const DEFAULT_NEW_LABEL: &str = "-- new --";

/// Literal substituted for a placeholder whose configuration lookup is falsy.
pub const UNKNOWN_VALUE: &str = "Unknown";

/// Keys of a fixed argument mapping that configure the picker itself and
/// never become candidates.
pub const RESERVED_KEYS: [&str; 2] = ["title", "placeHolder"];

/// Placeholder family resolved through recently-used text pickers.
pub const RECENTLY_FAMILY: &str = "recently";

/// Setting that holds the named argument bundles.
pub const ARGUMENTS_SETTING: &str = "arguments";

/// Project-local settings file names, searched from the current directory upward.
pub const LOCAL_CONFIG_FILES: [&str; 2] = ["recently.toml", "recently.json"];

/// Global settings directory name (`~/.recently` on Unix).
pub const GLOBAL_CONFIG_DIR: &str = ".recently";

/// Global settings file name inside [`GLOBAL_CONFIG_DIR`].
pub const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Environment variable overriding the settings file location.
pub const CONFIG_ENV_VAR: &str = "RECENTLY_CONFIG";
