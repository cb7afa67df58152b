//! recently - recently-used pickers and templated command arguments
//!
//! `recently` runs configured commands whose arguments are filled in
//! interactively. Every pick is remembered, and the most recent choices are
//! offered first the next time the same picker opens.
//!
//! # Architecture Overview
//!
//! - A [`picker::Picker`] pairs a [`picker::RecencyTracker`] with an
//!   [`picker::ItemSource`]. The source builds candidates, the tracker orders
//!   them, the host shows them, and the final key is recorded as most recent.
//! - [`picker::FixedSet`] offers a static mapping (the named argument sets).
//!   [`picker::ExtensibleSet`] offers an `initial` list plus everything typed
//!   before, with a "new" entry that opens a text prompt.
//! - [`templating::TemplateResolver`] walks an argument value and replaces
//!   every `${recently:<name>}` placeholder by running the picker `<name>`
//!   from the [`picker::PickerRegistry`].
//! - [`action::ArgumentsAction`] ties these together: pick a bundle, resolve
//!   its `args`, hand the result to an [`invoker::CommandInvoker`].
//!
//! Dismissing any picker or prompt is a normal outcome (`Ok(None)` or
//! [`action::Activation::Cancelled`]), never an error.
//!
//! # Core Modules
//!
//! - [`action`] - The top-level activation flow
//! - [`cli`] - Command-line interface
//! - [`config`] - Settings discovery and loading (TOML or JSON)
//! - [`constants`] - Shared labels, reserved keys and file names
//! - [`core`] - Error types and user-facing error formatting
//! - [`interaction`] - Chooser and text-prompt seams, terminal implementation
//! - [`invoker`] - Process and dry-run command invokers
//! - [`picker`] - Recency-ordered selection engine
//! - [`templating`] - Placeholder substitution in nested values
//! - [`utils`] - File and JSON value helpers
//!
//! # Settings Format
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

pub mod action;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod interaction;
pub mod invoker;
pub mod picker;
pub mod templating;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
