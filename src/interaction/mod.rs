//! User interaction seams
//!
//! The picker engine never talks to a terminal directly. It needs two things
//! from its host:
//!
//! - [`Chooser`] - present an ordered candidate list and return the chosen
//!   index, or `None` when the user dismisses the list
//! - [`TextPrompt`] - ask for free text and return it, or `None` on dismissal
//!
//! [`TerminalUi`] implements both with `dialoguer`. Tests use the scripted
//! implementation from `test_utils`.

mod terminal;

pub use terminal::TerminalUi;

use anyhow::Result;
use std::future::Future;

use crate::picker::Candidate;

/// Presentation options for a candidate list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChooserOptions {
    /// Heading shown above the list
    pub title: Option<String>,
    /// Hint shown while nothing is typed
    pub place_holder: Option<String>,
}

/// Presentation options for a free-text prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextPromptOptions {
    /// Prompt text
    pub prompt: Option<String>,
    /// Hint shown while nothing is typed
    pub place_holder: Option<String>,
    /// Heading shown above the prompt
    pub title: Option<String>,
}

/// Presents an ordered list of candidates and reports the user's pick.
pub trait Chooser {
    /// Show `candidates` in the given order.
    ///
    /// Returns the index into `candidates` of the picked entry, or `Ok(None)`
    /// if the user dismissed the list without choosing.
    ///
    /// # Errors
    ///
    /// Returns an error only when the list cannot be shown at all.
    fn choose(
        &self,
        candidates: &[Candidate],
        options: &ChooserOptions,
    ) -> impl Future<Output = Result<Option<usize>>> + Send;
}

/// Asks the user for a line of free text.
pub trait TextPrompt {
    /// Returns the typed text, or `Ok(None)` if the prompt was dismissed.
    ///
    /// # Errors
    ///
    /// Returns an error only when the prompt cannot be shown at all.
    fn prompt_text(
        &self,
        options: &TextPromptOptions,
    ) -> impl Future<Output = Result<Option<String>>> + Send;
}

/// Everything a picker needs from its host.
pub trait Interaction: Chooser + TextPrompt {}

impl<T: Chooser + TextPrompt> Interaction for T {}
