//! Terminal implementation of the interaction seams using `dialoguer`.

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use tracing::debug;

use super::{Chooser, ChooserOptions, TextPrompt, TextPromptOptions};
use crate::core::RecentlyError;
use crate::picker::Candidate;

/// Interactive pickers and prompts rendered on stderr.
///
/// `dialoguer` blocks the calling thread while it waits for keys, so every
/// prompt runs on [`tokio::task::spawn_blocking`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalUi;

impl TerminalUi {
    /// Create a terminal UI.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn candidate_line(candidate: &Candidate) -> String {
    let mut line = candidate.label.clone();
    if let Some(description) = &candidate.description {
        line.push_str("  ");
        line.push_str(description);
    }
    if let Some(detail) = &candidate.detail {
        line.push_str(" (");
        line.push_str(detail);
        line.push(')');
    }
    line
}

fn chooser_prompt(options: &ChooserOptions) -> String {
    match (&options.title, &options.place_holder) {
        (Some(title), Some(hint)) => format!("{title} ({hint})"),
        (Some(title), None) => title.clone(),
        (None, Some(hint)) => hint.clone(),
        (None, None) => "Select".to_string(),
    }
}

fn text_prompt(options: &TextPromptOptions) -> String {
    let mut prompt = String::new();
    if let Some(title) = &options.title {
        prompt.push_str(title);
        prompt.push_str(": ");
    }
    prompt.push_str(options.prompt.as_deref().unwrap_or(""));
    if let Some(hint) = &options.place_holder {
        prompt.push_str(&format!(" ({hint})"));
    }
    prompt
}

impl Chooser for TerminalUi {
    async fn choose(
        &self,
        candidates: &[Candidate],
        options: &ChooserOptions,
    ) -> Result<Option<usize>> {
        let items: Vec<String> = candidates.iter().map(candidate_line).collect();
        let prompt = chooser_prompt(options);

        let picked = tokio::task::spawn_blocking(move || {
            Select::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .items(&items[..])
                .default(0)
                .interact_opt()
                .map_err(RecentlyError::from)
        })
        .await??;

        debug!("Chooser returned {:?}", picked);
        Ok(picked)
    }
}

impl TextPrompt for TerminalUi {
    async fn prompt_text(&self, options: &TextPromptOptions) -> Result<Option<String>> {
        let prompt = text_prompt(options);

        let text = tokio::task::spawn_blocking(move || {
            Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
                .map_err(RecentlyError::from)
        })
        .await??;

        // An empty line is how a terminal user dismisses the prompt.
        Ok(Some(text).filter(|t| !t.is_empty()))
    }
}
