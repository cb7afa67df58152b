//! Recency-ordered selection engine
//!
//! A [`Picker`] combines a [`RecencyTracker`] with an [`ItemSource`]:
//!
//! 1. the source builds candidates from the construction arguments,
//! 2. candidates are ordered by [`RecencyTracker::rank`] (stable),
//! 3. the host [`Chooser`](crate::interaction::Chooser) shows them,
//! 4. the source resolves the chosen key (identity, or a text prompt for the
//!    "new" entry of an [`ExtensibleSet`]),
//! 5. the final key is recorded as the most recent choice.
//!
//! Any dismissal returns `Ok(None)` and leaves the recency list untouched.
//!
//! # Example
//!
//! ```rust,no_run
//! use recently_cli::interaction::TerminalUi;
//! use recently_cli::picker::{ExtensibleSet, Picker};
//! use serde_json::json;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut picker = Picker::new(ExtensibleSet::new("branch"));
//! let args = json!({ "initial": ["main", "develop"] });
//! if let Some(branch) = picker.pick_item(Some(&args), &TerminalUi::new()).await? {
//!     println!("checking out {branch}");
//! }
//! # Ok(())
//! # }
//! ```

mod recency;
mod registry;
mod source;

pub use recency::RecencyTracker;
pub use registry::PickerRegistry;
pub use source::{ExtensibleSet, FixedSet, ItemSource, NewEntrySpec};

use anyhow::Result;
use serde_json::Value;
use tracing::debug;

use crate::interaction::{ChooserOptions, Interaction};
use crate::utils::value::get_string;

/// One entry of a picker list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Position at construction time; breaks ties between untracked keys
    pub ordinal: usize,
    /// Token returned when chosen and recorded in the recency list
    pub key: String,
    /// Text shown in the list
    pub label: String,
    /// Secondary text shown next to the label
    pub description: Option<String>,
    /// Additional text shown after the description
    pub detail: Option<String>,
}

/// One interactive choose-from-list operation with its own recency memory.
#[derive(Debug, Clone)]
pub struct Picker<S> {
    source: S,
    recency: RecencyTracker,
}

impl<S: ItemSource> Picker<S> {
    /// Create a picker with an empty recency list.
    pub fn new(source: S) -> Self {
        Self {
            source,
            recency: RecencyTracker::new(),
        }
    }

    /// The candidate source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// The recency memory.
    pub const fn recency(&self) -> &RecencyTracker {
        &self.recency
    }

    /// Record `key` as chosen without showing the list.
    pub fn record_choice(&mut self, key: &str) {
        self.recency.record_choice(key);
    }

    /// Candidates for `args` in the order they would be presented.
    pub fn candidates(&self, args: &Value) -> Vec<Candidate> {
        let mut candidates = self.source.construct(args, &self.recency);
        candidates.sort_by_key(|c| self.recency.rank(&c.key, c.ordinal));
        candidates
    }

    /// Show the recency-ordered candidates and return the resolved key.
    ///
    /// Returns `Ok(None)` when `args` is absent, when there is nothing to
    /// choose from, or when the user dismisses the list or the follow-up
    /// prompt. The recency list is only updated on success.
    ///
    /// # Errors
    ///
    /// Propagates failures of the host interaction itself.
    pub async fn pick_item<U: Interaction>(
        &mut self,
        args: Option<&Value>,
        ui: &U,
    ) -> Result<Option<String>> {
        let Some(args) = args else {
            return Ok(None);
        };

        let candidates = self.candidates(args);
        if candidates.is_empty() {
            debug!("No candidates to pick from");
            return Ok(None);
        }
        debug!(
            "Presenting {:?}",
            candidates.iter().map(|c| c.key.as_str()).collect::<Vec<_>>()
        );

        let options = ChooserOptions {
            title: get_string(args, "title"),
            place_holder: get_string(args, "placeHolder"),
        };
        let Some(index) = ui.choose(&candidates, &options).await? else {
            debug!("Picker dismissed");
            return Ok(None);
        };
        let Some(picked) = candidates.get(index) else {
            debug!("Chooser returned out-of-range index {}", index);
            return Ok(None);
        };

        let Some(key) = self
            .source
            .resolve_key(picked.key.clone(), args, ui)
            .await?
            .filter(|k| !k.is_empty())
        else {
            debug!("Follow-up for '{}' was dismissed", picked.key);
            return Ok(None);
        };

        self.recency.record_choice(&key);
        debug!("Picked '{}'", key);
        Ok(Some(key))
    }
}
