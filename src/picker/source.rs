//! Candidate construction strategies.
//!
//! An [`ItemSource`] turns the picker's construction arguments into an
//! ordered candidate list and, once the user has chosen, turns the chosen
//! key into the final key. Two sources exist:
//!
//! - [`FixedSet`] - a static `key -> display` mapping (named argument bundles)
//! - [`ExtensibleSet`] - an `initial` list plus every previously typed value,
//!   with a synthetic "new" entry that opens a text prompt

use anyhow::Result;
use serde_json::Value;
use std::future::Future;
use tracing::{debug, warn};

use super::{Candidate, RecencyTracker};
use crate::constants::{DEFAULT_NEW_LABEL, RESERVED_KEYS};
use crate::interaction::{TextPrompt, TextPromptOptions};
use crate::utils::value::get_string;

/// Builds candidates and resolves the chosen key for a [`Picker`](super::Picker).
pub trait ItemSource {
    /// Build candidates from the construction arguments.
    ///
    /// `ordinal` of each candidate must equal its index in the returned list.
    fn construct(&self, args: &Value, recency: &RecencyTracker) -> Vec<Candidate>;

    /// Turn the chosen key into the final key, or `Ok(None)` on cancellation.
    fn resolve_key<U: TextPrompt>(
        &self,
        key: String,
        args: &Value,
        ui: &U,
    ) -> impl Future<Output = Result<Option<String>>>;
}

/// Candidates from a fixed mapping of keys to display metadata.
///
/// Each entry other than `title`/`placeHolder` becomes a candidate in
/// mapping order. A string value is the label; an object value may carry
/// `label`, `description` and `detail`. The label defaults to the key.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedSet;

impl FixedSet {
    /// Create a fixed-set source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ItemSource for FixedSet {
    fn construct(&self, args: &Value, _recency: &RecencyTracker) -> Vec<Candidate> {
        let Some(entries) = args.as_object() else {
            return Vec::new();
        };

        let mut candidates = Vec::new();
        for (key, item) in entries {
            if RESERVED_KEYS.contains(&key.as_str()) {
                continue;
            }
            let (label, description, detail) = match item {
                Value::String(label) => (label.clone(), None, None),
                Value::Object(_) => (
                    get_string(item, "label").unwrap_or_else(|| key.clone()),
                    get_string(item, "description"),
                    get_string(item, "detail"),
                ),
                _ => (key.clone(), None, None),
            };
            candidates.push(Candidate {
                ordinal: candidates.len(),
                key: key.clone(),
                label,
                description,
                detail,
            });
        }
        candidates
    }

    async fn resolve_key<U: TextPrompt>(
        &self,
        key: String,
        _args: &Value,
        _ui: &U,
    ) -> Result<Option<String>> {
        Ok(Some(key))
    }
}

/// Description of the synthetic "create new" candidate, read from the
/// `new` object of the construction arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewEntrySpec {
    /// Key and label of the synthetic candidate
    pub label: Option<String>,
    /// Text prompt shown after the synthetic candidate is chosen
    pub prompt: Option<String>,
    /// Hint shown in the text prompt
    pub place_holder: Option<String>,
    /// Heading of the text prompt
    pub title: Option<String>,
}

impl NewEntrySpec {
    /// Read the `new` object of `args`; a missing or malformed object yields defaults.
    #[must_use]
    pub fn from_args(args: &Value) -> Self {
        let Some(spec) = args.get("new").filter(|v| v.is_object()) else {
            return Self::default();
        };
        Self {
            label: get_string(spec, "label"),
            prompt: get_string(spec, "prompt"),
            place_holder: get_string(spec, "placeHolder"),
            title: get_string(spec, "title"),
        }
    }

    /// Sentinel key, `"-- new --"` unless configured.
    #[must_use]
    pub fn sentinel(&self) -> &str {
        self.label.as_deref().unwrap_or(DEFAULT_NEW_LABEL)
    }
}

/// Free-text candidates that grow with every value the user types.
///
/// Candidate order is: `initial` entries, then the sentinel "new" entry,
/// then previously recorded keys not already listed.
#[derive(Debug, Clone)]
pub struct ExtensibleSet {
    name: String,
}

impl ExtensibleSet {
    /// Create a source for the picker family member `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
        }
    }

    /// Name used in the default text prompt.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    fn initial_candidate(item: &Value, ordinal: usize) -> Option<Candidate> {
        match item {
            Value::String(key) if !key.is_empty() => Some(Candidate {
                ordinal,
                key: key.clone(),
                label: key.clone(),
                description: None,
                detail: None,
            }),
            Value::Object(_) => {
                let key = get_string(item, "value").filter(|k| !k.is_empty())?;
                Some(Candidate {
                    ordinal,
                    label: get_string(item, "label").unwrap_or_else(|| key.clone()),
                    key,
                    description: get_string(item, "description"),
                    detail: get_string(item, "detail"),
                })
            }
            _ => None,
        }
    }
}

impl ItemSource for ExtensibleSet {
    fn construct(&self, args: &Value, recency: &RecencyTracker) -> Vec<Candidate> {
        let initial = match args.get("initial") {
            None => &[][..],
            Some(Value::Array(items)) => items.as_slice(),
            Some(_) => {
                debug!("Picker '{}' has a non-array 'initial'; offering nothing", self.name);
                return Vec::new();
            }
        };

        let mut candidates: Vec<Candidate> = Vec::new();
        for item in initial {
            match Self::initial_candidate(item, candidates.len()) {
                Some(candidate) => candidates.push(candidate),
                None => debug!("Skipping unusable initial entry {} in '{}'", item, self.name),
            }
        }

        let new_entry = NewEntrySpec::from_args(args);
        let sentinel = new_entry.sentinel();
        if candidates.iter().any(|c| c.key == sentinel) {
            warn!(
                "Initial value '{}' of '{}' equals the new-entry label; choosing it opens the text prompt",
                sentinel, self.name
            );
        }
        candidates.push(Candidate {
            ordinal: candidates.len(),
            key: sentinel.to_string(),
            label: sentinel.to_string(),
            description: None,
            detail: None,
        });

        for key in recency.keys() {
            if candidates.iter().any(|c| &c.key == key) {
                continue;
            }
            candidates.push(Candidate {
                ordinal: candidates.len(),
                key: key.clone(),
                label: key.clone(),
                description: None,
                detail: None,
            });
        }
        candidates
    }

    async fn resolve_key<U: TextPrompt>(
        &self,
        key: String,
        args: &Value,
        ui: &U,
    ) -> Result<Option<String>> {
        let new_entry = NewEntrySpec::from_args(args);
        if key != new_entry.sentinel() {
            return Ok(Some(key));
        }

        let options = TextPromptOptions {
            prompt: Some(
                new_entry.prompt.unwrap_or_else(|| format!("Enter argument: {}", self.name)),
            ),
            place_holder: new_entry.place_holder,
            title: new_entry.title,
        };
        ui.prompt_text(&options).await
    }
}
