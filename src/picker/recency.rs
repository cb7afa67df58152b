//! Most-recently-chosen key list for one logical picker.

use tracing::trace;

/// Ordered memory of previously chosen keys, most recent first.
///
/// The list never contains duplicates: [`record_choice`](Self::record_choice)
/// moves an existing key to the front instead of adding it again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecencyTracker {
    recent: Vec<String>,
}

impl RecencyTracker {
    /// Create an empty tracker.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            recent: Vec::new(),
        }
    }

    /// Sort rank of a candidate.
    ///
    /// A tracked key ranks at its position in the recency list. An untracked
    /// key ranks at `len + ordinal`, so every tracked key sorts before every
    /// untracked one and untracked keys keep their construction order.
    #[must_use]
    pub fn rank(&self, key: &str, ordinal: usize) -> usize {
        self.recent.iter().position(|k| k == key).unwrap_or(self.recent.len() + ordinal)
    }

    /// Move `key` to the front of the list. Empty keys are ignored.
    pub fn record_choice(&mut self, key: &str) {
        if key.is_empty() {
            return;
        }
        self.recent.retain(|k| k != key);
        self.recent.insert(0, key.to_string());
        trace!("Recency list is now {:?}", self.recent);
    }

    /// Previously chosen keys, most recent first.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.recent
    }

    /// Whether `key` has been chosen before.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.recent.iter().any(|k| k == key)
    }

    /// Number of tracked keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recent.len()
    }

    /// Whether nothing has been chosen yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }
}
