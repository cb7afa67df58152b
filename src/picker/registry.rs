//! Lazily populated map from picker name to its extensible picker.

use std::collections::HashMap;

use anyhow::Result;
use serde_json::Value;
use tracing::debug;

use super::{ExtensibleSet, Picker};
use crate::constants::RECENTLY_FAMILY;
use crate::interaction::Interaction;
use crate::templating::VariableFamily;

/// Owns one [`Picker<ExtensibleSet>`] per picker name.
///
/// The same name always yields the same picker, and therefore the same
/// recency list, for as long as the registry lives. Pickers are created on
/// first use and never evicted. The registry has a single owner; every
/// mutating operation takes `&mut self`, so two activations can never
/// interleave their picks.
#[derive(Debug, Default)]
pub struct PickerRegistry {
    pickers: HashMap<String, Picker<ExtensibleSet>>,
}

impl PickerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The picker for `name`, created on first use.
    pub fn get(&mut self, name: &str) -> &mut Picker<ExtensibleSet> {
        self.pickers.entry(name.to_string()).or_insert_with(|| {
            debug!("Creating recently-used picker '{}'", name);
            Picker::new(ExtensibleSet::new(name))
        })
    }

    /// The picker for `name` if it has been used before.
    #[must_use]
    pub fn peek(&self, name: &str) -> Option<&Picker<ExtensibleSet>> {
        self.pickers.get(name)
    }

    /// Number of pickers created so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pickers.len()
    }

    /// Whether no picker has been created yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pickers.is_empty()
    }
}

impl VariableFamily for PickerRegistry {
    fn name(&self) -> &str {
        RECENTLY_FAMILY
    }

    async fn resolve<U: Interaction>(
        &mut self,
        settings: &Value,
        arg_name: &str,
        ui: &U,
    ) -> Result<Option<String>> {
        self.get(arg_name).pick_item(Some(settings), ui).await
    }
}
