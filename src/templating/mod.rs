//! Template-variable substitution for argument bundles
//!
//! Strings inside a bundle's `args` may contain placeholders of the form
//! `${<family>:<argName>}`. [`TemplateResolver`] walks an arbitrary JSON
//! value, resolves every placeholder of its [`VariableFamily`] and returns
//! the substituted copy.
//!
//! # Resolution rules
//!
//! - The settings for a token are looked up at `context[family][argName]`.
//!   A missing or falsy lookup resolves to the literal `"Unknown"` without
//!   asking the user.
//! - Tokens are resolved strictly one after another, left to right. A pick
//!   may depend on recency recorded by the pick before it, and only one
//!   prompt can be on screen at a time.
//! - If any token is cancelled, the whole string is cancelled, and so is
//!   every array and object containing it. No partially substituted value
//!   is ever returned.
//!
//! # Example
//!
//! ```rust,no_run
//! use recently_cli::interaction::TerminalUi;
//! use recently_cli::picker::PickerRegistry;
//! use recently_cli::templating::TemplateResolver;
//! use serde_json::json;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let bundle = json!({
//!     "command": "rg",
//!     "args": ["-n", "${recently:pattern}"],
//!     "recently": { "pattern": { "initial": ["TODO", "FIXME"] } }
//! });
//! let mut registry = PickerRegistry::new();
//! let mut resolver = TemplateResolver::new(&mut registry)?;
//! let args = resolver.resolve(&bundle["args"], &bundle, &TerminalUi::new()).await?;
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use futures::FutureExt;
use futures::future::LocalBoxFuture;
use regex::Regex;
use serde_json::{Map, Value};
use std::future::Future;
use std::ops::Range;
use tracing::trace;

use crate::constants::UNKNOWN_VALUE;
use crate::interaction::Interaction;
use crate::utils::value::is_truthy;

/// A named source of placeholder values, such as the `recently` pickers.
pub trait VariableFamily {
    /// Family name as written in placeholders (`${name:arg}`).
    fn name(&self) -> &str;

    /// Resolve the token `arg_name` using its `settings`.
    ///
    /// Returns `Ok(None)` when the user cancels.
    fn resolve<U: Interaction>(
        &mut self,
        settings: &Value,
        arg_name: &str,
        ui: &U,
    ) -> impl Future<Output = Result<Option<String>>>;
}

/// Substitutes the placeholders of one [`VariableFamily`] in nested values.
#[derive(Debug)]
pub struct TemplateResolver<'a, F> {
    family: &'a mut F,
    family_name: String,
    pattern: Regex,
}

impl<'a, F: VariableFamily> TemplateResolver<'a, F> {
    /// Create a resolver for `family`.
    ///
    /// # Errors
    ///
    /// Returns an error if the placeholder pattern for the family name cannot
    /// be compiled.
    pub fn new(family: &'a mut F) -> Result<Self> {
        let family_name = family.name().to_string();
        let pattern = Regex::new(&format!(r"\$\{{{}:(.+?)\}}", regex::escape(&family_name)))
            .with_context(|| format!("Invalid placeholder pattern for family '{family_name}'"))?;
        Ok(Self {
            family,
            family_name,
            pattern,
        })
    }

    /// Substitute every placeholder in `text`.
    ///
    /// Returns `Ok(None)` if any placeholder is cancelled.
    ///
    /// # Errors
    ///
    /// Propagates failures of the host interaction.
    pub async fn substitute<U: Interaction>(
        &mut self,
        text: &str,
        context: &Value,
        ui: &U,
    ) -> Result<Option<String>> {
        let tokens: Vec<(Range<usize>, String)> = self
            .pattern
            .captures_iter(text)
            .filter_map(|caps| Some((caps.get(0)?.range(), caps.get(1)?.as_str().to_string())))
            .collect();
        if tokens.is_empty() {
            return Ok(Some(text.to_string()));
        }
        trace!("Found {} '{}' placeholders in {:?}", tokens.len(), self.family_name, text);

        let mut values = Vec::with_capacity(tokens.len());
        for (_, arg_name) in &tokens {
            let settings = context
                .get(&self.family_name)
                .and_then(|family| family.get(arg_name))
                .filter(|settings| is_truthy(settings));
            let Some(settings) = settings else {
                trace!("No settings for '{}:{}'", self.family_name, arg_name);
                values.push(UNKNOWN_VALUE.to_string());
                continue;
            };
            match self.family.resolve(settings, arg_name, ui).await? {
                Some(value) => values.push(value),
                None => return Ok(None),
            }
        }

        let mut output = String::with_capacity(text.len());
        let mut last = 0;
        for ((range, _), value) in tokens.iter().zip(&values) {
            output.push_str(&text[last..range.start]);
            output.push_str(value);
            last = range.end;
        }
        output.push_str(&text[last..]);
        Ok(Some(output))
    }

    /// Substitute placeholders in every string nested inside `value`.
    ///
    /// Arrays and objects are rebuilt in order; other values are copied
    /// unchanged. Returns `Ok(None)` if any placeholder anywhere is cancelled.
    ///
    /// # Errors
    ///
    /// Propagates failures of the host interaction.
    pub async fn resolve<U: Interaction>(
        &mut self,
        value: &Value,
        context: &Value,
        ui: &U,
    ) -> Result<Option<Value>> {
        self.walk(value, context, ui).await
    }

    fn walk<'s, U: Interaction>(
        &'s mut self,
        value: &'s Value,
        context: &'s Value,
        ui: &'s U,
    ) -> LocalBoxFuture<'s, Result<Option<Value>>> {
        async move {
            match value {
                Value::String(text) => {
                    Ok(self.substitute(text, context, ui).await?.map(Value::String))
                }
                Value::Array(items) => {
                    let mut resolved = Vec::with_capacity(items.len());
                    for item in items {
                        let Some(item) = self.walk(item, context, ui).await? else {
                            return Ok(None);
                        };
                        resolved.push(item);
                    }
                    Ok(Some(Value::Array(resolved)))
                }
                Value::Object(entries) => {
                    let mut resolved = Map::new();
                    for (key, item) in entries {
                        let Some(item) = self.walk(item, context, ui).await? else {
                            return Ok(None);
                        };
                        resolved.insert(key.clone(), item);
                    }
                    Ok(Some(Value::Object(resolved)))
                }
                other => Ok(Some(other.clone())),
            }
        }
        .boxed_local()
    }
}
