//! List the configured argument sets.

use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;
use serde::Serialize;

use super::CliConfig;
use crate::config::{ConfigSource, Settings};
use crate::constants::ARGUMENTS_SETTING;
use crate::picker::{FixedSet, ItemSource, RecencyTracker};
use crate::utils::value::get_string;

/// Output format for `recently list`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Text,
    /// JSON array
    Json,
}

/// Show the argument sets in the order the picker offers them.
#[derive(Args, Debug)]
pub struct ListCommand {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct ListEntry {
    name: String,
    label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    command: Option<String>,
}

impl ListCommand {
    /// Execute the list command.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be loaded.
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let settings = config.load_settings().await?;
        print!("{}", self.render(&settings)?);
        Ok(())
    }

    fn entries(settings: &Settings) -> Vec<ListEntry> {
        let Some(arguments) = settings.get(ARGUMENTS_SETTING) else {
            return Vec::new();
        };
        FixedSet
            .construct(&arguments, &RecencyTracker::new())
            .into_iter()
            .map(|candidate| ListEntry {
                command: arguments.get(&candidate.key).and_then(|b| get_string(b, "command")),
                name: candidate.key,
                label: candidate.label,
                description: candidate.description,
            })
            .collect()
    }

    fn render(&self, settings: &Settings) -> Result<String> {
        let entries = Self::entries(settings);
        if self.format == OutputFormat::Json {
            return Ok(format!("{}\n", serde_json::to_string_pretty(&entries)?));
        }

        if entries.is_empty() {
            let source = settings
                .path()
                .map_or_else(|| "no settings file found".to_string(), |p| p.display().to_string());
            return Ok(format!("No argument sets configured ({source})\n"));
        }

        let mut output = String::new();
        for entry in entries {
            output.push_str(&entry.name.bold().to_string());
            if entry.label != entry.name {
                output.push_str(&format!("  {}", entry.label));
            }
            if let Some(description) = &entry.description {
                output.push_str(&format!("  {}", description.dimmed()));
            }
            if let Some(command) = &entry.command {
                output.push_str(&format!("  [{}]", command.cyan()));
            }
            output.push('\n');
        }
        Ok(output)
    }
}
