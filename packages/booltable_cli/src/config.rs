use std::{fs, path::Path};

use anyhow::Context;
use booltable::truth_table::DEFAULT_MAX_VARIABLES;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Settings read from `--config`; command-line flags take precedence.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Largest variable count a table may be built for.
    pub max_variables: usize,
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_variables: DEFAULT_MAX_VARIABLES,
            format: OutputFormat::Text,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        Self::from_json(&content)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}
