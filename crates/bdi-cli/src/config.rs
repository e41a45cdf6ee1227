//! Simulation configuration, loaded from an optional YAML file.

use std::path::Path;

use anyhow::{Context, Result};
use bdi_core::AgentSettings;
use serde::{Deserialize, Serialize};

use crate::scenarios::Scenario;

/// Top-level configuration of a `bdi run`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub scenario: Scenario,

    /// Number of ticks to run
    #[serde(default = "default_iterations")]
    pub iterations: u64,

    /// Settings applied to every agent the scenario builds
    pub agent: AgentSettings,

    pub output: OutputConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            scenario: Scenario::default(),
            iterations: default_iterations(),
            agent: AgentSettings::default(),
            output: OutputConfig::default(),
        }
    }
}

fn default_iterations() -> u64 {
    1
}

/// How the history is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            pretty: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    /// One line per snapshot
    Summary,
}

impl SimConfig {
    /// Load from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        Ok(config)
    }

    /// Load from `path` if one is given, otherwise fall back to the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
