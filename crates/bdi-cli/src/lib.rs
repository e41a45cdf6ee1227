//! Library half of the `bdi` command: configuration, demo scenarios and output formatting.

#![forbid(unsafe_code)]

pub mod config;
pub mod output;
pub mod scenarios;

use anyhow::{ensure, Context, Result};
use bdi_env::State;

pub use config::{OutputConfig, OutputFormat, SimConfig};
pub use scenarios::Scenario;

/// Build the configured scenario and run it, returning the full history.
pub fn simulate(config: &SimConfig) -> Result<Vec<State>> {
    ensure!(config.iterations > 0, "iterations must be at least 1");

    let mut env = config
        .scenario
        .build(config.agent)
        .with_context(|| format!("Failed to set up scenario `{}`", config.scenario.name()))?;
    tracing::info!(
        scenario = config.scenario.name(),
        iterations = config.iterations,
        agents = env.agents().len(),
        "starting run"
    );

    let history = env
        .run(Some(config.iterations))
        .with_context(|| format!("Scenario `{}` failed", config.scenario.name()))?;
    Ok(history.to_vec())
}
