//! Built-in demo scenarios.

mod dog;
mod door;
mod gossip;

use bdi_core::AgentSettings;
use bdi_env::{Environment, EnvironmentError};
use serde::{Deserialize, Serialize};

pub use gossip::GOSSIP_AGENTS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// A human who praises and feeds a dog, and the dog
    #[default]
    Dog,
    /// A porter who locks and unlocks a door on request
    Door,
    /// A ring of agents spreading an opinion
    Gossip,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [Scenario::Dog, Scenario::Door, Scenario::Gossip];

    pub fn name(self) -> &'static str {
        match self {
            Scenario::Dog => "dog",
            Scenario::Door => "door",
            Scenario::Gossip => "gossip",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Scenario::Dog => "a human praises or feeds a dog, the dog eats when fed",
            Scenario::Door => {
                "a porter locks or unlocks a door on request; a paranoid and a claustrophobic agent disagree"
            }
            Scenario::Gossip => "a ring of agents adopts the majority opinion of its neighbours",
        }
    }

    /// Build the scenario's environment. `settings` is applied to every agent before the
    /// scenario's own requirements.
    pub fn build(self, settings: AgentSettings) -> Result<Environment, EnvironmentError> {
        match self {
            Scenario::Dog => dog::build(settings),
            Scenario::Door => door::build(settings),
            Scenario::Gossip => gossip::build(settings),
        }
    }
}
