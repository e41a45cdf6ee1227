//! A ring of agents that tell their neighbours what they think and adopt the local majority.
//!
//! Every agent runs priority revision with functional beliefs. `majority` is a functional belief
//! recomputed from the agent's own opinion and the opinions in its inbox. Opinions arriving from
//! the world carry a higher priority than the one an ordinary agent holds, so they replace its
//! value. The stubborn agent holds a locked opinion and never changes its mind.

use std::collections::BTreeMap;

use bdi_core::{
    Action, Agent, AgentId, AgentSettings, Belief, Beliefs, FunctionalBelief, Plan, Priority,
    RevisionPolicy,
};
use bdi_env::{Environment, EnvironmentError, State, MESSAGES};
use serde_json::{json, Map, Value};

/// Agents of the ring, in acting order, with their opinion and whether they are stubborn.
pub const GOSSIP_AGENTS: [(&str, &str, bool); 6] = [
    ("ada", "red", true),
    ("bob", "blue", false),
    ("cy", "blue", false),
    ("dee", "red", false),
    ("eve", "blue", false),
    ("fay", "red", false),
];

const OPINION: &str = "opinion";
const MAJORITY: &str = "majority";
const OPINIONS: &str = "opinions";

/// The most frequent opinion among the agent's own and the ones it was told. Ties keep the
/// agent's own opinion; a locked opinion always wins.
fn majority(_old: &Beliefs, new: &Beliefs) -> Value {
    let Some(own) = new.get(OPINION) else {
        return Value::Null;
    };
    if own.priority == Some(Priority::Locked) {
        return own.value.clone();
    }

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    *counts.entry(own.value.to_string()).or_default() += 1;
    let heard = new
        .value(MESSAGES)
        .and_then(Value::as_object)
        .into_iter()
        .flat_map(|inbox| inbox.values())
        .filter_map(Value::as_array)
        .flatten();
    let mut values: BTreeMap<String, Value> = BTreeMap::new();
    for opinion in heard {
        *counts.entry(opinion.to_string()).or_default() += 1;
        values.insert(opinion.to_string(), opinion.clone());
    }

    let own_count = counts[&own.value.to_string()];
    counts
        .into_iter()
        .filter(|(_, count)| *count > own_count)
        .max_by_key(|(_, count)| *count)
        .and_then(|(key, _)| values.remove(&key))
        .unwrap_or_else(|| own.value.clone())
}

fn gossiper(
    id: &str,
    opinion: &str,
    stubborn: bool,
    neighbours: [String; 2],
    settings: AgentSettings,
) -> Agent {
    let priority = if stubborn { Priority::Locked } else { Priority::Level(1.0) };
    Agent::builder(id)
        .settings(settings)
        .revision(RevisionPolicy::Priority)
        .functional_beliefs(true)
        .belief(Belief::with_priority(OPINION, opinion, priority))
        .belief(FunctionalBelief::new(MAJORITY, opinion, majority, 0))
        .plan(Plan::condition(
            |_| true,
            move |intentions, _| {
                let opinion = intentions.get(OPINION).cloned().unwrap_or_default();
                let majority = intentions.get(MAJORITY).cloned().unwrap_or_default();
                let [left, right] = &neighbours;
                Ok(Action::new(json!({ MAJORITY: majority }))
                    .with_message(left.as_str(), opinion.clone())
                    .with_message(right.as_str(), opinion))
            },
        ))
        .build()
}

/// Each agent observes its inbox and the opinion the world last recorded for it.
fn observe(view: &State, agent: &AgentId, _beliefs: &Beliefs) -> Beliefs {
    let inbox = view.messages.inbox_json(agent.as_str());
    let mut update = Beliefs::new().with(Belief::new(MESSAGES, Value::Object(inbox)));
    if let Some(opinion) = view.get(OPINIONS).and_then(|opinions| opinions.get(agent.as_str())) {
        update.insert(Belief::with_priority(OPINION, opinion.clone(), 2));
    }
    update
}

fn update(actions: &[Action], agent: &AgentId, state: &State) -> Map<String, Value> {
    let Some(majority) = actions.iter().find_map(|action| action.payload.get(MAJORITY)) else {
        return Map::new();
    };
    let mut opinions = state
        .get(OPINIONS)
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    opinions.insert(agent.to_string(), majority.clone());

    let mut delta = Map::new();
    delta.insert(OPINIONS.into(), Value::Object(opinions));
    delta
}

pub(super) fn build(settings: AgentSettings) -> Result<Environment, EnvironmentError> {
    let opinions: Map<String, Value> = GOSSIP_AGENTS
        .iter()
        .map(|(id, opinion, _)| (id.to_string(), json!(opinion)))
        .collect();
    let mut world = Map::new();
    world.insert(OPINIONS.into(), Value::Object(opinions));

    let ring = GOSSIP_AGENTS.len();
    let mut builder = Environment::builder(world);
    for (index, (id, opinion, stubborn)) in GOSSIP_AGENTS.into_iter().enumerate() {
        let left = GOSSIP_AGENTS[(index + ring - 1) % ring].0.to_string();
        let right = GOSSIP_AGENTS[(index + 1) % ring].0.to_string();
        builder = builder.agent(gossiper(id, opinion, stubborn, [left, right], settings));
    }

    builder.state_filter(observe).update(update).build()
}
