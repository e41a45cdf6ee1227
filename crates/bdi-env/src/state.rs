use bdi_core::{AgentId, Belief, Beliefs};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Mailbox;

/// Key under which the mailbox appears in a serialized state, and under which an agent's inbox
/// appears in its belief update.
pub const MESSAGES: &str = "messages";

/// World state shared by every agent of an environment.
///
/// Serializes as one flat JSON object: the world fields plus the mailbox under `messages`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    #[serde(default)]
    pub messages: Mailbox,
}

impl State {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self {
            fields,
            messages: Mailbox::new(),
        }
    }

    /// Build a state from a JSON object such as `json!({ "door": "locked" })`.
    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn to_json(&self) -> Value {
        let mut object = self.fields.clone();
        // Mailbox keys are plain strings, so this cannot fail.
        let messages = serde_json::to_value(&self.messages).unwrap_or_default();
        object.insert(MESSAGES.to_string(), messages);
        Value::Object(object)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Shallow merge of an update delta: every key of `delta` overwrites the field of the same
    /// name.
    ///
    /// The mailbox belongs to the environment, so a `messages` key is dropped with a warning.
    pub fn merge(&mut self, delta: Map<String, Value>) {
        for (key, value) in delta {
            if key == MESSAGES {
                tracing::warn!(
                    target: "bdi::state",
                    "update tried to overwrite the mailbox; ignoring `{MESSAGES}`"
                );
                continue;
            }
            self.fields.insert(key, value);
        }
    }

    /// The state as `agent` is allowed to see it: every inbox but its own is emptied.
    pub fn view_for(&self, agent: &str) -> Self {
        Self {
            fields: self.fields.clone(),
            messages: self.messages.view_for(agent),
        }
    }
}

impl From<Map<String, Value>> for State {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

/// The default state filter: full observability of the world fields.
///
/// Every field becomes a plain belief, and the agent's inbox becomes a `messages` belief of the
/// form `{ sender: [messages...] }`.
pub fn state_to_beliefs(view: &State, agent: &AgentId, _beliefs: &Beliefs) -> Beliefs {
    let mut update = Beliefs::from_json(&view.fields);
    update.insert(Belief::new(
        MESSAGES,
        Value::Object(view.messages.inbox_json(agent.as_str())),
    ));
    update
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn state_serializes_flat() {
        let ids = [AgentId::new("a")];
        let mut state = State::from_json(json!({ "door": "locked" })).unwrap();
        state.messages.register(&ids);
        state.messages.post(&ids[0], &ids[0], json!("ping"));

        let value = state.to_json();
        assert_eq!(value, json!({ "door": "locked", "messages": { "a": { "a": ["ping"] } } }));
        assert_eq!(State::from_json(value).unwrap(), state);
        assert_eq!(serde_json::to_value(&state).unwrap(), state.to_json());
    }

    #[test]
    fn merge_skips_the_mailbox() {
        let mut state = State::from_json(json!({ "a": 1, "b": 2 })).unwrap();
        let delta = json!({ "b": 3, "c": 4, "messages": {} });
        state.merge(delta.as_object().unwrap().clone());
        assert_eq!(state.fields, *json!({ "a": 1, "b": 3, "c": 4 }).as_object().unwrap());
    }
}
