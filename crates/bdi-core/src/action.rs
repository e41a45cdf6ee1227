use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::AgentId;

/// A message addressed to another agent, routed through the environment's mailbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub agent_id: AgentId,
    pub message: Value,
}

/// The result of one fired plan.
///
/// `payload` is opaque to the core and is interpreted by the environment's update function.
/// `messages` is the only part the environment itself acts on.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Action {
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub payload: Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<Message>,
}

impl Action {
    pub fn new(payload: impl Into<Value>) -> Self {
        Self {
            payload: payload.into(),
            messages: Vec::new(),
        }
    }

    pub fn with_message(mut self, agent_id: impl Into<AgentId>, message: impl Into<Value>) -> Self {
        self.messages.push(Message {
            agent_id: agent_id.into(),
            message: message.into(),
        });
        self
    }

    pub fn has_messages(&self) -> bool {
        !self.messages.is_empty()
    }

    /// `true` if the payload equals `item` or is an array containing it.
    pub fn includes(&self, item: impl Into<Value>) -> bool {
        let item = item.into();
        match &self.payload {
            Value::Array(items) => items.contains(&item),
            other => *other == item,
        }
    }
}
