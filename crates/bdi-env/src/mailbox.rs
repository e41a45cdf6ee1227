use std::collections::{BTreeMap, BTreeSet};

use bdi_core::AgentId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Messages waiting for one recipient, keyed by sender.
pub type Inbox = BTreeMap<AgentId, Vec<Value>>;

/// Every message in flight: recipient to sender to messages.
///
/// Once agents are registered the mailbox holds a (possibly empty) slot for every ordered pair of
/// them, an agent paired with itself included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mailbox {
    slots: BTreeMap<AgentId, Inbox>,
}

impl Mailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mailbox with an empty slot for every ordered pair of `agents`.
    pub fn for_agents<'a>(agents: impl IntoIterator<Item = &'a AgentId> + Clone) -> Self {
        let mut mailbox = Self::new();
        mailbox.register(agents);
        mailbox
    }

    /// Add the missing slots for every ordered pair of `agents`. Existing messages are kept.
    pub fn register<'a>(&mut self, agents: impl IntoIterator<Item = &'a AgentId> + Clone) {
        for recipient in agents.clone() {
            let inbox = self.slots.entry(recipient.clone()).or_default();
            for sender in agents.clone() {
                inbox.entry(sender.clone()).or_default();
            }
        }
    }

    /// Drop every inbox and slot that does not belong to one of `agents`, returning the number of
    /// messages discarded with them.
    pub fn retain_agents(&mut self, agents: &BTreeSet<AgentId>) -> usize {
        let mut dropped = 0;
        self.slots.retain(|recipient, inbox| {
            if !agents.contains(recipient) {
                dropped += inbox.values().map(Vec::len).sum::<usize>();
                return false;
            }
            inbox.retain(|sender, messages| {
                let keep = agents.contains(sender);
                if !keep {
                    dropped += messages.len();
                }
                keep
            });
            true
        });
        dropped
    }

    pub fn accepts(&self, recipient: &str) -> bool {
        self.slots.contains_key(recipient)
    }

    pub fn inbox(&self, recipient: &str) -> Option<&Inbox> {
        self.slots.get(recipient)
    }

    /// Messages from `sender` currently waiting for `recipient`.
    pub fn messages(&self, recipient: &str, sender: &str) -> &[Value] {
        self.slots
            .get(recipient)
            .and_then(|inbox| inbox.get(sender))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Empty the slot `sender` owns in every recipient's inbox.
    pub fn clear_outgoing(&mut self, sender: &AgentId) {
        for inbox in self.slots.values_mut() {
            if let Some(slot) = inbox.get_mut(sender) {
                slot.clear();
            }
        }
    }

    /// Append a message. Returns `false`, leaving the mailbox unchanged, if `recipient` has no
    /// inbox.
    pub fn post(&mut self, sender: &AgentId, recipient: &AgentId, message: Value) -> bool {
        match self.slots.get_mut(recipient) {
            Some(inbox) => {
                inbox.entry(sender.clone()).or_default().push(message);
                true
            }
            None => false,
        }
    }

    /// Copy of the mailbox in which only `agent`'s own inbox keeps its messages.
    pub fn view_for(&self, agent: &str) -> Self {
        let slots = self
            .slots
            .iter()
            .map(|(recipient, inbox)| {
                let inbox = if recipient == agent {
                    inbox.clone()
                } else {
                    inbox.keys().map(|sender| (sender.clone(), Vec::new())).collect()
                };
                (recipient.clone(), inbox)
            })
            .collect();
        Self { slots }
    }

    /// Number of messages waiting across all inboxes.
    pub fn len(&self) -> usize {
        self.slots
            .values()
            .flat_map(|inbox| inbox.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `agent`'s inbox as a JSON object `{ sender: [messages...] }`.
    pub fn inbox_json(&self, agent: &str) -> Map<String, Value> {
        self.inbox(agent)
            .into_iter()
            .flatten()
            .map(|(sender, messages)| (sender.to_string(), Value::Array(messages.clone())))
            .collect()
    }
}
