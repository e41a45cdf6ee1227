use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Action, AgentError, Beliefs};

/// Stable identifier for an agent.
///
/// Ordering is the string ordering of the id; registration order is tracked separately by the
/// environment.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(String);

impl AgentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for AgentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AgentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for AgentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&AgentId> for AgentId {
    fn from(value: &AgentId) -> Self {
        value.clone()
    }
}

impl PartialEq<str> for AgentId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for AgentId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Anything an environment can drive: a local [`crate::Agent`] or a [`crate::RemoteAgent`].
///
/// The environment cannot tell implementations apart; it only relies on this contract.
pub trait Actor: 'static {
    fn id(&self) -> &AgentId;

    fn beliefs(&self) -> &Beliefs;

    /// Run one cycle with `update` as the incoming belief update.
    ///
    /// Returns `Ok(None)` when the actor is stopped. Belief revision still happens in that case.
    fn next(&mut self, update: Beliefs) -> Result<Option<Vec<Action>>, AgentError>;

    fn is_active(&self) -> bool;

    fn start(&mut self);

    fn stop(&mut self);
}
