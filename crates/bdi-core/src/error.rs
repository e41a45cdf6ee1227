use crate::AgentId;

/// Failures raised during a reasoning cycle.
///
/// These are contract violations, not recoverable conditions: they abort the cycle and, when the
/// agent is driven by an environment, the whole run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgentError {
    #[error("agent `{agent}` does not allow self-updates; a plan tried to write its beliefs")]
    SelfUpdatesDisabled { agent: AgentId },

    #[error("plan of agent `{agent}` failed: {message}")]
    Plan { agent: AgentId, message: String },
}

impl AgentError {
    /// Build a plan failure from inside a plan body.
    pub fn plan(agent: &AgentId, message: impl Into<String>) -> Self {
        AgentError::Plan {
            agent: agent.clone(),
            message: message.into(),
        }
    }
}
