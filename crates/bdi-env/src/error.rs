use bdi_core::{AgentError, AgentId};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EnvironmentError {
    #[error("agent `{0}` is registered more than once")]
    DuplicateAgent(AgentId),

    #[error("agent `{sender}` sent a message to unregistered agent `{recipient}`")]
    UnknownRecipient { sender: AgentId, recipient: AgentId },

    #[error(transparent)]
    Agent(#[from] AgentError),
}
