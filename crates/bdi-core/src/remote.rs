use std::fmt;

use crate::revision::revise_simple_nonmonotonic;
use crate::{Action, Actor, AgentError, AgentId, Beliefs};

/// Stand-in for an agent whose reasoning happens elsewhere (another process, a client, a
/// service).
///
/// The environment drives it exactly like a local [`crate::Agent`]. Every update is merged into
/// the local belief copy, and the merged beliefs are handed to `next`, which speaks to the
/// remote side.
pub struct RemoteAgent {
    id: AgentId,
    beliefs: Beliefs,
    next: Box<dyn FnMut(&Beliefs) -> Vec<Action>>,
    active: bool,
}

impl RemoteAgent {
    pub fn new<F>(id: impl Into<AgentId>, beliefs: Beliefs, next: F) -> Self
    where
        F: FnMut(&Beliefs) -> Vec<Action> + 'static,
    {
        Self {
            id: id.into(),
            beliefs,
            next: Box::new(next),
            active: true,
        }
    }
}

impl fmt::Debug for RemoteAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteAgent")
            .field("id", &self.id)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl Actor for RemoteAgent {
    fn id(&self) -> &AgentId {
        &self.id
    }

    fn beliefs(&self) -> &Beliefs {
        &self.beliefs
    }

    fn next(&mut self, update: Beliefs) -> Result<Option<Vec<Action>>, AgentError> {
        self.beliefs = revise_simple_nonmonotonic(&self.beliefs, &update);
        if !self.active {
            return Ok(None);
        }
        Ok(Some((self.next)(&self.beliefs)))
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn start(&mut self) {
        self.active = true;
    }

    fn stop(&mut self) {
        self.active = false;
    }
}
