use std::fmt;

use serde_json::Value;

use crate::{Action, AgentError, AgentId, Beliefs, Goals, Intentions};

/// What a plan body may touch besides the intentions it is handed.
///
/// Write access to the owning agent's beliefs is a capability: it is present only when the agent
/// allows self-updates. Asking for it otherwise fails with
/// [`AgentError::SelfUpdatesDisabled`], which aborts the cycle.
pub struct PlanContext<'a> {
    agent: &'a AgentId,
    beliefs: Option<&'a mut Beliefs>,
    goal_value: Option<Value>,
}

impl<'a> PlanContext<'a> {
    pub fn new(agent: &'a AgentId, beliefs: Option<&'a mut Beliefs>) -> Self {
        Self {
            agent,
            beliefs,
            goal_value: None,
        }
    }

    pub fn agent_id(&self) -> &AgentId {
        self.agent
    }

    /// Payload of the goal that fired the plan, if the plan is goal-driven.
    pub fn goal_value(&self) -> Option<&Value> {
        self.goal_value.as_ref()
    }

    pub fn can_update_self(&self) -> bool {
        self.beliefs.is_some()
    }

    pub fn beliefs_mut(&mut self) -> Result<&mut Beliefs, AgentError> {
        match self.beliefs.as_deref_mut() {
            Some(beliefs) => Ok(beliefs),
            None => Err(AgentError::SelfUpdatesDisabled {
                agent: self.agent.clone(),
            }),
        }
    }
}

/// The guard of a plan.
pub enum PlanHead {
    /// Fires iff the predicate over the intentions returns `true`.
    Condition(Box<dyn Fn(&Intentions) -> bool>),
    /// Fires iff the intention with this id holds exactly `true`.
    Intention(String),
    /// Fires iff the agent currently holds an active goal with this id.
    Goal(String),
}

impl fmt::Debug for PlanHead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanHead::Condition(_) => f.write_str("Condition(..)"),
            PlanHead::Intention(id) => f.debug_tuple("Intention").field(id).finish(),
            PlanHead::Goal(id) => f.debug_tuple("Goal").field(id).finish(),
        }
    }
}

pub type PlanBody = Box<dyn Fn(&Intentions, &mut PlanContext<'_>) -> Result<Action, AgentError>>;

/// A guarded action: the body runs only when the head holds.
///
/// Plans keep no state of their own.
pub struct Plan {
    head: PlanHead,
    body: PlanBody,
}

impl Plan {
    pub fn new<F>(head: PlanHead, body: F) -> Self
    where
        F: Fn(&Intentions, &mut PlanContext<'_>) -> Result<Action, AgentError> + 'static,
    {
        Self {
            head,
            body: Box::new(body),
        }
    }

    pub fn condition<H, F>(head: H, body: F) -> Self
    where
        H: Fn(&Intentions) -> bool + 'static,
        F: Fn(&Intentions, &mut PlanContext<'_>) -> Result<Action, AgentError> + 'static,
    {
        Self::new(PlanHead::Condition(Box::new(head)), body)
    }

    pub fn when<F>(intention: impl Into<String>, body: F) -> Self
    where
        F: Fn(&Intentions, &mut PlanContext<'_>) -> Result<Action, AgentError> + 'static,
    {
        Self::new(PlanHead::Intention(intention.into()), body)
    }

    pub fn for_goal<F>(goal: impl Into<String>, body: F) -> Self
    where
        F: Fn(&Intentions, &mut PlanContext<'_>) -> Result<Action, AgentError> + 'static,
    {
        Self::new(PlanHead::Goal(goal.into()), body)
    }

    pub fn head(&self) -> &PlanHead {
        &self.head
    }

    /// Run the plan against this cycle's intentions.
    ///
    /// Returns `Ok(None)` when the head does not hold. Goal heads are resolved against `goals`,
    /// and the goal's payload is exposed through [`PlanContext::goal_value`] while the body runs.
    pub fn run(
        &self,
        intentions: &Intentions,
        goals: &Goals,
        ctx: &mut PlanContext<'_>,
    ) -> Result<Option<Action>, AgentError> {
        let fires = match &self.head {
            PlanHead::Condition(predicate) => predicate(intentions),
            PlanHead::Intention(id) => intentions.is_true(id),
            PlanHead::Goal(id) => match goals.get(id) {
                Some(goal) if goal.is_active => {
                    ctx.goal_value = goal.value.clone();
                    true
                }
                _ => false,
            },
        };
        if !fires {
            return Ok(None);
        }

        let result = (self.body)(intentions, ctx);
        ctx.goal_value = None;
        result.map(Some)
    }
}

impl fmt::Debug for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plan").field("head", &self.head).finish_non_exhaustive()
    }
}
