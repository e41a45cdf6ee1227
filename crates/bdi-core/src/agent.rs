use serde::{Deserialize, Serialize};

use crate::revision::{BeliefReviser, RevisionPolicy};
use crate::{
    Action, Actor, AgentError, AgentId, Belief, Beliefs, Desire, Desires, Goal, Goals,
    Intentions, Plan, PlanContext, Preference,
};

/// Goal revision: `(revised beliefs, current goals) -> goals`.
pub type GoalReviser = Box<dyn Fn(&Beliefs, Goals) -> Goals>;

/// The plain-data part of an agent's configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    /// Whether plan bodies may write the agent's own beliefs mid-cycle.
    pub self_updates_possible: bool,
    pub revision: RevisionPolicy,
    /// Recompute functional beliefs as part of every revision.
    pub functional_beliefs: bool,
    /// Whether the agent starts active.
    pub active: bool,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            self_updates_possible: true,
            revision: RevisionPolicy::default(),
            functional_beliefs: false,
            active: true,
        }
    }
}

/// A belief-desire-intention agent.
///
/// Each call to [`Agent::next`] is one reasoning cycle:
/// 1. revise beliefs with the update, then revise goals (both happen even while stopped);
/// 2. derive intentions, or use the beliefs directly when the agent has no desires;
/// 3. run every plan in order and collect the actions of those that fired.
pub struct Agent {
    id: AgentId,
    beliefs: Beliefs,
    desires: Desires,
    goals: Goals,
    plans: Vec<Plan>,
    /// `None` accepts every truthy desire.
    preference: Option<Preference>,
    revise_beliefs: BeliefReviser,
    revise_goals: GoalReviser,
    self_updates_possible: bool,
    active: bool,
    intentions: Intentions,
}

impl Agent {
    pub fn builder(id: impl Into<AgentId>) -> AgentBuilder {
        AgentBuilder::new(id)
    }

    pub fn id(&self) -> &AgentId {
        &self.id
    }

    pub fn beliefs(&self) -> &Beliefs {
        &self.beliefs
    }

    pub fn desires(&self) -> &Desires {
        &self.desires
    }

    pub fn goals(&self) -> &Goals {
        &self.goals
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    /// Intentions computed by the most recent active cycle.
    pub fn intentions(&self) -> &Intentions {
        &self.intentions
    }

    pub fn self_updates_possible(&self) -> bool {
        self.self_updates_possible
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn start(&mut self) {
        self.active = true;
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Run one reasoning cycle.
    ///
    /// Returns `Ok(None)` if the agent is stopped, otherwise the actions of every fired plan in
    /// plan order (possibly empty). A plan body that fails aborts the cycle; beliefs and goals
    /// stay revised.
    pub fn next(&mut self, update: Beliefs) -> Result<Option<Vec<Action>>, AgentError> {
        self.beliefs = (self.revise_beliefs)(&self.beliefs, &update);
        let goals = std::mem::take(&mut self.goals);
        self.goals = (self.revise_goals)(&self.beliefs, goals);

        if !self.active {
            tracing::debug!(agent = %self.id, "agent stopped, skipping deliberation");
            return Ok(None);
        }

        self.intentions = if self.desires.is_empty() {
            Intentions::from_beliefs(&self.beliefs)
        } else {
            match &self.preference {
                Some(preference) => Intentions::new(&self.beliefs, &self.desires, preference),
                None => Intentions::from_truthy_desires(&self.beliefs, &self.desires),
            }
        };

        let beliefs = if self.self_updates_possible {
            Some(&mut self.beliefs)
        } else {
            None
        };
        let mut ctx = PlanContext::new(&self.id, beliefs);

        let mut actions = Vec::new();
        for plan in &self.plans {
            if let Some(action) = plan.run(&self.intentions, &self.goals, &mut ctx)? {
                actions.push(action);
            }
        }

        tracing::debug!(
            agent = %self.id,
            intentions = ?self.intentions.ids().collect::<Vec<_>>(),
            actions = actions.len(),
            "reasoning cycle"
        );
        Ok(Some(actions))
    }
}

impl Actor for Agent {
    fn id(&self) -> &AgentId {
        Agent::id(self)
    }

    fn beliefs(&self) -> &Beliefs {
        Agent::beliefs(self)
    }

    fn next(&mut self, update: Beliefs) -> Result<Option<Vec<Action>>, AgentError> {
        Agent::next(self, update)
    }

    fn is_active(&self) -> bool {
        Agent::is_active(self)
    }

    fn start(&mut self) {
        Agent::start(self)
    }

    fn stop(&mut self) {
        Agent::stop(self)
    }
}

/// Named, optional construction of an [`Agent`].
///
/// Unset options fall back to: no desires (plans read beliefs directly), the
/// [`crate::default_preference`], simple non-monotonic revision, identity goal revision and
/// self-updates enabled.
pub struct AgentBuilder {
    id: AgentId,
    beliefs: Beliefs,
    desires: Desires,
    goals: Goals,
    plans: Vec<Plan>,
    preference: Option<Preference>,
    revise_beliefs: Option<BeliefReviser>,
    revise_goals: Option<GoalReviser>,
    settings: AgentSettings,
    overrides: SettingsOverrides,
}

/// Settings given one field at a time on the builder.
#[derive(Debug, Clone, Copy, Default)]
struct SettingsOverrides {
    self_updates_possible: Option<bool>,
    revision: Option<RevisionPolicy>,
    functional_beliefs: Option<bool>,
    active: Option<bool>,
}

impl SettingsOverrides {
    fn apply(self, settings: AgentSettings) -> AgentSettings {
        AgentSettings {
            self_updates_possible: self
                .self_updates_possible
                .unwrap_or(settings.self_updates_possible),
            revision: self.revision.unwrap_or(settings.revision),
            functional_beliefs: self.functional_beliefs.unwrap_or(settings.functional_beliefs),
            active: self.active.unwrap_or(settings.active),
        }
    }
}

impl AgentBuilder {
    pub fn new(id: impl Into<AgentId>) -> Self {
        Self {
            id: id.into(),
            beliefs: Beliefs::new(),
            desires: Desires::new(),
            goals: Goals::new(),
            plans: Vec::new(),
            preference: None,
            revise_beliefs: None,
            revise_goals: None,
            settings: AgentSettings::default(),
            overrides: SettingsOverrides::default(),
        }
    }

    /// Base settings. Fields set with [`AgentBuilder::self_updates`], [`AgentBuilder::revision`],
    /// [`AgentBuilder::functional_beliefs`] or [`AgentBuilder::active`] take precedence, before or
    /// after this call.
    pub fn settings(mut self, settings: AgentSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn beliefs(mut self, beliefs: Beliefs) -> Self {
        self.beliefs = beliefs;
        self
    }

    pub fn belief(mut self, belief: impl Into<Belief>) -> Self {
        self.beliefs.insert(belief);
        self
    }

    pub fn desires(mut self, desires: Desires) -> Self {
        self.desires = desires;
        self
    }

    pub fn desire(mut self, desire: Desire) -> Self {
        self.desires.push(desire);
        self
    }

    pub fn plans(mut self, plans: impl IntoIterator<Item = Plan>) -> Self {
        self.plans.extend(plans);
        self
    }

    pub fn plan(mut self, plan: Plan) -> Self {
        self.plans.push(plan);
        self
    }

    pub fn preference<F>(mut self, preference: F) -> Self
    where
        F: Fn(&Beliefs, &Desires, &str) -> bool + 'static,
    {
        self.preference = Some(Box::new(preference));
        self
    }

    pub fn self_updates(mut self, possible: bool) -> Self {
        self.overrides.self_updates_possible = Some(possible);
        self
    }

    pub fn revision(mut self, policy: RevisionPolicy) -> Self {
        self.overrides.revision = Some(policy);
        self
    }

    pub fn functional_beliefs(mut self, enabled: bool) -> Self {
        self.overrides.functional_beliefs = Some(enabled);
        self
    }

    /// Use a custom revision function instead of a named [`RevisionPolicy`].
    pub fn revise_beliefs<F>(mut self, revise: F) -> Self
    where
        F: Fn(&Beliefs, &Beliefs) -> Beliefs + 'static,
    {
        self.revise_beliefs = Some(Box::new(revise));
        self
    }

    pub fn goals(mut self, goals: Goals) -> Self {
        self.goals = goals;
        self
    }

    pub fn goal(mut self, goal: Goal) -> Self {
        self.goals.insert(goal);
        self
    }

    pub fn revise_goals<F>(mut self, revise: F) -> Self
    where
        F: Fn(&Beliefs, Goals) -> Goals + 'static,
    {
        self.revise_goals = Some(Box::new(revise));
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.overrides.active = Some(active);
        self
    }

    pub fn build(self) -> Agent {
        let settings = self.overrides.apply(self.settings);
        let revise_beliefs = self
            .revise_beliefs
            .unwrap_or_else(|| settings.revision.reviser(settings.functional_beliefs));

        Agent {
            id: self.id,
            beliefs: self.beliefs,
            desires: self.desires,
            goals: self.goals,
            plans: self.plans,
            preference: self.preference,
            revise_beliefs,
            revise_goals: self
                .revise_goals
                .unwrap_or_else(|| Box::new(|_: &Beliefs, goals: Goals| goals)),
            self_updates_possible: settings.self_updates_possible,
            active: settings.active,
            intentions: Intentions::default(),
        }
    }
}
