use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

use bdi_core::{Action, Actor, AgentId, Beliefs};
use serde_json::{Map, Value};

use crate::state::state_to_beliefs;
use crate::{EnvironmentError, LogRender, LoopRunner, Render, Runner, State};

/// Maps the actions one agent produced in a tick to a world-state delta:
/// `(actions, agent id, current state) -> delta`.
pub type Update = Box<dyn Fn(&[Action], &AgentId, &State) -> Map<String, Value>>;

/// Decides what an agent gets to see: `(state view, agent id, agent beliefs) -> belief update`.
pub type StateFilter = Box<dyn Fn(&State, &AgentId, &Beliefs) -> Beliefs>;

/// Turn-based scheduler over a fixed, ordered set of agents.
///
/// Every tick lets each agent act once, in registration order:
/// 1. the state filter turns the agent's view of the state into a belief update;
/// 2. the agent reasons and returns its actions (a stopped agent counts as no actions);
/// 3. the agent's outgoing mailbox slots are cleared and its new messages are posted;
/// 4. the update function turns the actions into a delta that is merged into the state.
///
/// After the last agent the state is appended to the history and rendered.
pub struct Environment {
    agents: Vec<Box<dyn Actor>>,
    state: State,
    update: Update,
    render: Box<dyn Render>,
    state_filter: StateFilter,
    runner: Rc<dyn Runner>,
    history: Vec<State>,
}

impl Environment {
    pub fn builder(state: impl Into<State>) -> EnvironmentBuilder {
        EnvironmentBuilder::new(state)
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Snapshots of the state, oldest first.
    pub fn history(&self) -> &[State] {
        &self.history
    }

    /// Registered agents, in the order they act.
    pub fn agents(&self) -> &[Box<dyn Actor>] {
        &self.agents
    }

    pub fn agent(&self, id: &str) -> Option<&dyn Actor> {
        let agent = self.agents.iter().find(|agent| agent.id() == id)?;
        Some(agent.as_ref())
    }

    pub fn agent_mut(&mut self, id: &str) -> Option<&mut dyn Actor> {
        let agent = self.agents.iter_mut().find(|agent| agent.id() == id)?;
        Some(agent.as_mut())
    }

    /// Run `iterations` ticks, or run until a tick fails when `iterations` is `None` or zero.
    ///
    /// The state before the first tick is recorded once, so the first run of `n` ticks leaves
    /// `n + 1` snapshots in the history.
    pub fn run(&mut self, iterations: Option<u64>) -> Result<&[State], EnvironmentError> {
        if self.history.is_empty() {
            self.history.push(self.state.clone());
        }
        let iterations = iterations.filter(|n| *n > 0);
        let runner = Rc::clone(&self.runner);
        runner.drive(iterations, &mut || self.tick())?;
        Ok(&self.history)
    }

    /// Let every agent act once, then record and render the state.
    pub fn tick(&mut self) -> Result<(), EnvironmentError> {
        for index in 0..self.agents.len() {
            let agent = &mut self.agents[index];
            let id = agent.id().clone();
            let view = self.state.view_for(id.as_str());
            let update = (self.state_filter)(&view, &id, agent.beliefs());
            let actions = agent.next(update)?.unwrap_or_default();

            self.deliver(&id, &actions)?;
            let delta = (self.update)(&actions, &id, &self.state);
            self.state.merge(delta);
        }

        self.history.push(self.state.clone());
        self.render.render(&self.state);
        Ok(())
    }

    /// Clear `sender`'s outgoing slots, then post every message its actions carry.
    ///
    /// Every recipient is checked first; an unknown one leaves the mailbox untouched.
    fn deliver(&mut self, sender: &AgentId, actions: &[Action]) -> Result<(), EnvironmentError> {
        let messages = actions.iter().flat_map(|action| &action.messages);
        if let Some(unknown) = messages
            .clone()
            .find(|message| !self.state.messages.accepts(message.agent_id.as_str()))
        {
            return Err(EnvironmentError::UnknownRecipient {
                sender: sender.clone(),
                recipient: unknown.agent_id.clone(),
            });
        }

        self.state.messages.clear_outgoing(sender);
        for message in messages {
            tracing::trace!(from = %sender, to = %message.agent_id, "posting message");
            self.state
                .messages
                .post(sender, &message.agent_id, message.message.clone());
        }
        Ok(())
    }

    /// Forget the history. Agents and the world state are left as they are.
    pub fn reset(&mut self) {
        self.history.clear();
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("agents", &self.agents.iter().map(|a| a.id().clone()).collect::<Vec<_>>())
            .field("state", &self.state)
            .field("history", &self.history.len())
            .finish_non_exhaustive()
    }
}

/// Construction of an [`Environment`]. Only the initial state is required.
///
/// Defaults: no world updates, [`LogRender`], [`state_to_beliefs`] and [`LoopRunner`].
///
/// Mailbox slots in the initial state are kept only for registered agents, so a message can
/// never reach an id the environment does not drive.
pub struct EnvironmentBuilder {
    state: State,
    agents: Vec<Box<dyn Actor>>,
    update: Option<Update>,
    render: Option<Box<dyn Render>>,
    state_filter: Option<StateFilter>,
    runner: Option<Rc<dyn Runner>>,
}

impl EnvironmentBuilder {
    pub fn new(state: impl Into<State>) -> Self {
        Self {
            state: state.into(),
            agents: Vec::new(),
            update: None,
            render: None,
            state_filter: None,
            runner: None,
        }
    }

    pub fn agent(mut self, agent: impl Actor) -> Self {
        self.agents.push(Box::new(agent));
        self
    }

    pub fn agents(mut self, agents: impl IntoIterator<Item = Box<dyn Actor>>) -> Self {
        self.agents.extend(agents);
        self
    }

    pub fn update<F>(mut self, update: F) -> Self
    where
        F: Fn(&[Action], &AgentId, &State) -> Map<String, Value> + 'static,
    {
        self.update = Some(Box::new(update));
        self
    }

    pub fn render(mut self, render: impl Render + 'static) -> Self {
        self.render = Some(Box::new(render));
        self
    }

    pub fn state_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&State, &AgentId, &Beliefs) -> Beliefs + 'static,
    {
        self.state_filter = Some(Box::new(filter));
        self
    }

    pub fn runner(mut self, runner: impl Runner + 'static) -> Self {
        self.runner = Some(Rc::new(runner));
        self
    }

    pub fn build(self) -> Result<Environment, EnvironmentError> {
        let mut seen = BTreeSet::new();
        for agent in &self.agents {
            if !seen.insert(agent.id().clone()) {
                return Err(EnvironmentError::DuplicateAgent(agent.id().clone()));
            }
        }

        let mut state = self.state;
        let dropped = state.messages.retain_agents(&seen);
        if dropped > 0 {
            tracing::warn!(
                target: "bdi::mailbox",
                dropped,
                "initial mailbox held messages for unregistered agents; discarding them"
            );
        }
        state.messages.register(self.agents.iter().map(|agent| agent.id()));

        Ok(Environment {
            agents: self.agents,
            state,
            update: self
                .update
                .unwrap_or_else(|| Box::new(|_: &[Action], _: &AgentId, _: &State| Map::new())),
            render: self.render.unwrap_or_else(|| Box::new(LogRender::default())),
            state_filter: self
                .state_filter
                .unwrap_or_else(|| Box::new(state_to_beliefs)),
            runner: self.runner.unwrap_or_else(|| Rc::new(LoopRunner)),
            history: Vec::new(),
        })
    }
}
