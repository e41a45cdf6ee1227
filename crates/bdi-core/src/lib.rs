//! Deterministic belief-desire-intention reasoning primitives.
//!
//! An [`Agent`] revises its [`Beliefs`] with every update it receives, filters its [`Desires`]
//! into [`Intentions`] through a preference function, and fires every [`Plan`] whose head holds.
//! Everything is single-threaded and synchronous: one call to [`Agent::next`] is one full
//! reasoning cycle.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod action;
pub mod actor;
pub mod agent;
pub mod belief;
pub mod desire;
pub mod diagnostics;
pub mod error;
pub mod goal;
pub mod intentions;
pub mod json;
pub mod plan;
pub mod remote;
pub mod revision;

pub use action::{Action, Message};
pub use actor::{Actor, AgentId};
pub use agent::{Agent, AgentBuilder, AgentSettings, GoalReviser};
pub use belief::{Belief, Beliefs, FunctionalBelief, Priority, Rule};
pub use desire::{Desire, Desires};
pub use diagnostics::Diagnostic;
pub use error::AgentError;
pub use goal::{Goal, Goals};
pub use intentions::{default_preference, prefer_first, Intentions, Preference};
pub use plan::{Plan, PlanBody, PlanContext, PlanHead};
pub use remote::RemoteAgent;
pub use revision::{BeliefReviser, RevisionPolicy};
