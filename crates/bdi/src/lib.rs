//! Umbrella crate that re-exports the `bdi-*` building blocks.
//!
//! `core` holds the agents and their reasoning cycle, `env` the environment that schedules them.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use bdi_core as core;

#[cfg(feature = "env")]
#[cfg_attr(docsrs, doc(cfg(feature = "env")))]
pub use bdi_env as env;

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub mod prelude {
    pub use bdi_core::{
        Action, Actor, Agent, AgentId, Belief, Beliefs, Desire, Desires, FunctionalBelief, Goal,
        Goals, Intentions, Plan, Priority, RemoteAgent, RevisionPolicy,
    };

    #[cfg(feature = "env")]
    pub use bdi_env::{Environment, EnvironmentError, State};
}
