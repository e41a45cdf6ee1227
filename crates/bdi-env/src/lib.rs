//! Turn-based, single-threaded multi-agent environment for [`bdi_core`] agents.
//!
//! An [`Environment`] owns the world [`State`], a [`Mailbox`] for agent-to-agent messages and
//! the ordered list of agents. Each tick every agent observes the state through a state filter,
//! reasons, posts its messages and has its actions folded back into the state by the update
//! function.

#![forbid(unsafe_code)]

pub mod environment;
pub mod error;
pub mod mailbox;
pub mod render;
pub mod runner;
pub mod state;

pub use environment::{Environment, EnvironmentBuilder, StateFilter, Update};
pub use error::EnvironmentError;
pub use mailbox::{Inbox, Mailbox};
pub use render::{LogRender, NullRender, Render};
pub use runner::{LoopRunner, Runner};
pub use state::{state_to_beliefs, State, MESSAGES};
