//! Porter, paranoid and claustrophobe share a room with one door.
//!
//! All three work on beliefs alone (no desires). Lock and unlock requests reach the porter
//! through the mailbox.

use bdi_core::{Action, Agent, AgentId, AgentSettings, Intentions, Plan};
use bdi_env::{Environment, EnvironmentError, State};
use serde_json::{json, Map, Value};

const PORTER: &str = "porter";

fn door_locked(intentions: &Intentions) -> bool {
    intentions
        .get("door")
        .and_then(|door| door.get("locked"))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Whether any agent asked for `request` in the inbox this tick.
fn requested(intentions: &Intentions, request: &str) -> bool {
    intentions
        .get("messages")
        .and_then(Value::as_object)
        .is_some_and(|inbox| {
            inbox
                .values()
                .filter_map(Value::as_array)
                .flatten()
                .any(|message| message == request)
        })
}

fn porter(settings: AgentSettings) -> Agent {
    Agent::builder(PORTER)
        .settings(settings)
        .plan(Plan::condition(
            |i| !door_locked(i) && requested(i, "lock"),
            |_, _| Ok(Action::new(json!({ "door": "lock" }))),
        ))
        .plan(Plan::condition(
            |i| door_locked(i) && requested(i, "unlock"),
            |_, _| Ok(Action::new(json!({ "door": "unlock" }))),
        ))
        .build()
}

/// An agent that wants the door in one state: it asks the porter for it, or says thanks.
fn resident(id: &str, settings: AgentSettings, wants_locked: bool) -> Agent {
    let (request, thanks) = if wants_locked {
        ("lock", "Thanks for keeping the door locked!")
    } else {
        ("unlock", "Thanks for keeping the door open!")
    };
    Agent::builder(id)
        .settings(settings)
        .plan(Plan::condition(
            move |i| door_locked(i) != wants_locked,
            move |_, _| Ok(Action::new(json!({ "request": request })).with_message(PORTER, request)),
        ))
        .plan(Plan::condition(
            move |i| door_locked(i) == wants_locked,
            move |_, _| Ok(Action::new(json!({ "announce": thanks }))),
        ))
        .build()
}

fn update(actions: &[Action], agent: &AgentId, _state: &State) -> Map<String, Value> {
    let mut delta = Map::new();
    for action in actions {
        match action.payload.get("door").and_then(Value::as_str) {
            Some("lock") => {
                delta.insert("door".into(), json!({ "locked": true }));
            }
            Some("unlock") => {
                delta.insert("door".into(), json!({ "locked": false }));
            }
            _ => {}
        }
        if let Some(announcement) = action.payload.get("announce") {
            tracing::debug!(agent = %agent, %announcement, "announcement");
        }
    }
    delta
}

pub(super) fn build(settings: AgentSettings) -> Result<Environment, EnvironmentError> {
    let mut world = Map::new();
    world.insert("door".into(), json!({ "locked": true }));

    Environment::builder(world)
        .agent(porter(settings))
        .agent(resident("paranoid", settings, true))
        .agent(resident("claustrophobe", settings, false))
        .update(update)
        .build()
}
