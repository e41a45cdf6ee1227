#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use bdi_core::{prefer_first, Action, Agent, Belief, Beliefs, Desire, Desires, Plan};
use serde_json::json;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::Registry;

/// Collects the messages logged on the `bdi::diagnostics` target.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<String>>>);

struct MessageVisitor<'a>(&'a mut String);

impl Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            *self.0 = format!("{value:?}");
        }
    }
}

impl<S: Subscriber> Layer<S> for Captured {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if event.metadata().target() != "bdi::diagnostics" {
            return;
        }
        let mut message = String::new();
        event.record(&mut MessageVisitor(&mut message));
        self.0.lock().unwrap().push(message);
    }
}

pub fn capture_diagnostics<R>(f: impl FnOnce() -> R) -> (R, Vec<String>) {
    let captured = Captured::default();
    let subscriber = Registry::default().with(captured.clone());
    let result = tracing::subscriber::with_default(subscriber, f);
    let messages = captured.0.lock().unwrap().clone();
    (result, messages)
}

pub fn human_beliefs() -> Beliefs {
    Beliefs::new()
        .with(Belief::new("dogNice", true))
        .with(Belief::new("dogHungry", false))
}

pub fn human_desires() -> Desires {
    Desires::new()
        .with(Desire::new("praiseDog", |b| b.truthy("dogNice")))
        .with(Desire::new("feedDog", |b| b.truthy("dogNice") && b.truthy("dogHungry")))
}

/// Feeding beats praising: praise only when feeding is not desired.
pub fn human_preference(beliefs: &Beliefs, desires: &Desires, id: &str) -> bool {
    prefer_first("feedDog")(beliefs, desires, id)
}

pub fn human_plans() -> Vec<Plan> {
    vec![
        Plan::when("praiseDog", |_, _| Ok(Action::new(json!(["Good dog!"])))),
        Plan::when("feedDog", |_, _| Ok(Action::new(json!(["Here, take some food!"])))),
    ]
}

pub fn human() -> Agent {
    Agent::builder("human")
        .beliefs(human_beliefs())
        .desires(human_desires())
        .preference(human_preference)
        .plans(human_plans())
        .build()
}
