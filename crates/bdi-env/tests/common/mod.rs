#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use bdi_core::{prefer_first, Action, Agent, AgentId, Belief, Desire, Plan};
use bdi_env::{Environment, EnvironmentBuilder, State};
use serde_json::{json, Map, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::Registry;

/// The human of the `dog` scenario shipped with `bdi-cli`, rebuilt here because that crate
/// depends on this one.
pub fn human() -> Agent {
    Agent::builder("human")
        .belief(Belief::new("dogNice", true))
        .belief(Belief::new("dogHungry", false))
        .desire(Desire::new("praiseDog", |b| b.truthy("dogNice")))
        .desire(Desire::new("feedDog", |b| b.truthy("dogNice") && b.truthy("dogHungry")))
        .preference(prefer_first("feedDog"))
        .plan(Plan::when("praiseDog", |_, _| Ok(Action::new(json!(["Good dog!"])))))
        .plan(Plan::when("feedDog", |_, _| Ok(Action::new(json!(["Here, take some food!"])))))
        .build()
}

/// The dog of the same scenario.
pub fn dog() -> Agent {
    Agent::builder("dog")
        .belief(Belief::new("dogNice", true))
        .belief(Belief::new("dogHungry", false))
        .belief(Belief::new("foodAvailable", false))
        .belief(Belief::new("dogRecentlyPraised", false))
        .desire(Desire::new("eat", |b| b.truthy("foodAvailable") && b.truthy("dogHungry")))
        .desire(Desire::new("wagTail", |b| b.truthy("dogRecentlyPraised")))
        .preference(prefer_first("eat"))
        .plan(Plan::when("eat", |_, _| Ok(Action::new(json!(["Eat"])))))
        .plan(Plan::when("wagTail", |_, _| Ok(Action::new(json!(["Wag tail"])))))
        .build()
}

pub fn dog_world() -> State {
    State::from_json(json!({
        "dogNice": true,
        "dogHungry": true,
        "foodAvailable": false,
        "dogRecentlyPraised": false,
    }))
    .unwrap()
}

pub fn update_dog_world(actions: &[Action], _agent: &AgentId, _state: &State) -> Map<String, Value> {
    let mut delta = Map::new();
    delta.insert("dogRecentlyPraised".into(), json!(false));
    for action in actions {
        if action.includes("Here, take some food!") {
            delta.insert("foodAvailable".into(), json!(true));
        }
        if action.includes("Good dog!") {
            delta.insert("dogRecentlyPraised".into(), json!(true));
        }
        if action.includes("Eat") {
            delta.insert("foodAvailable".into(), json!(false));
            delta.insert("dogHungry".into(), json!(false));
        }
    }
    delta
}

/// Human and dog, in that order, with a silent render.
pub fn dog_environment() -> EnvironmentBuilder {
    Environment::builder(dog_world())
        .agent(human())
        .agent(dog())
        .update(update_dog_world)
        .render(bdi_env::NullRender)
}

/// A render that keeps every state it is handed.
pub fn recording_render() -> (impl FnMut(&State), Rc<RefCell<Vec<State>>>) {
    let rendered = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&rendered);
    (move |state: &State| sink.borrow_mut().push(state.clone()), rendered)
}

/// Collects the messages of `WARN` events.
#[derive(Clone, Default)]
struct Warnings(Arc<Mutex<Vec<String>>>);

struct MessageVisitor<'a>(&'a mut String);

impl Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            *self.0 = format!("{value:?}");
        }
    }
}

impl<S: Subscriber> Layer<S> for Warnings {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() != Level::WARN {
            return;
        }
        let mut message = String::new();
        event.record(&mut MessageVisitor(&mut message));
        self.0.lock().unwrap().push(message);
    }
}

/// Run `f` and return its result with every warning logged meanwhile.
pub fn capture_warnings<R>(f: impl FnOnce() -> R) -> (R, Vec<String>) {
    let warnings = Warnings::default();
    let subscriber = Registry::default().with(warnings.clone());
    let result = tracing::subscriber::with_default(subscriber, f);
    let messages = warnings.0.lock().unwrap().clone();
    (result, messages)
}
