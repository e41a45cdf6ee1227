use bdi_core::{prefer_first, Action, Agent, AgentId, AgentSettings, Belief, Desire, Plan};
use bdi_env::{Environment, EnvironmentError, State};
use serde_json::{json, Map, Value};

const FOOD: &str = "Here, take some food!";
const PRAISE: &str = "Good dog!";
const EAT: &str = "Eat";
const WAG: &str = "Wag tail";

fn human(settings: AgentSettings) -> Agent {
    Agent::builder("human")
        .settings(settings)
        .belief(Belief::new("dogNice", true))
        .belief(Belief::new("dogHungry", false))
        .desire(Desire::new("praiseDog", |b| b.truthy("dogNice")))
        .desire(Desire::new("feedDog", |b| b.truthy("dogNice") && b.truthy("dogHungry")))
        .preference(prefer_first("feedDog"))
        .plan(Plan::when("praiseDog", |_, _| Ok(Action::new(json!([PRAISE])))))
        .plan(Plan::when("feedDog", |_, _| Ok(Action::new(json!([FOOD])))))
        .build()
}

fn dog(settings: AgentSettings) -> Agent {
    Agent::builder("dog")
        .settings(settings)
        .belief(Belief::new("dogNice", true))
        .belief(Belief::new("dogHungry", false))
        .belief(Belief::new("foodAvailable", false))
        .belief(Belief::new("dogRecentlyPraised", false))
        .desire(Desire::new("eat", |b| b.truthy("foodAvailable") && b.truthy("dogHungry")))
        .desire(Desire::new("wagTail", |b| b.truthy("dogRecentlyPraised")))
        .preference(prefer_first("eat"))
        .plan(Plan::when("eat", |_, _| Ok(Action::new(json!([EAT])))))
        .plan(Plan::when("wagTail", |_, _| Ok(Action::new(json!([WAG])))))
        .build()
}

fn update(actions: &[Action], _agent: &AgentId, _state: &State) -> Map<String, Value> {
    let mut delta = Map::new();
    delta.insert("dogRecentlyPraised".into(), json!(false));
    for action in actions {
        if action.includes(FOOD) {
            delta.insert("foodAvailable".into(), json!(true));
        }
        if action.includes(PRAISE) {
            delta.insert("dogRecentlyPraised".into(), json!(true));
        }
        if action.includes(EAT) {
            delta.insert("foodAvailable".into(), json!(false));
            delta.insert("dogHungry".into(), json!(false));
        }
    }
    delta
}

pub(super) fn build(settings: AgentSettings) -> Result<Environment, EnvironmentError> {
    let mut world = Map::new();
    world.insert("dogNice".into(), json!(true));
    world.insert("dogHungry".into(), json!(true));
    world.insert("foodAvailable".into(), json!(false));
    world.insert("dogRecentlyPraised".into(), json!(false));

    Environment::builder(world)
        .agent(human(settings))
        .agent(dog(settings))
        .update(update)
        .build()
}
