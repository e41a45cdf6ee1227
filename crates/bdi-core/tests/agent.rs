mod common;

use bdi_core::{
    Action, Actor, Agent, AgentError, AgentSettings, Belief, Beliefs, Desire, Goal, Goals, Plan,
    RevisionPolicy,
};
use std::cell::Cell;
use std::rc::Rc;

use serde_json::json;

use common::{human, human_beliefs, human_desires, human_plans};

#[test]
fn agent_exposes_its_configuration() {
    let agent = human();
    assert_eq!(agent.id(), "human");
    assert_eq!(agent.beliefs(), &human_beliefs());
    assert_eq!(agent.desires().len(), 2);
    assert_eq!(agent.plans().len(), 2);
    assert!(agent.is_active());
    assert!(agent.self_updates_possible());
    assert!(agent.intentions().is_empty());
}

#[test]
fn next_runs_plans_of_held_intentions() {
    let mut agent = human();
    let actions = agent.next(Beliefs::new()).unwrap().unwrap();
    assert_eq!(actions, vec![Action::new(json!(["Good dog!"]))]);
    assert_eq!(agent.intentions().ids().collect::<Vec<_>>(), vec!["praiseDog"]);
}

#[test]
fn preference_filters_desires() {
    let mut agent = human();
    let actions = agent
        .next(Beliefs::new().with(Belief::new("dogHungry", true)))
        .unwrap()
        .unwrap();
    assert_eq!(actions.len(), 1);
    assert!(actions[0].includes("Here, take some food!"));
    assert!(!agent.intentions().contains("praiseDog"));
}

#[test]
fn default_preference_evaluates_each_desire_once_per_cycle() {
    let calls = Rc::new(Cell::new(0));
    let counted = Rc::clone(&calls);
    let mut agent = Agent::builder("counter")
        .belief(Belief::new("go", true))
        .desire(Desire::new("go", move |b| {
            counted.set(counted.get() + 1);
            b.truthy("go")
        }))
        .desire(Desire::new("idle", |_| false))
        .plan(Plan::when("go", |_, _| Ok(Action::new("went"))))
        .build();

    let actions = agent.next(Beliefs::new()).unwrap().unwrap();
    assert_eq!(actions, vec![Action::new("went")]);
    assert_eq!(agent.intentions().ids().collect::<Vec<_>>(), vec!["go"]);
    assert_eq!(calls.get(), 1);
}

#[test]
fn field_setters_win_over_settings_in_any_order() {
    let before = Agent::builder("before")
        .self_updates(false)
        .active(false)
        .revision(RevisionPolicy::Monotonic)
        .settings(AgentSettings::default())
        .belief(Belief::new("door", "locked"))
        .build();
    let after = Agent::builder("after")
        .settings(AgentSettings::default())
        .self_updates(false)
        .active(false)
        .build();

    for agent in [&before, &after] {
        assert!(!agent.self_updates_possible());
        assert!(!agent.is_active());
    }

    let mut before = before;
    before.next(Beliefs::new().with(Belief::new("door", "open"))).unwrap();
    assert_eq!(before.beliefs().value("door"), Some(&json!("locked")));
}

#[test]
fn stopped_agent_revises_beliefs_but_does_not_act() {
    let mut agent = human();
    agent.stop();
    assert!(!agent.is_active());

    let result = agent.next(Beliefs::new().with(Belief::new("dogNice", false))).unwrap();
    assert!(result.is_none());
    assert_eq!(agent.beliefs().value("dogNice"), Some(&json!(false)));

    agent.start();
    let actions = agent.next(Beliefs::new()).unwrap().unwrap();
    assert!(actions.is_empty());
}

#[test]
fn agents_can_start_stopped() {
    let mut agent = Agent::builder("idle")
        .settings(AgentSettings {
            active: false,
            ..AgentSettings::default()
        })
        .build();
    assert!(!agent.is_active());
    assert_eq!(agent.next(Beliefs::new()).unwrap(), None);
}

#[test]
fn belief_update_can_silence_every_plan() {
    let mut agent = human();
    let actions = agent
        .next(Beliefs::new().with(Belief::new("dogNice", false)))
        .unwrap()
        .unwrap();
    assert!(actions.is_empty());
    assert!(agent.intentions().is_empty());
}

fn self_updating(enabled: bool) -> Agent {
    Agent::builder("myAgent")
        .beliefs(human_beliefs())
        .desires(human_desires())
        .plans(vec![Plan::when("praiseDog", |_, ctx| {
            ctx.beliefs_mut()?.set("dogNice", false);
            Ok(Action::new(json!(["Good dog!"])))
        })])
        .self_updates(enabled)
        .build()
}

#[test]
fn plans_may_update_own_beliefs_when_allowed() {
    let mut agent = self_updating(true);
    let actions = agent.next(Beliefs::new()).unwrap().unwrap();
    assert_eq!(actions.len(), 1);
    assert_eq!(agent.beliefs().value("dogNice"), Some(&json!(false)));
}

#[test]
fn self_updates_fail_fast_when_disabled() {
    let mut agent = self_updating(false);
    let err = agent.next(Beliefs::new()).unwrap_err();
    assert!(matches!(err, AgentError::SelfUpdatesDisabled { ref agent } if agent == "myAgent"));
    assert_eq!(agent.beliefs().value("dogNice"), Some(&json!(true)));
}

#[test]
fn plan_context_reports_capability() {
    let mut agent = Agent::builder("probe")
        .belief(Belief::new("go", true))
        .plan(Plan::when("go", |_, ctx| {
            Ok(Action::new(json!({ "canUpdate": ctx.can_update_self(), "id": ctx.agent_id() })))
        }))
        .self_updates(false)
        .build();
    let actions = agent.next(Beliefs::new()).unwrap().unwrap();
    assert_eq!(actions[0].payload, json!({ "canUpdate": false, "id": "probe" }));
}

#[test]
fn failing_plan_aborts_the_cycle() {
    let mut agent = Agent::builder("failing")
        .belief(Belief::new("go", true))
        .plan(Plan::when("go", |_, ctx| Err(AgentError::plan(ctx.agent_id(), "boom"))))
        .plan(Plan::when("go", |_, _| Ok(Action::new("unreachable"))))
        .build();
    let err = agent.next(Beliefs::new().with(Belief::new("extra", 1))).unwrap_err();
    assert_eq!(err.to_string(), "plan of agent `failing` failed: boom");
    assert_eq!(agent.beliefs().value("extra"), Some(&json!(1)));
}

#[test]
fn agents_without_desires_plan_on_beliefs() {
    let mut agent = Agent::builder("reactive")
        .beliefs(human_beliefs())
        .plans(vec![
            Plan::when("dogNice", |_, _| Ok(Action::new("pet"))),
            Plan::when("dogHungry", |_, _| Ok(Action::new("feed"))),
            Plan::condition(
                |intentions| intentions.get("mood") == Some(&json!("happy")),
                |_, _| Ok(Action::new("smile")),
            ),
        ])
        .build();

    let actions = agent
        .next(Beliefs::new().with(Belief::new("mood", "happy")))
        .unwrap()
        .unwrap();
    let payloads: Vec<_> = actions.into_iter().map(|a| a.payload).collect();
    assert_eq!(payloads, vec![json!("pet"), json!("smile")]);
    assert_eq!(agent.intentions().len(), 3);
}

fn goal_driven() -> Agent {
    Agent::builder("walker")
        .belief(Belief::new("tired", false))
        .desire(Desire::new("rest", |b| b.truthy("tired")))
        .goal(Goal::new("walk", true).with_value(json!({ "distance": 3 })))
        .goal(Goal::new("run", false))
        .revise_goals(|beliefs: &Beliefs, mut goals: Goals| {
            if let Some(walk) = goals.get_mut("walk") {
                walk.is_active = !beliefs.truthy("tired");
            }
            goals
        })
        .plan(Plan::for_goal("walk", |_, ctx| {
            let distance = ctx.goal_value().and_then(|v| v.get("distance")).cloned();
            Ok(Action::new(json!({ "walk": distance })))
        }))
        .plan(Plan::for_goal("run", |_, _| Ok(Action::new("run"))))
        .plan(Plan::when("rest", |_, ctx| {
            assert!(ctx.goal_value().is_none());
            Ok(Action::new("rest"))
        }))
        .build()
}

#[test]
fn active_goals_fire_their_plans_with_payload() {
    let mut agent = goal_driven();
    let actions = agent.next(Beliefs::new()).unwrap().unwrap();
    assert_eq!(actions, vec![Action::new(json!({ "walk": 3 }))]);
}

#[test]
fn goals_are_revised_after_beliefs() {
    let mut agent = goal_driven();
    let actions = agent
        .next(Beliefs::new().with(Belief::new("tired", true)))
        .unwrap()
        .unwrap();
    assert!(!agent.goals().is_active("walk"));
    assert_eq!(actions, vec![Action::new("rest")]);
}

#[test]
fn custom_belief_revision_overrides_policy() {
    let mut agent = Agent::builder("stubborn")
        .beliefs(human_beliefs())
        .plans(human_plans())
        .revision(RevisionPolicy::SimpleNonmonotonic)
        .revise_beliefs(|old: &Beliefs, _: &Beliefs| old.clone())
        .build();
    agent
        .next(Beliefs::new().with(Belief::new("dogNice", false)))
        .unwrap();
    assert_eq!(agent.beliefs(), &human_beliefs());
}

#[test]
fn agent_is_driven_through_the_actor_trait() {
    let mut actor: Box<dyn Actor> = Box::new(human());
    assert_eq!(actor.id(), "human");
    actor.stop();
    assert!(!actor.is_active());
    assert_eq!(actor.next(Beliefs::new()).unwrap(), None);
    actor.start();
    assert_eq!(actor.next(Beliefs::new()).unwrap().map(|a| a.len()), Some(1));
    assert!(actor.beliefs().is_true("dogNice"));
}
