//! Belief revision: merging an agent's belief base with an incoming update.
//!
//! Every strategy is a pure function `(old, new) -> revised`. Keys that only one side holds are
//! always kept; the strategies differ in who wins a conflict.

use serde::{Deserialize, Serialize};

use crate::{Belief, Beliefs};

/// A belief revision function: `(old beliefs, belief update) -> revised beliefs`.
pub type BeliefReviser = Box<dyn Fn(&Beliefs, &Beliefs) -> Beliefs>;

/// The built-in revision strategies, by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevisionPolicy {
    /// The update always wins.
    #[default]
    SimpleNonmonotonic,
    /// Held beliefs always win; only the agent itself can change them.
    Monotonic,
    /// Priority arbitration, see [`revise_priority`].
    Priority,
    /// Priority arbitration that never moves a held belief's priority.
    PriorityStatic,
}

impl RevisionPolicy {
    pub fn revise(self, old: &Beliefs, new: &Beliefs) -> Beliefs {
        match self {
            RevisionPolicy::SimpleNonmonotonic => revise_simple_nonmonotonic(old, new),
            RevisionPolicy::Monotonic => revise_monotonic(old, new),
            RevisionPolicy::Priority => revise_priority(old, new),
            RevisionPolicy::PriorityStatic => revise_priority_static(old, new),
        }
    }

    /// Boxed reviser for this policy, optionally running the functional-belief pipeline.
    pub fn reviser(self, functional_beliefs: bool) -> BeliefReviser {
        if functional_beliefs {
            with_functional_beliefs(move |old: &Beliefs, new: &Beliefs| self.revise(old, new))
        } else {
            Box::new(move |old: &Beliefs, new: &Beliefs| self.revise(old, new))
        }
    }
}

pub fn revise_simple_nonmonotonic(old: &Beliefs, new: &Beliefs) -> Beliefs {
    let mut revised = old.clone();
    revised.extend(new.iter().cloned());
    revised
}

pub fn revise_monotonic(old: &Beliefs, new: &Beliefs) -> Beliefs {
    let mut revised = new.clone();
    revised.extend(old.iter().cloned());
    revised
}

/// Priority-arbitrated revision.
///
/// An incoming belief replaces the held one iff the held priority is absent or zero, or strictly
/// lower than the incoming priority. A missing incoming priority never beats a held one, and a
/// [`crate::Priority::Locked`] belief is never replaced.
///
/// When the update wins, the held belief's `update_priority` decides the outcome: `true` adopts
/// the incoming belief wholesale, `false` keeps the held priority and only swaps the value. A
/// held belief without any priority is always replaced wholesale.
pub fn revise_priority(old: &Beliefs, new: &Beliefs) -> Beliefs {
    let mut revised = old.clone();
    for incoming in new.iter() {
        let merged = match old.get(&incoming.id) {
            Some(held) => arbitrate(held, incoming),
            None => incoming.clone(),
        };
        revised.insert(merged);
    }
    revised
}

/// [`revise_priority`] with every held belief's `update_priority` forced to `false` first.
pub fn revise_priority_static(old: &Beliefs, new: &Beliefs) -> Beliefs {
    let pinned: Beliefs = old
        .iter()
        .cloned()
        .map(|belief| belief.with_update_priority(false))
        .collect();
    revise_priority(&pinned, new)
}

fn update_wins(held: &Belief, incoming: &Belief) -> bool {
    match (held.priority, incoming.priority) {
        (None, _) => true,
        (Some(held), _) if held.is_zero() => true,
        (Some(held), Some(incoming)) => held < incoming,
        (Some(_), None) => false,
    }
}

fn arbitrate(held: &Belief, incoming: &Belief) -> Belief {
    if !update_wins(held, incoming) {
        return held.clone();
    }
    if held.update_priority || held.priority.is_none() {
        return incoming.clone();
    }
    let mut kept = held.clone();
    kept.value = incoming.value.clone();
    kept
}

/// The plain (non-functional) part of a belief base.
pub fn non_functional_beliefs(beliefs: &Beliefs) -> Beliefs {
    beliefs.iter().filter(|b| !b.is_functional()).cloned().collect()
}

/// The functional beliefs of a base, sorted by ascending evaluation order.
///
/// Beliefs sharing an order are evaluated in id order.
pub fn preprocess_functional_beliefs(beliefs: &Beliefs) -> Vec<Belief> {
    let mut functional: Vec<Belief> = beliefs.iter().filter(|b| b.is_functional()).cloned().collect();
    functional.sort_by_key(|b| b.order().unwrap_or_default());
    functional
}

/// Revise `old` with `new` using `revise`, then recompute every functional belief.
///
/// Plain beliefs and functional beliefs are revised separately with the same strategy. The
/// surviving functional beliefs are then recomputed in ascending order. Each rule sees the old
/// base and the revised base, and the revised base already holds the fresh values of
/// lower-order rules from this same pass.
pub fn process_functional_beliefs<R>(old: &Beliefs, new: &Beliefs, revise: R) -> Beliefs
where
    R: Fn(&Beliefs, &Beliefs) -> Beliefs,
{
    let mut revised = revise(&non_functional_beliefs(old), &non_functional_beliefs(new));

    let held: Beliefs = preprocess_functional_beliefs(old).into_iter().collect();
    let incoming: Beliefs = preprocess_functional_beliefs(new).into_iter().collect();
    let ordered = preprocess_functional_beliefs(&revise(&held, &incoming));

    revised.extend(ordered.iter().cloned());
    for mut belief in ordered {
        belief.recompute(old, &revised);
        revised.insert(belief);
    }
    revised
}

/// Wrap a revision strategy so that it also runs the functional-belief pipeline.
pub fn with_functional_beliefs<R>(revise: R) -> BeliefReviser
where
    R: Fn(&Beliefs, &Beliefs) -> Beliefs + 'static,
{
    Box::new(move |old: &Beliefs, new: &Beliefs| process_functional_beliefs(old, new, &revise))
}
