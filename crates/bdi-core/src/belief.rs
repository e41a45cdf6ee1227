use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::diagnostics::{self, Diagnostic};
use crate::json;

/// Revision priority of a belief.
///
/// `Locked` plays the role of an infinite priority: a locked belief can never be overridden by
/// priority-based revision.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Level(f64),
    Locked,
}

impl Priority {
    pub fn is_zero(self) -> bool {
        matches!(self, Priority::Level(level) if level == 0.0)
    }
}

impl From<f64> for Priority {
    fn from(value: f64) -> Self {
        if value == f64::INFINITY {
            Priority::Locked
        } else {
            Priority::Level(value)
        }
    }
}

impl From<i32> for Priority {
    fn from(value: i32) -> Self {
        Priority::Level(value as f64)
    }
}

/// Rule of a functional belief: `(old beliefs, new beliefs) -> value`.
pub type Rule = Rc<dyn Fn(&Beliefs, &Beliefs) -> Value>;

#[derive(Clone)]
struct Derivation {
    rule: Rule,
    order: i64,
}

/// An atomic unit of knowledge.
///
/// A belief is plain data unless it was built from a [`FunctionalBelief`], in which case it also
/// carries the rule that recomputes its value and the order in which that happens.
#[derive(Clone, Serialize, Deserialize)]
pub struct Belief {
    pub id: String,
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub update_priority: bool,
    #[serde(skip)]
    derivation: Option<Derivation>,
}

impl Belief {
    pub fn new(id: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            priority: None,
            update_priority: false,
            derivation: None,
        }
    }

    /// A belief that takes part in priority arbitration. The priority is kept across revisions
    /// unless [`Belief::with_update_priority`] is set.
    pub fn with_priority(
        id: impl Into<String>,
        value: impl Into<Value>,
        priority: impl Into<Priority>,
    ) -> Self {
        Self {
            priority: Some(priority.into()),
            ..Self::new(id, value)
        }
    }

    pub fn with_update_priority(mut self, update_priority: bool) -> Self {
        self.update_priority = update_priority;
        self
    }

    /// Build a belief from arbitrary serializable data.
    ///
    /// Data that does not survive a JSON round trip is still stored (as the best-effort JSON
    /// value), and a [`Diagnostic::NonJsonValue`] warning is reported.
    pub fn from_data<T>(id: impl Into<String>, data: &T) -> Self
    where
        T: Serialize + DeserializeOwned + PartialEq,
    {
        let id = id.into();
        let (value, issue) = json::round_trip(data);
        if let Some(reason) = issue {
            diagnostics::report(&Diagnostic::NonJsonValue {
                kind: "belief",
                id: id.clone(),
                reason,
            });
        }
        Self::new(id, value)
    }

    pub fn is_functional(&self) -> bool {
        self.derivation.is_some()
    }

    /// Evaluation order of a functional belief.
    pub fn order(&self) -> Option<i64> {
        self.derivation.as_ref().map(|d| d.order)
    }

    pub fn rule(&self) -> Option<&Rule> {
        self.derivation.as_ref().map(|d| &d.rule)
    }

    /// Recompute a functional belief in place. Plain beliefs are left untouched.
    pub(crate) fn recompute(&mut self, old: &Beliefs, new: &Beliefs) {
        if let Some(derivation) = &self.derivation {
            self.value = (derivation.rule)(old, new);
        }
    }
}

impl fmt::Debug for Belief {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Belief")
            .field("id", &self.id)
            .field("value", &self.value)
            .field("priority", &self.priority)
            .field("update_priority", &self.update_priority)
            .field("order", &self.order())
            .finish()
    }
}

/// Rules are compared by identity, everything else by value.
impl PartialEq for Belief {
    fn eq(&self, other: &Self) -> bool {
        let same_derivation = match (&self.derivation, &other.derivation) {
            (None, None) => true,
            (Some(a), Some(b)) => a.order == b.order && Rc::ptr_eq(&a.rule, &b.rule),
            _ => false,
        };
        self.id == other.id
            && self.value == other.value
            && self.priority == other.priority
            && self.update_priority == other.update_priority
            && same_derivation
    }
}

/// A belief whose value is derived from the other beliefs by a rule.
///
/// The rule receives the belief base before revision and the revised base. Rules run in
/// ascending `order` and later rules observe the freshly computed values of earlier ones. `value`
/// is the default held until the first recompute.
pub struct FunctionalBelief {
    id: String,
    value: Value,
    rule: Rule,
    order: i64,
    priority: Option<Priority>,
}

impl FunctionalBelief {
    pub fn new<F, V>(id: impl Into<String>, value: impl Into<Value>, rule: F, order: i64) -> Self
    where
        F: Fn(&Beliefs, &Beliefs) -> V + 'static,
        V: Into<Value>,
    {
        Self {
            id: id.into(),
            value: value.into(),
            rule: Rc::new(move |old, new| rule(old, new).into()),
            order,
            priority: None,
        }
    }

    pub fn with_priority(mut self, priority: impl Into<Priority>) -> Self {
        self.priority = Some(priority.into());
        self
    }
}

impl From<FunctionalBelief> for Belief {
    fn from(value: FunctionalBelief) -> Self {
        Belief {
            id: value.id,
            value: value.value,
            priority: value.priority,
            update_priority: false,
            derivation: Some(Derivation {
                rule: value.rule,
                order: value.order,
            }),
        }
    }
}

/// A belief base: belief id to belief.
///
/// Iteration is in id order, which keeps every revision strategy deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Beliefs {
    entries: BTreeMap<String, Belief>,
}

impl Beliefs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Beliefs::insert`].
    pub fn with(mut self, belief: impl Into<Belief>) -> Self {
        self.insert(belief);
        self
    }

    /// Insert a belief under its own id, replacing any previous belief with that id.
    pub fn insert(&mut self, belief: impl Into<Belief>) -> Option<Belief> {
        let belief = belief.into();
        self.entries.insert(belief.id.clone(), belief)
    }

    /// Set the value of a belief, keeping its priority and rule if it already exists.
    pub fn set(&mut self, id: impl Into<String>, value: impl Into<Value>) {
        let id = id.into();
        let value = value.into();
        match self.entries.get_mut(&id) {
            Some(existing) => existing.value = value,
            None => {
                self.entries.insert(id.clone(), Belief::new(id, value));
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Belief> {
        self.entries.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Belief> {
        self.entries.get_mut(id)
    }

    pub fn value(&self, id: &str) -> Option<&Value> {
        self.entries.get(id).map(|b| &b.value)
    }

    /// `true` only if the belief holds exactly JSON `true`.
    pub fn is_true(&self, id: &str) -> bool {
        matches!(self.value(id), Some(Value::Bool(true)))
    }

    pub fn truthy(&self, id: &str) -> bool {
        json::is_truthy_opt(self.value(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<Belief> {
        self.entries.remove(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Belief> {
        self.entries.values()
    }

    /// Plain beliefs, one per JSON field.
    pub fn from_json(fields: &Map<String, Value>) -> Self {
        fields
            .iter()
            .map(|(id, value)| Belief::new(id.clone(), value.clone()))
            .collect()
    }

    /// Belief values keyed by id, dropping priorities and rules.
    pub fn to_json(&self) -> Map<String, Value> {
        self.entries
            .iter()
            .map(|(id, belief)| (id.clone(), belief.value.clone()))
            .collect()
    }
}

impl FromIterator<Belief> for Beliefs {
    fn from_iter<I: IntoIterator<Item = Belief>>(iter: I) -> Self {
        let mut beliefs = Beliefs::new();
        for belief in iter {
            beliefs.insert(belief);
        }
        beliefs
    }
}

impl Extend<Belief> for Beliefs {
    fn extend<I: IntoIterator<Item = Belief>>(&mut self, iter: I) {
        for belief in iter {
            self.insert(belief);
        }
    }
}

impl IntoIterator for Beliefs {
    type Item = Belief;
    type IntoIter = btree_map::IntoValues<String, Belief>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}
