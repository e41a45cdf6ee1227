use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::diagnostics::{self, Diagnostic};
use crate::Beliefs;

/// A named function of the current beliefs.
///
/// The value is either a boolean gate or an arbitrary intention payload.
#[derive(Clone)]
pub struct Desire {
    id: String,
    body: Rc<dyn Fn(&Beliefs) -> Value>,
}

impl Desire {
    pub fn new<F, V>(id: impl Into<String>, body: F) -> Self
    where
        F: Fn(&Beliefs) -> V + 'static,
        V: Into<Value>,
    {
        Self {
            id: id.into(),
            body: Rc::new(move |beliefs| body(beliefs).into()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn evaluate(&self, beliefs: &Beliefs) -> Value {
        (self.body)(beliefs)
    }
}

impl fmt::Debug for Desire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Desire").field("id", &self.id).finish_non_exhaustive()
    }
}

/// Desires in declaration order.
///
/// The order is part of the contract: intentions are produced in this order, and plans may rely
/// on it.
#[derive(Debug, Clone, Default)]
pub struct Desires {
    entries: Vec<Desire>,
    positions: BTreeMap<String, usize>,
}

impl Desires {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, desire: Desire) -> Self {
        self.push(desire);
        self
    }

    /// Append a desire. Redeclaring an id replaces the earlier body but keeps its position.
    pub fn push(&mut self, desire: Desire) {
        match self.positions.get(&desire.id) {
            Some(&position) => {
                diagnostics::report(&Diagnostic::DuplicateDesire {
                    id: desire.id.clone(),
                });
                self.entries[position] = desire;
            }
            None => {
                self.positions.insert(desire.id.clone(), self.entries.len());
                self.entries.push(desire);
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Desire> {
        self.positions.get(id).map(|&position| &self.entries[position])
    }

    /// Evaluate the desire `id`, or `None` if it is not declared.
    pub fn evaluate(&self, id: &str, beliefs: &Beliefs) -> Option<Value> {
        self.get(id).map(|d| d.evaluate(beliefs))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(Desire::id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Desire> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Desire> for Desires {
    fn from_iter<I: IntoIterator<Item = Desire>>(iter: I) -> Self {
        let mut desires = Desires::new();
        for desire in iter {
            desires.push(desire);
        }
        desires
    }
}
