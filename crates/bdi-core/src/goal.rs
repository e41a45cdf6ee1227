use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::diagnostics::{self, Diagnostic};
use crate::json;

/// An explicitly toggled activation flag that can gate a plan, with an optional payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl Goal {
    pub fn new(id: impl Into<String>, is_active: bool) -> Self {
        Self {
            id: id.into(),
            is_active,
            value: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Attach arbitrary serializable data as the payload, reporting data that is not JSON-safe.
    pub fn with_data<T>(mut self, data: &T) -> Self
    where
        T: Serialize + DeserializeOwned + PartialEq,
    {
        let (value, issue) = json::round_trip(data);
        if let Some(reason) = issue {
            diagnostics::report(&Diagnostic::NonJsonValue {
                kind: "goal",
                id: self.id.clone(),
                reason,
            });
        }
        self.value = Some(value);
        self
    }
}

/// Goals keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Goals {
    entries: BTreeMap<String, Goal>,
}

impl Goals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, goal: Goal) -> Self {
        self.insert(goal);
        self
    }

    pub fn insert(&mut self, goal: Goal) -> Option<Goal> {
        self.entries.insert(goal.id.clone(), goal)
    }

    pub fn get(&self, id: &str) -> Option<&Goal> {
        self.entries.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Goal> {
        self.entries.get_mut(id)
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.get(id).is_some_and(|g| g.is_active)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Goal> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Goal> for Goals {
    fn from_iter<I: IntoIterator<Item = Goal>>(iter: I) -> Self {
        let mut goals = Goals::new();
        for goal in iter {
            goals.insert(goal);
        }
        goals
    }
}
