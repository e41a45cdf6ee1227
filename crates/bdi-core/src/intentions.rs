use serde_json::{Map, Value};

use crate::{json, Beliefs, Desires};

/// Decides, per cycle, which desires an agent commits to: `(beliefs, desires, desire id) -> bool`.
pub type Preference = Box<dyn Fn(&Beliefs, &Desires, &str) -> bool>;

/// Accept every desire whose current value is truthy.
///
/// Agents built without a preference get the same result from [`Intentions::from_truthy_desires`],
/// which evaluates each desire once.
pub fn default_preference(beliefs: &Beliefs, desires: &Desires, desire_id: &str) -> bool {
    json::is_truthy_opt(desires.evaluate(desire_id, beliefs).as_ref())
}

/// Accept a truthy desire, but when `first` is desired too, accept only `first`.
///
/// The human of the dog scenario feeds rather than praises this way.
pub fn prefer_first(first: impl Into<String>) -> impl Fn(&Beliefs, &Desires, &str) -> bool {
    let first = first.into();
    move |beliefs, desires, id| {
        if !json::is_truthy_opt(desires.evaluate(id, beliefs).as_ref()) {
            return false;
        }
        id == first || !json::is_truthy_opt(desires.evaluate(&first, beliefs).as_ref())
    }
}

/// The desires that survived preference filtering, mapped to their computed values.
///
/// Entries keep the declaration order of the desires they came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Intentions {
    entries: Vec<(String, Value)>,
}

impl Intentions {
    /// Filter `desires` through `preference` and evaluate the accepted ones against `beliefs`.
    pub fn new<P>(beliefs: &Beliefs, desires: &Desires, preference: P) -> Self
    where
        P: Fn(&Beliefs, &Desires, &str) -> bool,
    {
        let entries = desires
            .iter()
            .filter(|desire| preference(beliefs, desires, desire.id()))
            .map(|desire| (desire.id().to_string(), desire.evaluate(beliefs)))
            .collect();
        Self { entries }
    }

    /// Every desire whose value is truthy, each desire evaluated exactly once.
    ///
    /// Same result as [`Intentions::new`] with [`default_preference`].
    pub fn from_truthy_desires(beliefs: &Beliefs, desires: &Desires) -> Self {
        let entries = desires
            .iter()
            .map(|desire| (desire.id().to_string(), desire.evaluate(beliefs)))
            .filter(|(_, value)| json::is_truthy(value))
            .collect();
        Self { entries }
    }

    /// Intentions that bypass deliberation: every belief value, keyed by belief id.
    pub fn from_beliefs(beliefs: &Beliefs) -> Self {
        let entries = beliefs
            .iter()
            .map(|belief| (belief.id.clone(), belief.value.clone()))
            .collect();
        Self { entries }
    }

    pub fn get(&self, id: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == id).map(|(_, v)| v)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// `true` only if the intention holds exactly JSON `true`.
    pub fn is_true(&self, id: &str) -> bool {
        matches!(self.get(id), Some(Value::Bool(true)))
    }

    pub fn truthy(&self, id: &str) -> bool {
        json::is_truthy_opt(self.get(id))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> Map<String, Value> {
        self.entries.iter().cloned().collect()
    }
}
