//! Teams and their attribute bags

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[cfg(test)]
#[path = "team_tests.rs"]
mod team_tests;

/// Zero-based roster position assigned at load time. Stable across runs.
pub type TeamId = usize;

/// Named numeric attributes (per team, or summed per alliance).
pub type AttributeMap = BTreeMap<String, f64>;

/// A team entered in the event.
///
/// Teams are plain values: runs copy them onto schedule slots, and the
/// `id` is what ties a copy back to the roster entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub attributes: AttributeMap,
}

impl Team {
    pub fn new(id: TeamId) -> Self {
        Self {
            id,
            attributes: AttributeMap::new(),
        }
    }

    /// Build a team from `(name, value)` pairs.
    pub fn with_attributes<I, S>(id: TeamId, attributes: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            id,
            attributes: attributes
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }

    /// Attribute value, or 0.0 if the team has no such attribute.
    pub fn get_attribute(&self, name: &str) -> f64 {
        self.attributes.get(name).copied().unwrap_or(0.0)
    }

    /// Insert or overwrite an attribute.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: f64) {
        self.attributes.insert(name.into(), value);
    }
}
