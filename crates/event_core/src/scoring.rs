//! Pluggable alliance scoring
//!
//! A scoring function turns the summed attributes of one alliance into a
//! set of named metrics. Events compare alliances on the [`TOTAL`] metric
//! and rank teams on whichever metrics the sort order names.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::team::AttributeMap;

#[cfg(test)]
#[path = "scoring_tests.rs"]
mod scoring_tests;

/// Metric name every event scoring function must produce.
pub const TOTAL: &str = "total";

pub const SCORE_1: &str = "score_1";
pub const SCORE_2: &str = "score_2";

/// Named metrics produced for one alliance in one match.
pub type MetricMap = BTreeMap<String, f64>;

/// Scoring function shared by every match of every run.
pub type SharedScoring = Arc<dyn ScoringFunction>;

/// Trait implemented by every scoring rule (qualification, elimination, ...).
///
/// Implementations must be pure: the same inputs always produce the same
/// metrics. Closures with the matching signature implement it directly.
pub trait ScoringFunction: Send + Sync {
    /// Compute alliance metrics.
    ///
    /// # Arguments
    /// * `attribute_names` - The tracked attribute names, in roster order
    /// * `alliance` - Each tracked attribute summed over the alliance
    ///
    /// # Returns
    /// Metric mapping. Must contain [`TOTAL`] when used for event scoring.
    fn compute(&self, attribute_names: &[String], alliance: &AttributeMap) -> MetricMap;
}

impl<F> ScoringFunction for F
where
    F: Fn(&[String], &AttributeMap) -> MetricMap + Send + Sync,
{
    fn compute(&self, attribute_names: &[String], alliance: &AttributeMap) -> MetricMap {
        self(attribute_names, alliance)
    }
}

/// Standard qualification rule: `total = score_1 + score_2`, with
/// `score_2` passed through as the first tie-breaker.
#[derive(Debug, Clone, Copy, Default)]
pub struct QualificationScoring;

impl QualificationScoring {
    pub fn shared() -> SharedScoring {
        Arc::new(Self)
    }
}

impl ScoringFunction for QualificationScoring {
    fn compute(&self, _attribute_names: &[String], alliance: &AttributeMap) -> MetricMap {
        let score_1 = alliance.get(SCORE_1).copied().unwrap_or(0.0);
        let score_2 = alliance.get(SCORE_2).copied().unwrap_or(0.0);

        let mut scores = MetricMap::new();
        scores.insert(TOTAL.to_string(), score_1 + score_2);
        scores.insert(SCORE_2.to_string(), score_2);
        scores
    }
}
