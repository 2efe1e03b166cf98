//! Team rankings and the ranking order

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::scoring::MetricMap;
use crate::team::Team;

#[cfg(test)]
#[path = "ranking_tests.rs"]
mod ranking_tests;

/// A team's summed metrics over every match it played in one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRanking {
    pub team: Team,
    pub breakdown: MetricMap,
}

impl TeamRanking {
    pub fn new(team: Team) -> Self {
        Self {
            team,
            breakdown: MetricMap::new(),
        }
    }

    /// Summed value of a metric, 0.0 if the team never scored it.
    pub fn metric(&self, name: &str) -> f64 {
        self.breakdown.get(name).copied().unwrap_or(0.0)
    }
}

/// Ranking order: each sort-order metric in priority order, highest first,
/// then team id ascending.
///
/// Because ids are unique within a roster this is a total order, so no two
/// rankings of the same event ever compare equal.
pub fn compare_rankings(a: &TeamRanking, b: &TeamRanking, sort_order: &[String]) -> Ordering {
    for key in sort_order {
        match b.metric(key).total_cmp(&a.metric(key)) {
            Ordering::Equal => continue,
            unequal => return unequal,
        }
    }
    a.team.id.cmp(&b.team.id)
}

/// Sort rankings best-first.
pub fn sort_rankings(rankings: &mut [TeamRanking], sort_order: &[String]) {
    rankings.sort_by(|a, b| compare_rankings(a, b, sort_order));
}
