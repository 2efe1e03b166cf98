//! A single scheduled match between a red and a blue alliance

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::scoring::{MetricMap, SharedScoring};
use crate::team::{AttributeMap, Team, TeamId};

#[cfg(test)]
#[path = "matchup_tests.rs"]
mod matchup_tests;

/// Which side of a match a team played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Alliance {
    Red,
    Blue,
}

/// One pairing of two alliances, scored with the event's scoring function.
///
/// Alliances are filled in call order by [`Match::add_red_team`] and
/// [`Match::add_blue_team`]. Sizes are not checked here; the schedule
/// template guarantees them.
#[derive(Clone, Serialize)]
pub struct Match {
    /// Position in the schedule
    pub id: usize,
    pub red_alliance: Vec<Team>,
    pub blue_alliance: Vec<Team>,
    #[serde(skip)]
    tracked_attributes: Arc<[String]>,
    #[serde(skip)]
    scoring: SharedScoring,
}

impl Match {
    pub fn new(id: usize, tracked_attributes: Arc<[String]>, scoring: SharedScoring) -> Self {
        Self {
            id,
            red_alliance: Vec::new(),
            blue_alliance: Vec::new(),
            tracked_attributes,
            scoring,
        }
    }

    pub fn add_red_team(&mut self, team: Team) {
        self.red_alliance.push(team);
    }

    pub fn add_blue_team(&mut self, team: Team) {
        self.blue_alliance.push(team);
    }

    pub fn tracked_attributes(&self) -> &[String] {
        &self.tracked_attributes
    }

    /// Sum every tracked attribute over the given alliance.
    pub fn alliance_attributes(&self, alliance: &[Team]) -> AttributeMap {
        self.tracked_attributes
            .iter()
            .map(|name| {
                let sum = alliance.iter().map(|team| team.get_attribute(name)).sum();
                (name.clone(), sum)
            })
            .collect()
    }

    pub fn red_attributes(&self) -> AttributeMap {
        self.alliance_attributes(&self.red_alliance)
    }

    pub fn blue_attributes(&self) -> AttributeMap {
        self.alliance_attributes(&self.blue_alliance)
    }

    /// Score both alliances. Returns `(red_scores, blue_scores)`.
    pub fn score(&self) -> (MetricMap, MetricMap) {
        let red = self
            .scoring
            .compute(&self.tracked_attributes, &self.red_attributes());
        let blue = self
            .scoring
            .compute(&self.tracked_attributes, &self.blue_attributes());
        (red, blue)
    }

    /// Red team ids followed by blue team ids, in alliance order.
    pub fn team_ids(&self) -> Vec<TeamId> {
        self.red_alliance
            .iter()
            .chain(self.blue_alliance.iter())
            .map(|team| team.id)
            .collect()
    }

    /// Alliance the team played on, if it played in this match.
    pub fn alliance_of(&self, team_id: TeamId) -> Option<Alliance> {
        if self.red_alliance.iter().any(|t| t.id == team_id) {
            Some(Alliance::Red)
        } else if self.blue_alliance.iter().any(|t| t.id == team_id) {
            Some(Alliance::Blue)
        } else {
            None
        }
    }
}

impl fmt::Debug for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("id", &self.id)
            .field("red", &self.red_alliance.iter().map(|t| t.id).collect::<Vec<_>>())
            .field("blue", &self.blue_alliance.iter().map(|t| t.id).collect::<Vec<_>>())
            .field("tracked_attributes", &self.tracked_attributes)
            .finish_non_exhaustive()
    }
}
