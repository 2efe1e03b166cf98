//! A single qualification event: schedule, results and rankings
//!
//! An event moves through its stages in one direction:
//!
//! ```text
//! Created --build_schedule--> Scheduled --score_event--> Scored --rank_event--> Ranked
//! ```
//!
//! Re-scoring a scheduled event is allowed and deterministic; it drops any
//! rankings computed from the previous results.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use crate::error::{EventError, ScheduleError};
use crate::matchup::{Alliance, Match};
use crate::ranking::{sort_rankings, TeamRanking};
use crate::schedule::{ScheduleTemplate, ScheduleTemplateStore};
use crate::scoring::{MetricMap, SharedScoring, TOTAL};
use crate::team::{Team, TeamId};

#[cfg(test)]
#[path = "event_tests.rs"]
mod event_tests;

/// Lifecycle position of an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum EventStage {
    Created,
    Scheduled,
    Scored,
    Ranked,
}

impl fmt::Display for EventStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventStage::Created => "not yet scheduled",
            EventStage::Scheduled => "scheduled but not scored",
            EventStage::Scored => "scored",
            EventStage::Ranked => "ranked",
        };
        f.write_str(name)
    }
}

/// One team's outcome in one match.
///
/// Both members of an alliance share the same score vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub team: Team,
    /// Schedule position of the match this result came from
    pub match_id: usize,
    pub alliance: Alliance,
    pub scores: MetricMap,
    pub win: bool,
    pub tie: bool,
}

/// Win/loss/tie tally for one team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Record {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl Record {
    pub fn played(&self) -> u32 {
        self.wins + self.losses + self.ties
    }
}

/// Scoring and ranking rules shared by every event of a simulation.
#[derive(Clone)]
pub struct EventRules {
    pub qual_scoring: SharedScoring,
    /// Elimination-round scoring. Carried for callers; qualification
    /// scoring never consults it.
    pub elim_scoring: Option<SharedScoring>,
    /// Attributes summed per alliance before scoring
    pub tracked_attributes: Arc<[String]>,
    /// Ranking metrics, highest priority first
    pub sort_order: Arc<[String]>,
}

impl EventRules {
    pub fn new(
        qual_scoring: SharedScoring,
        tracked_attributes: impl Into<Arc<[String]>>,
        sort_order: impl Into<Arc<[String]>>,
    ) -> Self {
        Self {
            qual_scoring,
            elim_scoring: None,
            tracked_attributes: tracked_attributes.into(),
            sort_order: sort_order.into(),
        }
    }

    pub fn with_elimination_scoring(mut self, scoring: SharedScoring) -> Self {
        self.elim_scoring = Some(scoring);
        self
    }
}

impl fmt::Debug for EventRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRules")
            .field("tracked_attributes", &self.tracked_attributes)
            .field("sort_order", &self.sort_order)
            .field("has_elim_scoring", &self.elim_scoring.is_some())
            .finish_non_exhaustive()
    }
}

/// A roster mapped onto a schedule, with its results and rankings.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    teams: Vec<Team>,
    schedule: Vec<Match>,
    results: Vec<MatchResult>,
    rankings: Vec<TeamRanking>,
    #[serde(skip)]
    rules: EventRules,
    stage: EventStage,
}

impl Event {
    /// Create an event. Roster order decides which team fills which
    /// template slot: slot `n` is `teams[n - 1]`.
    pub fn new(teams: Vec<Team>, rules: EventRules) -> Self {
        Self {
            teams,
            schedule: Vec::new(),
            results: Vec::new(),
            rankings: Vec::new(),
            rules,
            stage: EventStage::Created,
        }
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn schedule(&self) -> &[Match] {
        &self.schedule
    }

    pub fn results(&self) -> &[MatchResult] {
        &self.results
    }

    pub fn rankings(&self) -> &[TeamRanking] {
        &self.rankings
    }

    pub fn rules(&self) -> &EventRules {
        &self.rules
    }

    pub fn sort_order(&self) -> &[String] {
        &self.rules.sort_order
    }

    pub fn stage(&self) -> EventStage {
        self.stage
    }

    /// Resolve the template for this roster size and build the schedule.
    pub fn build_schedule(
        &mut self,
        store: &dyn ScheduleTemplateStore,
        matches_per_team: usize,
    ) -> Result<(), EventError> {
        let template = store.lookup(self.teams.len(), matches_per_team)?;
        self.apply_template(&template)
    }

    /// Build the schedule from an already resolved template.
    ///
    /// Schedule order is template row order. Replaces any previous
    /// schedule, results and rankings.
    pub fn apply_template(&mut self, template: &ScheduleTemplate) -> Result<(), EventError> {
        if template.teams != self.teams.len() {
            return Err(EventError::RosterMismatch {
                template: template.teams,
                roster: self.teams.len(),
            });
        }

        let mut schedule = Vec::with_capacity(template.len());
        for (id, row) in template.rows.iter().enumerate() {
            let mut m = Match::new(
                id,
                Arc::clone(&self.rules.tracked_attributes),
                Arc::clone(&self.rules.qual_scoring),
            );
            for &slot in &row.red {
                m.add_red_team(self.team_in_slot(slot, id)?);
            }
            for &slot in &row.blue {
                m.add_blue_team(self.team_in_slot(slot, id)?);
            }
            schedule.push(m);
        }

        self.schedule = schedule;
        self.results.clear();
        self.rankings.clear();
        self.stage = EventStage::Scheduled;
        Ok(())
    }

    fn team_in_slot(&self, slot: usize, match_id: usize) -> Result<Team, ScheduleError> {
        slot.checked_sub(1)
            .and_then(|index| self.teams.get(index))
            .cloned()
            .ok_or(ScheduleError::SlotOutOfRange {
                line: match_id as u64 + 1,
                slot,
                teams: self.teams.len(),
            })
    }

    /// Score every scheduled match, replacing any previous results.
    ///
    /// Alliances are compared on the [`TOTAL`] metric.
    pub fn score_event(&mut self) -> Result<(), EventError> {
        if self.stage < EventStage::Scheduled {
            return Err(EventError::OutOfOrder {
                operation: "score",
                stage: self.stage,
            });
        }

        let mut results = Vec::with_capacity(self.schedule.len() * 6);
        for m in &self.schedule {
            let (red_scores, blue_scores) = m.score();
            let red_total = red_scores.get(TOTAL).copied().unwrap_or(0.0);
            let blue_total = blue_scores.get(TOTAL).copied().unwrap_or(0.0);
            let tie = red_total == blue_total;

            for team in &m.red_alliance {
                results.push(MatchResult {
                    team: team.clone(),
                    match_id: m.id,
                    alliance: Alliance::Red,
                    scores: red_scores.clone(),
                    win: red_total > blue_total,
                    tie,
                });
            }
            for team in &m.blue_alliance {
                results.push(MatchResult {
                    team: team.clone(),
                    match_id: m.id,
                    alliance: Alliance::Blue,
                    scores: blue_scores.clone(),
                    win: blue_total > red_total,
                    tie,
                });
            }
        }

        self.results = results;
        self.rankings.clear();
        self.stage = EventStage::Scored;
        Ok(())
    }

    /// Sum each sort-order metric per team and sort the roster best-first.
    ///
    /// Every roster team gets exactly one ranking, including teams the
    /// schedule never used (all metrics zero).
    pub fn rank_event(&mut self) -> Result<(), EventError> {
        if self.stage < EventStage::Scored {
            return Err(EventError::OutOfOrder {
                operation: "rank",
                stage: self.stage,
            });
        }

        let sort_order = &self.rules.sort_order;
        let mut by_team: BTreeMap<TeamId, TeamRanking> = self
            .teams
            .iter()
            .map(|team| {
                let mut ranking = TeamRanking::new(team.clone());
                for key in sort_order.iter() {
                    ranking.breakdown.insert(key.clone(), 0.0);
                }
                (team.id, ranking)
            })
            .collect();

        for result in &self.results {
            let Some(ranking) = by_team.get_mut(&result.team.id) else {
                tracing::warn!(team = result.team.id, "result for a team outside the roster");
                continue;
            };
            for key in sort_order.iter() {
                let score = result.scores.get(key).copied().unwrap_or(0.0);
                *ranking.breakdown.entry(key.clone()).or_insert(0.0) += score;
            }
        }

        for id in self.idle_teams() {
            tracing::warn!(team = id, "team played no matches");
        }

        let mut rankings: Vec<TeamRanking> = by_team.into_values().collect();
        sort_rankings(&mut rankings, sort_order);

        self.rankings = rankings;
        self.stage = EventStage::Ranked;
        Ok(())
    }

    /// Roster teams with no match results, in roster order.
    pub fn idle_teams(&self) -> Vec<TeamId> {
        let played: BTreeSet<TeamId> = self.results.iter().map(|r| r.team.id).collect();
        self.teams
            .iter()
            .map(|team| team.id)
            .filter(|id| !played.contains(id))
            .collect()
    }

    /// 1-based finishing position of a team, once ranked.
    pub fn position_of(&self, team_id: TeamId) -> Option<usize> {
        self.rankings
            .iter()
            .position(|r| r.team.id == team_id)
            .map(|index| index + 1)
    }

    /// Win/loss/tie tally from the current results.
    pub fn record(&self, team_id: TeamId) -> Record {
        let mut record = Record::default();
        for result in self.results.iter().filter(|r| r.team.id == team_id) {
            if result.tie {
                record.ties += 1;
            } else if result.win {
                record.wins += 1;
            } else {
                record.losses += 1;
            }
        }
        record
    }

    /// The match a result came from.
    pub fn match_for(&self, result: &MatchResult) -> Option<&Match> {
        self.schedule.get(result.match_id)
    }
}
