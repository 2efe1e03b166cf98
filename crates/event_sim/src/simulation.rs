//! Monte Carlo event simulation
//!
//! The schedule template is fixed: slot `n` always plays the same matches.
//! Each run shuffles which team sits in which slot, scores and ranks the
//! resulting event, and the finishing positions are averaged per team.
//!
//! Runs share nothing mutable, so the order they are scored in does not
//! affect any aggregate.

use event_core::{
    Event, EventRules, QualificationScoring, ScheduleTemplateStore, SharedScoring, Team, TeamId,
};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::loader::{load_roster, load_sort_order, Roster};

#[cfg(test)]
#[path = "simulation_tests.rs"]
mod simulation_tests;

/// Size of a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationParams {
    pub matches_per_team: usize,
    pub num_runs: usize,
}

/// Finishing-position statistics for one team across all ranked runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankStatistics {
    pub team_id: TeamId,
    /// Expected (mean) 1-based rank
    pub mean: f64,
    /// Population standard deviation of the rank
    pub std_dev: f64,
    pub best: usize,
    pub worst: usize,
    pub runs: usize,
}

/// Repeated randomized runs of one event over a fixed schedule template.
pub struct EventSimulation<R = ChaCha8Rng> {
    teams: Vec<Team>,
    attributes: Vec<String>,
    rules: EventRules,
    params: SimulationParams,
    runs: Vec<Event>,
    rng: R,
    seed: Option<u64>,
}

impl EventSimulation<ChaCha8Rng> {
    /// Simulation driven by a ChaCha8 stream seeded from `seed`.
    pub fn seeded(roster: Roster, sort_order: Vec<String>, params: SimulationParams, seed: u64) -> Self {
        let mut sim = Self::new(roster, sort_order, params, ChaCha8Rng::seed_from_u64(seed));
        sim.seed = Some(seed);
        sim
    }

    /// Load inputs named by the config and prepare every run.
    pub fn from_config(config: &SimulationConfig) -> Result<Self, SimulationError> {
        let roster = load_roster(&config.teams)?;
        let sort_order = load_sort_order(&config.sort_order)?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let params = SimulationParams {
            matches_per_team: config.matches_per_team,
            num_runs: config.num_runs,
        };

        let mut sim = Self::seeded(roster, sort_order, params, seed);
        sim.prepare(config.template_store().as_ref())?;
        Ok(sim)
    }
}

impl<R: Rng> EventSimulation<R> {
    /// Create a simulation using the standard qualification scoring.
    ///
    /// No runs exist until [`prepare`](Self::prepare) is called.
    pub fn new(roster: Roster, sort_order: Vec<String>, params: SimulationParams, rng: R) -> Self {
        if sort_order.is_empty() {
            warn!("empty sort order; rankings will fall back to team id");
        }
        let rules = EventRules::new(
            QualificationScoring::shared(),
            roster.attributes.clone(),
            sort_order,
        );
        Self {
            teams: roster.teams,
            attributes: roster.attributes,
            rules,
            params,
            runs: Vec::new(),
            rng,
            seed: None,
        }
    }

    /// Create and prepare in one step.
    pub fn build(
        roster: Roster,
        sort_order: Vec<String>,
        params: SimulationParams,
        store: &dyn ScheduleTemplateStore,
        rng: R,
    ) -> Result<Self, SimulationError> {
        let mut sim = Self::new(roster, sort_order, params, rng);
        sim.prepare(store)?;
        Ok(sim)
    }

    /// Replace the qualification scoring function. Call before `prepare`.
    pub fn with_scoring(mut self, scoring: SharedScoring) -> Self {
        self.rules.qual_scoring = scoring;
        self
    }

    pub fn with_elimination_scoring(mut self, scoring: SharedScoring) -> Self {
        self.rules = self.rules.with_elimination_scoring(scoring);
        self
    }

    /// Resolve the template once and build `num_runs` events, each on an
    /// independent permutation of the roster.
    pub fn prepare(&mut self, store: &dyn ScheduleTemplateStore) -> Result<(), SimulationError> {
        let template = store.lookup(self.teams.len(), self.params.matches_per_team)?;
        info!(
            teams = self.teams.len(),
            matches_per_team = self.params.matches_per_team,
            schedule_len = template.len(),
            runs = self.params.num_runs,
            "preparing simulation"
        );

        let mut runs = Vec::with_capacity(self.params.num_runs);
        for _ in 0..self.params.num_runs {
            let mut event = Event::new(self.permute_teams(), self.rules.clone());
            event.apply_template(&template)?;
            runs.push(event);
        }
        self.runs = runs;
        Ok(())
    }

    /// Uniformly random ordering of the full roster.
    pub fn permute_teams(&mut self) -> Vec<Team> {
        let mut teams = self.teams.clone();
        teams.shuffle(&mut self.rng);
        teams
    }

    /// Score and rank every prepared run.
    pub fn run(&mut self) -> Result<(), SimulationError> {
        for (index, event) in self.runs.iter_mut().enumerate() {
            event.score_event()?;
            event.rank_event()?;
            if let Some(leader) = event.rankings().first() {
                debug!(run = index, leader = leader.team.id, "run ranked");
            }
        }
        info!(runs = self.runs.len(), "simulation complete");
        Ok(())
    }

    /// Expected 1-based rank per team id.
    ///
    /// Each ranked run adds `position / num_runs`; runs that have not been
    /// ranked contribute nothing.
    pub fn average_ranks(&self) -> BTreeMap<TeamId, f64> {
        let num_runs = self.params.num_runs as f64;
        let mut averages = BTreeMap::new();
        for event in &self.runs {
            for (index, ranking) in event.rankings().iter().enumerate() {
                *averages.entry(ranking.team.id).or_insert(0.0) += (index + 1) as f64 / num_runs;
            }
        }
        averages
    }

    /// Mean, spread and extremes of each team's rank, best expected rank first.
    pub fn rank_statistics(&self) -> Vec<RankStatistics> {
        let mut positions: BTreeMap<TeamId, Vec<usize>> = BTreeMap::new();
        for event in &self.runs {
            for (index, ranking) in event.rankings().iter().enumerate() {
                positions.entry(ranking.team.id).or_default().push(index + 1);
            }
        }

        let mut stats: Vec<RankStatistics> = positions
            .into_iter()
            .map(|(team_id, ranks)| {
                let n = ranks.len() as f64;
                let mean = ranks.iter().sum::<usize>() as f64 / n;
                let variance = ranks
                    .iter()
                    .map(|&r| (r as f64 - mean).powi(2))
                    .sum::<f64>()
                    / n;
                RankStatistics {
                    team_id,
                    mean,
                    std_dev: variance.sqrt(),
                    best: ranks.iter().copied().min().unwrap_or(0),
                    worst: ranks.iter().copied().max().unwrap_or(0),
                    runs: ranks.len(),
                }
            })
            .collect();

        stats.sort_by(|a, b| a.mean.total_cmp(&b.mean).then(a.team_id.cmp(&b.team_id)));
        stats
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn sort_order(&self) -> &[String] {
        &self.rules.sort_order
    }

    pub fn rules(&self) -> &EventRules {
        &self.rules
    }

    pub fn params(&self) -> SimulationParams {
        self.params
    }

    pub fn runs(&self) -> &[Event] {
        &self.runs
    }

    /// Seed of the random stream, when it was built from one.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}
