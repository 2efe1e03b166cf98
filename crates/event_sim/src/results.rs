//! Simulation summary storage and reporting

use event_core::Team;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::SimulationError;
use crate::report::render_table;
use crate::simulation::{EventSimulation, RankStatistics, SimulationParams};

/// Complete simulation outcome, ready to be saved or printed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSummary {
    /// Name/description of the simulation
    pub name: String,
    pub params: SimulationParams,
    /// Seed the runs were drawn from, if known
    pub seed: Option<u64>,
    /// Ranking metrics, highest priority first
    pub sort_order: Vec<String>,
    /// One entry per team, best expected rank first
    pub standings: Vec<Standing>,
}

/// A team and its rank statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Standing {
    pub team: Team,
    pub statistics: RankStatistics,
}

impl SimulationSummary {
    pub fn from_simulation<R: Rng>(name: &str, sim: &EventSimulation<R>) -> Self {
        let standings = sim
            .rank_statistics()
            .into_iter()
            .filter_map(|statistics| {
                let team = sim.teams().iter().find(|t| t.id == statistics.team_id)?;
                Some(Standing {
                    team: team.clone(),
                    statistics,
                })
            })
            .collect();

        Self {
            name: name.to_string(),
            params: sim.params(),
            seed: sim.seed(),
            sort_order: sim.sort_order().to_vec(),
            standings,
        }
    }

    /// Save summary to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), SimulationError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| SimulationError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load summary from a JSON file
    pub fn load(path: &Path) -> Result<Self, SimulationError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SimulationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!("=== Simulation: {} ===\n\n", self.name));
        report.push_str(&format!(
            "Runs: {}, Matches/team: {}, Teams: {}\n",
            self.params.num_runs,
            self.params.matches_per_team,
            self.standings.len()
        ));
        if let Some(seed) = self.seed {
            report.push_str(&format!("Seed: {}\n", seed));
        }
        report.push_str(&format!("Sort order: {}\n\n", self.sort_order.join(", ")));

        let headers = ["Team", "Expected", "Std Dev", "Best", "Worst"];
        let rows: Vec<Vec<String>> = self
            .standings
            .iter()
            .map(|s| {
                vec![
                    s.team.id.to_string(),
                    format!("{:.2}", s.statistics.mean),
                    format!("{:.2}", s.statistics.std_dev),
                    s.statistics.best.to_string(),
                    s.statistics.worst.to_string(),
                ]
            })
            .collect();
        report.push_str(&render_table(&headers, &rows));

        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}
