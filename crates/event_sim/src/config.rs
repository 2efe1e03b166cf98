//! Simulation configuration
//!
//! Read from TOML. Every field has a default, so a config file only needs
//! the values it changes:
//!
//! ```toml
//! teams = "fixtures/teams.csv"
//! sort_order = "fixtures/sorting.csv"
//! matches_per_team = 12
//! num_runs = 500
//! seed = 42
//! ```

use event_core::{BuiltinTemplates, DirectoryTemplates, ScheduleTemplateStore};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::SimulationError;

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Roster CSV
    pub teams: PathBuf,
    /// CSV whose header lists the ranking metrics
    pub sort_order: PathBuf,
    /// Template directory; the built-in templates are used when unset
    pub schedules: Option<PathBuf>,
    pub matches_per_team: usize,
    pub num_runs: usize,
    /// Fixed seed for reproducible runs; drawn at random when unset
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            teams: PathBuf::from("fixtures/teams.csv"),
            sort_order: PathBuf::from("fixtures/sorting.csv"),
            schedules: None,
            matches_per_team: 12,
            num_runs: 100,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self, SimulationError> {
        let contents =
            std::fs::read_to_string(path).map_err(|source| SimulationError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, SimulationError> {
        Ok(toml::from_str(contents)?)
    }

    /// Template store selected by this config.
    pub fn template_store(&self) -> Box<dyn ScheduleTemplateStore> {
        match &self.schedules {
            Some(dir) => Box::new(DirectoryTemplates::new(dir)),
            None => Box::new(BuiltinTemplates),
        }
    }
}
