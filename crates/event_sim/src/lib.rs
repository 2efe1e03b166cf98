//! Event simulation runner
//!
//! This crate provides infrastructure for:
//! - Loading team rosters and ranking sort orders from CSV
//! - Running many randomized qualification events over a fixed schedule
//! - Aggregating each team's expected rank
//! - Generating reports and JSON summaries
//!
//! # Usage
//!
//! ```bash
//! # 500 runs of a 12-match event for the sample roster
//! cargo run -p event_sim -- run --teams fixtures/teams.csv --sort-order fixtures/sorting.csv --runs 500
//!
//! # List the schedule templates available
//! cargo run -p event_sim -- templates
//! ```

mod config;
mod error;
mod loader;
mod report;
mod results;
mod simulation;

pub use config::*;
pub use error::*;
pub use loader::*;
pub use report::*;
pub use results::*;
pub use simulation::*;
