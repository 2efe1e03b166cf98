//! Monte Carlo simulation over the sample fixtures
//!
//! Runs the whole pipeline the CLI uses: config, CSV loading, built-in
//! templates, repeated runs, aggregation and JSON export.

use event_sim::{EventSimulation, SimulationConfig, SimulationError, SimulationSummary};
use std::path::PathBuf;

fn workspace_file(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .join(relative)
}

fn fixture_config(runs: usize, seed: u64) -> SimulationConfig {
    SimulationConfig {
        teams: workspace_file("fixtures/teams.csv"),
        sort_order: workspace_file("fixtures/sorting.csv"),
        schedules: None,
        matches_per_team: 12,
        num_runs: runs,
        seed: Some(seed),
    }
}

#[test]
fn fixture_simulation_produces_expected_ranks() {
    let mut sim = EventSimulation::from_config(&fixture_config(100, 2024)).unwrap();
    sim.run().unwrap();

    let roster_size = sim.teams().len();
    let averages = sim.average_ranks();
    assert_eq!(averages.len(), roster_size);

    let total: f64 = averages.values().sum();
    let expected = (roster_size * (roster_size + 1)) as f64 / 2.0;
    assert!((total - expected).abs() < 1e-6);

    for rank in averages.values() {
        assert!(*rank >= 1.0 && *rank <= roster_size as f64);
    }
    assert_eq!(sim.sort_order(), ["total", "score_2"]);
}

#[test]
fn summary_round_trips_through_json() {
    let mut sim = EventSimulation::from_config(&fixture_config(20, 7)).unwrap();
    sim.run().unwrap();
    let summary = SimulationSummary::from_simulation("fixtures", &sim);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("summary.json");
    summary.save(&path).unwrap();
    let loaded = SimulationSummary::load(&path).unwrap();

    assert_eq!(loaded.name, "fixtures");
    assert_eq!(loaded.seed, Some(7));
    assert_eq!(loaded.params.num_runs, 20);
    assert_eq!(loaded.standings.len(), sim.teams().len());
    assert!(loaded
        .standings
        .windows(2)
        .all(|w| w[0].statistics.mean <= w[1].statistics.mean));

    let report = loaded.generate_report();
    assert!(report.contains("=== Simulation: fixtures ==="));
    assert!(report.contains("Seed: 7"));
}

#[test]
fn unsupported_match_count_is_a_configuration_error() {
    let config = SimulationConfig {
        matches_per_team: 7,
        ..fixture_config(5, 1)
    };

    let err = EventSimulation::from_config(&config).err().unwrap();
    assert!(matches!(err, SimulationError::Schedule(_)));
}

#[test]
fn missing_roster_is_a_load_error() {
    let config = SimulationConfig {
        teams: workspace_file("fixtures/no_such_roster.csv"),
        ..fixture_config(5, 1)
    };

    let err = EventSimulation::from_config(&config).err().unwrap();
    assert!(matches!(err, SimulationError::Load(_)));
}
