//! Event simulation CLI
//!
//! Run Monte Carlo simulations of a qualification event and report each
//! team's expected rank.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use event_sim::{
    render_rankings, render_results, render_schedule, EventSimulation, SimulationConfig,
    SimulationSummary,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "event_sim")]
#[command(about = "Estimate expected qualification ranks by repeated simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation and print the expected ranks
    Run(RunArgs),

    /// List available schedule templates
    Templates {
        /// Template directory (default: built-in)
        #[arg(long)]
        schedules: Option<PathBuf>,
    },
}

#[derive(Args)]
struct RunArgs {
    /// TOML config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Roster CSV (header of attribute names, one row per team)
    #[arg(long)]
    teams: Option<PathBuf>,

    /// CSV whose header lists ranking metrics, highest priority first
    #[arg(long)]
    sort_order: Option<PathBuf>,

    /// Directory of `<teams>_<matches>.csv` templates (default: built-in)
    #[arg(long)]
    schedules: Option<PathBuf>,

    /// Matches played by each team
    #[arg(long, short = 'm')]
    matches: Option<usize>,

    /// Number of simulated events
    #[arg(long, short = 'n')]
    runs: Option<usize>,

    /// Seed for reproducible permutations
    #[arg(long)]
    seed: Option<u64>,

    /// Also print schedule, results and rankings of run N (0-based)
    #[arg(long)]
    show_run: Option<usize>,

    /// Write the summary as JSON
    #[arg(long)]
    json: Option<PathBuf>,
}

impl RunArgs {
    /// Config file (or defaults) with any flags applied on top.
    fn resolve_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => SimulationConfig::default(),
        };

        if let Some(teams) = &self.teams {
            config.teams = teams.clone();
        }
        if let Some(sort_order) = &self.sort_order {
            config.sort_order = sort_order.clone();
        }
        if self.schedules.is_some() {
            config.schedules = self.schedules.clone();
        }
        if let Some(matches) = self.matches {
            config.matches_per_team = matches;
        }
        if let Some(runs) = self.runs {
            config.num_runs = runs;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run_simulation(args: &RunArgs) -> Result<()> {
    let config = args.resolve_config()?;

    let mut sim = EventSimulation::from_config(&config).context("Failed to set up simulation")?;
    info!(seed = ?sim.seed(), "running {} events", config.num_runs);
    sim.run().context("Simulation failed")?;

    if let Some(index) = args.show_run {
        let Some(event) = sim.runs().get(index) else {
            bail!("run {} does not exist ({} runs)", index, sim.runs().len());
        };
        println!("=== Run {}: Schedule ===\n{}", index, render_schedule(event));
        println!("=== Run {}: Results ===\n{}", index, render_results(event));
        println!("=== Run {}: Rankings ===\n{}", index, render_rankings(event));
    }

    let name = config.teams.display().to_string();
    let summary = SimulationSummary::from_simulation(&name, &sim);
    summary.print_report();

    if let Some(path) = &args.json {
        summary
            .save(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "summary written");
    }
    Ok(())
}

fn list_templates(schedules: Option<PathBuf>) {
    let config = SimulationConfig {
        schedules,
        ..Default::default()
    };
    let store = config.template_store();

    let keys = store.available();
    if keys.is_empty() {
        println!("No schedule templates found.");
        return;
    }
    println!("{:>6} {:>8}", "Teams", "Matches");
    println!("{}", "-".repeat(15));
    for (teams, matches) in keys {
        println!("{:>6} {:>8}", teams, matches);
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run_simulation(&args),
        Commands::Templates { schedules } => {
            list_templates(schedules);
            Ok(())
        }
    }
}
