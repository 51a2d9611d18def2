//! `los` command-line interface.

use clap::{Args, Parser, Subcommand, ValueEnum};
use los_runner::{load_scenario, run_scenario, RunOptions, RunnerError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Line-of-sight analysis over DEM heightmaps
#[derive(Parser)]
#[command(name = "los")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Line-of-sight analysis over DEM heightmaps", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate every query in a scenario
    Run(RunArgs),
    /// Parse a scenario and build its terrain without running queries
    Validate(ValidateArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Scenario YAML file
    scenario: PathBuf,

    /// Rays per graded estimate, overriding the scenario
    #[arg(short, long)]
    samples: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Evaluate sampled rays in parallel
    #[arg(long)]
    parallel: bool,
}

#[derive(Args)]
struct ValidateArgs {
    /// Scenario YAML file
    scenario: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: RunArgs) -> Result<(), RunnerError> {
    let scenario = load_scenario(&args.scenario)?;
    let options = RunOptions {
        samples: args.samples,
        parallel: args.parallel,
    };
    let report = run_scenario(&scenario, &options)?;

    match args.format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", report.render_json()?),
    }
    Ok(())
}

fn validate(args: ValidateArgs) -> Result<(), RunnerError> {
    let scenario = load_scenario(&args.scenario)?;
    let grid = scenario.terrain.build()?;
    let map = grid.as_heightmap();
    for (index, query) in scenario.queries.iter().enumerate() {
        let name = query.label(index);
        query.observer.resolve(&map, &name, "observer")?;
        query.target.resolve(&map, &name, "target")?;
    }
    info!(
        width = grid.width(),
        height = grid.height(),
        queries = scenario.queries.len(),
        "scenario is valid"
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let result = match cli.command {
        Commands::Run(args) => run(args),
        Commands::Validate(args) => validate(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
