mod config;
mod cost;
mod progress;
mod solve;
mod validate;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;
use std::process::ExitCode;

use config::DepsolveConfig;

/// A plan was found, or the inputs are valid
pub const EXIT_SUCCESS: i32 = 0;
/// The search finished without reaching any goal state
pub const EXIT_UNSATISFIABLE: i32 = 1;
/// Malformed input or any other error
pub const EXIT_ERROR: i32 = 2;
/// The deadline fired before any goal state was reached
pub const EXIT_TIMED_OUT: i32 = 3;

#[derive(Parser, Debug)]
#[command(name = "depsolve")]
#[command(about = "Find the cheapest install/uninstall plan over a package catalog")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: depsolve.toml searched upward)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search for the cheapest plan reaching the constraints
    Solve(solve::SolveArgs),

    /// Load and check input files without searching
    Validate(validate::ValidateArgs),

    /// Price an existing plan
    Cost(cost::CostArgs),
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run() -> Result<i32> {
    let args = Args::parse();
    init_logger(args.verbose);

    let config = DepsolveConfig::resolve(args.config.as_deref())?;

    match args.command {
        Commands::Solve(solve_args) => solve::execute(solve_args, &config),
        Commands::Validate(validate_args) => validate::execute(validate_args),
        Commands::Cost(cost_args) => cost::execute(cost_args, &config),
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("Error: {}", e);
            for cause in e.chain().skip(1) {
                eprintln!("  Caused by: {}", cause);
            }
            ExitCode::from(EXIT_ERROR as u8)
        }
    }
}
