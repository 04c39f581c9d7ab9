//! Solve command - find the cheapest plan that reaches the constraints.

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use std::path::PathBuf;
use std::time::Duration;

use depsolve_pm::{
    json::{load_catalog, load_initial_state, load_request, plan_to_json},
    DeadlineCheck, Heuristics, SearchOptions, Solver, Termination,
};

use crate::config::DepsolveConfig;
use crate::progress::SearchProgress;
use crate::{EXIT_SUCCESS, EXIT_TIMED_OUT, EXIT_UNSATISFIABLE};

#[derive(Args, Debug, Default)]
pub struct SolveArgs {
    /// Catalog file (JSON array of package records)
    #[arg(value_name = "CATALOG")]
    pub catalog: PathBuf,

    /// Initial state file (JSON array of name or name=version)
    #[arg(value_name = "INITIAL")]
    pub initial: PathBuf,

    /// Constraints file (JSON array of +req / -req)
    #[arg(value_name = "CONSTRAINTS")]
    pub constraints: PathBuf,

    /// Wall-clock budget in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Cost of each uninstall command
    #[arg(long, value_name = "COST")]
    pub uninstall_penalty: Option<u64>,

    /// Check the deadline before every step, not only on non-improving goals
    #[arg(long)]
    pub strict_deadline: bool,

    /// Re-check every installed package's dependencies on each step
    #[arg(long)]
    pub full_revalidation: bool,

    /// Allow uninstalling packages pinned by +name=version
    #[arg(long)]
    pub no_pins: bool,

    /// Disable all branch pruning
    #[arg(long)]
    pub no_prune: bool,

    /// Print the plan cost on stderr
    #[arg(long)]
    pub show_cost: bool,

    /// Hide the progress spinner
    #[arg(long)]
    pub no_progress: bool,

    /// Print the plan on a single line
    #[arg(long)]
    pub compact: bool,
}

/// Search options from the configuration file with command-line overrides applied
fn search_options(args: &SolveArgs, config: &DepsolveConfig) -> SearchOptions {
    let mut options = config.search.to_options();

    if let Some(ms) = args.timeout_ms {
        options.timeout = Duration::from_millis(ms);
    }
    if let Some(penalty) = args.uninstall_penalty {
        options.uninstall_penalty = penalty;
    }
    if args.strict_deadline {
        options.deadline_check = DeadlineCheck::EveryStep;
    }
    if args.full_revalidation {
        options.full_revalidation = true;
    }
    if args.no_pins {
        options.heuristics.respect_pins = false;
    }
    if args.no_prune {
        options.heuristics = Heuristics::none();
    }

    options
}

pub fn execute(args: SolveArgs, config: &DepsolveConfig) -> Result<i32> {
    let catalog = load_catalog(&args.catalog)
        .with_context(|| format!("Failed to load catalog {}", args.catalog.display()))?;
    let initial = load_initial_state(&args.initial, &catalog)
        .with_context(|| format!("Failed to load initial state {}", args.initial.display()))?;
    let request = load_request(&args.constraints)
        .with_context(|| format!("Failed to load constraints {}", args.constraints.display()))?;

    let options = search_options(&args, config);
    log::debug!("Search options: {:?}", options);

    let progress = SearchProgress::new(!args.no_progress && console::user_attended_stderr());
    let outcome = Solver::new(&catalog, &request)
        .with_options(options)
        .with_listener(&progress)
        .solve(initial);
    progress.finish();

    log::info!(
        "Entered {} states, reached {} goals, max depth {} in {:.3}s",
        outcome.stats.states_entered,
        outcome.stats.goals_reached,
        outcome.stats.max_depth,
        outcome.stats.elapsed.as_secs_f64()
    );

    let timed_out = outcome.is_timed_out_without_solution();
    let Some(solution) = outcome.solution else {
        println!("No solution found.");
        if timed_out {
            eprintln!(
                "{} Search deadline reached before any plan was found",
                style("Warning:").yellow().bold()
            );
            return Ok(EXIT_TIMED_OUT);
        }
        return Ok(EXIT_UNSATISFIABLE);
    };

    let pretty = config.output.pretty && !args.compact;
    println!("{}", plan_to_json(&catalog, &solution.commands, pretty)?);

    if args.show_cost {
        eprintln!("{} {}", style("Cost:").cyan(), solution.cost);
    }
    if outcome.termination == Termination::DeadlineExceeded {
        eprintln!(
            "{} Search deadline reached, plan may not be the cheapest",
            style("Warning:").yellow().bold()
        );
    }

    Ok(EXIT_SUCCESS)
}
