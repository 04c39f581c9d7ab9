//! Validate command - load inputs and report problems without searching.

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use std::path::PathBuf;

use depsolve_pm::{
    json::{load_catalog, load_request, load_string_list},
    ConfigState, Slot, StateValidator,
};

use crate::{EXIT_SUCCESS, EXIT_UNSATISFIABLE};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Catalog file (JSON array of package records)
    #[arg(value_name = "CATALOG")]
    pub catalog: PathBuf,

    /// Initial state file to resolve against the catalog
    #[arg(long, value_name = "FILE")]
    pub initial: Option<PathBuf>,

    /// Constraints file to parse
    #[arg(long, value_name = "FILE")]
    pub constraints: Option<PathBuf>,
}

pub fn execute(args: ValidateArgs) -> Result<i32> {
    let catalog = load_catalog(&args.catalog)
        .with_context(|| format!("Failed to load catalog {}", args.catalog.display()))?;

    println!(
        "{} {} packages ({} names)",
        style("Catalog:").green().bold(),
        catalog.len(),
        catalog.name_count()
    );

    let mut exit_code = EXIT_SUCCESS;

    let initial = match &args.initial {
        Some(path) => {
            let entries = load_string_list(path)
                .with_context(|| format!("Failed to load initial state {}", path.display()))?;
            let state = ConfigState::resolve(&catalog, &entries)
                .with_context(|| format!("Failed to resolve initial state {}", path.display()))?;

            println!("{} {} entries", style("Initial state:").green().bold(), state.len());

            for (entry, slot) in entries.iter().zip(state.slots()) {
                if *slot == Slot::Unresolved {
                    println!("  {} {} matches no catalog package", style("!").yellow(), style(entry).white());
                    exit_code = EXIT_UNSATISFIABLE;
                }
            }

            if !state.has_unresolved() {
                let validator = StateValidator::new(&catalog).with_full_revalidation(true);
                if let Err(violation) = validator.check(&state) {
                    println!("  {} {}", style("!").yellow(), violation.describe(&catalog));
                }
            }

            Some(state)
        }
        None => None,
    };

    if let Some(path) = &args.constraints {
        let request =
            load_request(path).with_context(|| format!("Failed to load constraints {}", path.display()))?;

        println!("{} {} constraints", style("Constraints:").green().bold(), request.len());

        for constraint in &request.constraints {
            if catalog.find_by_name(constraint.requirement.name()).is_empty() {
                println!(
                    "  {} {} names no catalog package",
                    style("!").yellow(),
                    style(constraint).white()
                );
            }
        }

        if let Some(state) = &initial {
            if request.is_satisfied_by(&catalog, state) {
                println!("{} Initial state already satisfies every constraint", style("Info:").cyan());
            }
        }
    }

    Ok(exit_code)
}
