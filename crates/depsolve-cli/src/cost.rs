//! Cost command - price an existing plan.

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use std::path::PathBuf;

use depsolve_pm::{
    json::{load_catalog, load_plan},
    CostModel, OperationKind,
};

use crate::config::DepsolveConfig;
use crate::EXIT_SUCCESS;

#[derive(Args, Debug)]
pub struct CostArgs {
    /// Catalog file (JSON array of package records)
    #[arg(value_name = "CATALOG")]
    pub catalog: PathBuf,

    /// Plan file (JSON array of +name=version / -name=version)
    #[arg(value_name = "PLAN")]
    pub plan: PathBuf,

    /// Cost of each uninstall command
    #[arg(long, value_name = "COST")]
    pub uninstall_penalty: Option<u64>,

    /// List the price of every command
    #[arg(long)]
    pub breakdown: bool,
}

pub fn execute(args: CostArgs, config: &DepsolveConfig) -> Result<i32> {
    let catalog = load_catalog(&args.catalog)
        .with_context(|| format!("Failed to load catalog {}", args.catalog.display()))?;
    let commands = load_plan(&args.plan, &catalog)
        .with_context(|| format!("Failed to load plan {}", args.plan.display()))?;

    let penalty = args
        .uninstall_penalty
        .unwrap_or_else(|| config.search.to_options().uninstall_penalty);
    let model = CostModel::new(penalty);

    if args.breakdown {
        for command in &commands {
            let sign = match command.kind {
                OperationKind::Install => style("+").green(),
                OperationKind::Uninstall => style("-").red(),
            };
            eprintln!(
                "  {} {} {}",
                sign,
                style(catalog.get(command.package)).white().bold(),
                model.command_cost(&catalog, command)
            );
        }
    }

    println!("{}", model.cost(&catalog, &commands));
    Ok(EXIT_SUCCESS)
}
