/// Integration tests for planning from files on disk
///
/// These tests write catalog, initial state and constraint documents to a
/// temporary directory and run them through the loaders and the solver.

use std::fs;
use std::path::PathBuf;

use depsolve_pm::json::{load_catalog, load_initial_state, load_plan, load_request, plan_to_json};
use depsolve_pm::{CostModel, DepsolveError, SearchOptions, Solver, Termination};
use tempfile::TempDir;

const CATALOG: &str = r#"[
    {"name": "a", "version": "1.0", "size": 10, "depends": [["b", "c=1.0"]], "conflicts": ["d"]},
    {"name": "b", "version": "1.0", "size": 50},
    {"name": "c", "version": "1.0", "size": 20},
    {"name": "d", "version": "2.0", "size": 1}
]"#;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_solve_from_files() {
    let dir = TempDir::new().unwrap();
    let catalog_path = write(&dir, "repository.json", CATALOG);
    let initial_path = write(&dir, "initial.json", r#"["d=2.0"]"#);
    let constraints_path = write(&dir, "constraints.json", r#"["+a"]"#);

    let catalog = load_catalog(&catalog_path).unwrap();
    let initial = load_initial_state(&initial_path, &catalog).unwrap();
    let request = load_request(&constraints_path).unwrap();

    let outcome = Solver::new(&catalog, &request).solve(initial);
    let solution = outcome.solution.expect("plan should exist");

    assert_eq!(outcome.termination, Termination::Exhausted);
    assert_eq!(solution.plan(&catalog), vec!["+c=1.0", "-d=2.0", "+a=1.0"]);
    assert_eq!(solution.cost, 1_000_030);

    let json = plan_to_json(&catalog, &solution.commands, false).unwrap();
    assert_eq!(json, r#"["+c=1.0","-d=2.0","+a=1.0"]"#);
}

#[test]
fn test_unsatisfiable_from_files() {
    let dir = TempDir::new().unwrap();
    let catalog_path = write(&dir, "repository.json", CATALOG);
    let initial_path = write(&dir, "initial.json", "[]");
    let constraints_path = write(&dir, "constraints.json", r#"["+a", "+d"]"#);

    let catalog = load_catalog(&catalog_path).unwrap();
    let initial = load_initial_state(&initial_path, &catalog).unwrap();
    let request = load_request(&constraints_path).unwrap();

    let outcome = Solver::new(&catalog, &request)
        .with_options(SearchOptions::new().uninstall_penalty(1))
        .solve(initial);

    assert!(!outcome.is_solved());
    assert_eq!(outcome.termination, Termination::Exhausted);
}

#[test]
fn test_price_plan_file() {
    let dir = TempDir::new().unwrap();
    let catalog_path = write(&dir, "repository.json", CATALOG);
    let plan_path = write(&dir, "plan.json", r#"["-d=2.0", "+b", "+a=1.0"]"#);

    let catalog = load_catalog(&catalog_path).unwrap();
    let commands = load_plan(&plan_path, &catalog).unwrap();

    assert_eq!(CostModel::default().cost(&catalog, &commands), 1_000_060);
    assert_eq!(CostModel::new(0).cost(&catalog, &commands), 60);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = load_catalog(&dir.path().join("missing.json"));

    assert!(matches!(result, Err(DepsolveError::Io(_))));
}

#[test]
fn test_malformed_documents() {
    let dir = TempDir::new().unwrap();
    let catalog_path = write(&dir, "repository.json", CATALOG);
    let catalog = load_catalog(&catalog_path).unwrap();

    let bad_constraints = write(&dir, "constraints.json", r#"["a"]"#);
    assert!(matches!(
        load_request(&bad_constraints),
        Err(DepsolveError::InvalidConstraint { .. })
    ));

    let bad_initial = write(&dir, "initial.json", r#"["a=1.x"]"#);
    assert!(matches!(
        load_initial_state(&bad_initial, &catalog),
        Err(DepsolveError::InvalidEntry { .. })
    ));

    let bad_plan = write(&dir, "plan.json", r#"["+zzz"]"#);
    assert!(matches!(
        load_plan(&bad_plan, &catalog),
        Err(DepsolveError::PackageNotFound { .. })
    ));
}
