use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::package::PackageRecord;
use crate::repository::Catalog;
use crate::solver::{render_plan, Command, ConfigState, Request};

/// Parse a catalog: a JSON array of package records
pub fn parse_catalog(content: &str) -> Result<Catalog> {
    let records: Vec<PackageRecord> = serde_json::from_str(content)?;
    let catalog = Catalog::from_records(records)?;
    log::debug!("Loaded catalog with {} packages ({} names)", catalog.len(), catalog.name_count());
    Ok(catalog)
}

/// Load a catalog file
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let content = fs::read_to_string(path)?;
    parse_catalog(&content)
}

/// Parse a JSON array of strings
pub fn parse_string_list(content: &str) -> Result<Vec<String>> {
    Ok(serde_json::from_str(content)?)
}

/// Load a file holding a JSON array of strings
pub fn load_string_list(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    parse_string_list(&content)
}

/// Parse the initial state and resolve it against the catalog
pub fn parse_initial_state(content: &str, catalog: &Catalog) -> Result<ConfigState> {
    let entries = parse_string_list(content)?;
    ConfigState::resolve(catalog, &entries)
}

pub fn load_initial_state(path: &Path, catalog: &Catalog) -> Result<ConfigState> {
    let content = fs::read_to_string(path)?;
    parse_initial_state(&content, catalog)
}

/// Parse the constraint list
pub fn parse_request(content: &str) -> Result<Request> {
    let constraints = parse_string_list(content)?;
    Request::parse(&constraints)
}

pub fn load_request(path: &Path) -> Result<Request> {
    let content = fs::read_to_string(path)?;
    parse_request(&content)
}

/// Parse a plan (array of command strings), resolving each against the catalog
pub fn parse_plan(content: &str, catalog: &Catalog) -> Result<Vec<Command>> {
    parse_string_list(content)?
        .iter()
        .map(|command| Command::parse(command, catalog))
        .collect()
}

pub fn load_plan(path: &Path, catalog: &Catalog) -> Result<Vec<Command>> {
    let content = fs::read_to_string(path)?;
    parse_plan(&content, catalog)
}

/// Serialize a command log as a JSON array of strings
pub fn plan_to_json(catalog: &Catalog, commands: &[Command], pretty: bool) -> Result<String> {
    let plan = render_plan(catalog, commands);
    let json = if pretty {
        serde_json::to_string_pretty(&plan)?
    } else {
        serde_json::to_string(&plan)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DepsolveError;
    use crate::repository::PackageId;

    const CATALOG: &str = r#"[
        {"name": "a", "version": "1.0", "size": 10, "depends": [["b"]], "conflicts": ["c"]},
        {"name": "b", "version": "1.0", "size": 5},
        {"name": "c", "version": "2.3.1", "size": 7}
    ]"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = parse_catalog(CATALOG).unwrap();
        assert_eq!(catalog.len(), 3);
        let a = catalog.get(PackageId::new(0));
        assert_eq!(a.depends[0][0].name(), "b");
        assert_eq!(a.conflicts[0].name(), "c");
    }

    #[test]
    fn test_parse_catalog_rejects_malformed() {
        assert!(matches!(parse_catalog("{"), Err(DepsolveError::JsonParse(_))));
        assert!(matches!(
            parse_catalog(r#"[{"name": "a", "version": "1.0"}]"#),
            Err(DepsolveError::JsonParse(_))
        ));
        assert!(matches!(
            parse_catalog(r#"[{"name": "a", "version": "1.0a", "size": 1}]"#),
            Err(DepsolveError::InvalidVersion { .. })
        ));
    }

    #[test]
    fn test_parse_initial_and_request() {
        let catalog = parse_catalog(CATALOG).unwrap();
        let state = parse_initial_state(r#"["b", "c=2.3.1"]"#, &catalog).unwrap();
        assert_eq!(state.describe(&catalog), vec!["b=1.0", "c=2.3.1"]);

        let request = parse_request(r#"["+a=1.0", "-c"]"#).unwrap();
        assert_eq!(request.len(), 2);
        assert!(parse_request(r#"["a"]"#).is_err());
        assert!(parse_request(r#"[1, 2]"#).is_err());
    }

    #[test]
    fn test_plan_round_trip() {
        let catalog = parse_catalog(CATALOG).unwrap();
        let commands = parse_plan(r#"["-c=2.3.1", "+b", "+a=1.0"]"#, &catalog).unwrap();
        assert_eq!(commands.len(), 3);

        let json = plan_to_json(&catalog, &commands, false).unwrap();
        assert_eq!(json, r#"["-c=2.3.1","+b=1.0","+a=1.0"]"#);

        let pretty = plan_to_json(&catalog, &commands, true).unwrap();
        assert!(pretty.contains("\n  \"+b=1.0\""));
    }

    #[test]
    fn test_empty_plan() {
        let catalog = parse_catalog(CATALOG).unwrap();
        assert_eq!(plan_to_json(&catalog, &[], false).unwrap(), "[]");
    }
}
