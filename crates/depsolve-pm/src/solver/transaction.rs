use depsolve_semver::Version;

use crate::error::{DepsolveError, Result};
use crate::repository::{Catalog, PackageId};

/// Fixed price of any uninstall, independent of package size
pub const DEFAULT_UNINSTALL_PENALTY: u64 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Install,
    Uninstall,
}

impl OperationKind {
    pub fn sign(&self) -> char {
        match self {
            OperationKind::Install => '+',
            OperationKind::Uninstall => '-',
        }
    }
}

/// A single step of a plan: install or uninstall one catalog package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Command {
    pub kind: OperationKind,
    pub package: PackageId,
}

impl Command {
    pub fn install(package: PackageId) -> Self {
        Self {
            kind: OperationKind::Install,
            package,
        }
    }

    pub fn uninstall(package: PackageId) -> Self {
        Self {
            kind: OperationKind::Uninstall,
            package,
        }
    }

    /// Render as `+name=version` / `-name=version`
    pub fn render(&self, catalog: &Catalog) -> String {
        format!("{}{}", self.kind.sign(), catalog.get(self.package))
    }

    /// Parse `+name[=version]` / `-name[=version]` and resolve it against the
    /// catalog (first package by name, or the exact version when given).
    pub fn parse(text: &str, catalog: &Catalog) -> Result<Self> {
        let invalid = |reason: String| DepsolveError::InvalidCommand {
            command: text.to_string(),
            reason,
        };

        let kind = match text.chars().next() {
            Some('+') => OperationKind::Install,
            Some('-') => OperationKind::Uninstall,
            Some(_) => return Err(invalid("expected leading '+' or '-'".to_string())),
            None => return Err(invalid("command is empty".to_string())),
        };

        let body = &text[1..];
        let (name, version) = match body.split_once('=') {
            Some((name, version)) => {
                let version = Version::parse(version).map_err(|e| invalid(e.to_string()))?;
                (name, Some(version))
            }
            None => (body, None),
        };
        if name.is_empty() {
            return Err(invalid("package name is empty".to_string()));
        }

        let package = catalog
            .find(name, version.as_ref())
            .ok_or_else(|| DepsolveError::PackageNotFound { name: body.to_string() })?;

        Ok(Self { kind, package })
    }
}

/// Prices a command log.
///
/// Installs cost the package size; every uninstall costs the same fixed
/// penalty. Lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostModel {
    pub uninstall_penalty: u64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            uninstall_penalty: DEFAULT_UNINSTALL_PENALTY,
        }
    }
}

impl CostModel {
    pub fn new(uninstall_penalty: u64) -> Self {
        Self { uninstall_penalty }
    }

    pub fn command_cost(&self, catalog: &Catalog, command: &Command) -> u64 {
        match command.kind {
            OperationKind::Install => catalog.get(command.package).size,
            OperationKind::Uninstall => self.uninstall_penalty,
        }
    }

    pub fn cost(&self, catalog: &Catalog, commands: &[Command]) -> u64 {
        commands
            .iter()
            .map(|c| self.command_cost(catalog, c))
            .fold(0u64, u64::saturating_add)
    }
}

/// Render a command log as strings in application order
pub fn render_plan(catalog: &Catalog, commands: &[Command]) -> Vec<String> {
    commands.iter().map(|c| c.render(catalog)).collect()
}
