use std::fmt;
use std::str::FromStr;

use depsolve_semver::Requirement;

use super::state::ConfigState;
use crate::error::{DepsolveError, Result};
use crate::package::Package;
use crate::repository::Catalog;

/// Whether a constraint asks for presence or absence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// `+req`: some installed package must match
    Present,
    /// `-req`: no installed package may match
    Absent,
}

impl ConstraintKind {
    pub fn sign(&self) -> char {
        match self {
            ConstraintKind::Present => '+',
            ConstraintKind::Absent => '-',
        }
    }
}

/// A signed requirement on the final state, e.g. `+a=1.0` or `-b`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constraint {
    pub kind: ConstraintKind,
    pub requirement: Requirement,
}

impl Constraint {
    pub fn present(requirement: Requirement) -> Self {
        Self {
            kind: ConstraintKind::Present,
            requirement,
        }
    }

    pub fn absent(requirement: Requirement) -> Self {
        Self {
            kind: ConstraintKind::Absent,
            requirement,
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        let invalid = |reason: String| DepsolveError::InvalidConstraint {
            constraint: text.to_string(),
            reason,
        };

        let kind = match text.chars().next() {
            Some('+') => ConstraintKind::Present,
            Some('-') => ConstraintKind::Absent,
            Some(_) => return Err(invalid("expected leading '+' or '-'".to_string())),
            None => return Err(invalid("constraint is empty".to_string())),
        };

        let requirement = Requirement::parse(&text[1..]).map_err(|e| invalid(e.to_string()))?;
        Ok(Self { kind, requirement })
    }

    /// Whether `state` fulfils this constraint
    pub fn is_satisfied_by(&self, catalog: &Catalog, state: &ConfigState) -> bool {
        let mut installed = state.packages().map(|id| catalog.get(id));
        let found = installed.any(|package| package.satisfies(&self.requirement));
        match self.kind {
            ConstraintKind::Present => found,
            ConstraintKind::Absent => !found,
        }
    }
}

impl FromStr for Constraint {
    type Err = DepsolveError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.sign(), self.requirement)
    }
}

/// A request specifies what the final configuration must look like.
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// Constraints in input order
    pub constraints: Vec<Constraint>,
}

impl Request {
    /// Create a new empty request
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
        }
    }

    /// Parse a list of constraint strings
    pub fn parse<S: AsRef<str>>(constraints: &[S]) -> Result<Self> {
        let constraints = constraints
            .iter()
            .map(|c| Constraint::parse(c.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { constraints })
    }

    /// Require that a package matching `requirement` ends up installed
    pub fn require(&mut self, requirement: Requirement) -> &mut Self {
        self.constraints.push(Constraint::present(requirement));
        self
    }

    /// Require that no package matching `requirement` ends up installed
    pub fn forbid(&mut self, requirement: Requirement) -> &mut Self {
        self.constraints.push(Constraint::absent(requirement));
        self
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Goal check: every constraint holds in `state`
    pub fn is_satisfied_by(&self, catalog: &Catalog, state: &ConfigState) -> bool {
        self.constraints.iter().all(|c| c.is_satisfied_by(catalog, state))
    }

    /// A package is pinned when a `+name=version` constraint names it
    /// exactly and no `-name=version` constraint names it.
    pub fn is_pinned(&self, package: &Package) -> bool {
        let named = |kind: ConstraintKind| {
            self.constraints
                .iter()
                .any(|c| c.kind == kind && c.requirement.is_exact(&package.name, &package.version))
        };
        named(ConstraintKind::Present) && !named(ConstraintKind::Absent)
    }
}
