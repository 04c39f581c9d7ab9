use depsolve_semver::{Requirement, Version};
use serde::Deserialize;
use std::fmt;

use crate::error::{DepsolveError, Result};

/// Serialized catalog entry.
///
/// `depends` is an AND of clauses, each clause an OR of requirement strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackageRecord {
    pub name: String,
    pub version: String,
    pub size: u64,
    #[serde(default)]
    pub depends: Vec<Vec<String>>,
    #[serde(default)]
    pub conflicts: Vec<String>,
}

/// An immutable catalog package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// Package name
    pub name: String,
    /// Dotted-integer version
    pub version: Version,
    /// Install cost
    pub size: u64,
    /// Dependency clauses (AND of ORs)
    pub depends: Vec<Vec<Requirement>>,
    /// Requirements no other installed package may match
    pub conflicts: Vec<Requirement>,
}

impl Package {
    /// Create a package with no size, dependencies or conflicts
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            version,
            size: 0,
            depends: Vec::new(),
            conflicts: Vec::new(),
        }
    }

    /// Validate a serialized record, parsing its version and requirements.
    pub fn from_record(record: PackageRecord) -> Result<Self> {
        let version = Version::parse(&record.version).map_err(|source| DepsolveError::InvalidVersion {
            package: record.name.clone(),
            source,
        })?;

        let parse = |text: &String| {
            Requirement::parse(text).map_err(|source| DepsolveError::InvalidRequirement {
                package: format!("{}={}", record.name, record.version),
                source,
            })
        };

        let depends = record
            .depends
            .iter()
            .map(|clause| clause.iter().map(parse).collect::<Result<Vec<_>>>())
            .collect::<Result<Vec<_>>>()?;
        let conflicts = record.conflicts.iter().map(parse).collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: record.name,
            version,
            size: record.size,
            depends,
            conflicts,
        })
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    pub fn with_depends(mut self, depends: Vec<Vec<Requirement>>) -> Self {
        self.depends = depends;
        self
    }

    pub fn with_conflicts(mut self, conflicts: Vec<Requirement>) -> Self {
        self.conflicts = conflicts;
        self
    }

    /// Whether `requirement` matches this package
    pub fn satisfies(&self, requirement: &Requirement) -> bool {
        requirement.matches(&self.name, &self.version)
    }

    /// Returns `name=version`
    pub fn pretty_string(&self) -> String {
        format!("{}={}", self.name, self.version)
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.version)
    }
}
