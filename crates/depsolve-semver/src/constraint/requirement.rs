//! Textual requirements: `name` or `name<op>version`

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::Operator;
use crate::version::{Version, VersionError};

/// Error type for requirement parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequirementError {
    #[error("Invalid requirement \"{0}\": requirement is empty")]
    Empty(String),
    #[error("Invalid requirement \"{0}\": package name is empty")]
    EmptyName(String),
    #[error("Invalid requirement \"{requirement}\": {source}")]
    Version {
        requirement: String,
        #[source]
        source: VersionError,
    },
}

/// A single requirement on a package name and, optionally, its version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Requirement {
    name: String,
    constraint: Option<(Operator, Version)>,
}

impl Requirement {
    /// Requirement matching any version of `name`
    pub fn any(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraint: None,
        }
    }

    /// Parse a requirement.
    ///
    /// The first operator found in [`Operator::DETECTION_ORDER`] splits the
    /// text at its first occurrence. Without an operator the whole text is
    /// the package name.
    pub fn parse(text: &str) -> Result<Self, RequirementError> {
        if text.is_empty() {
            return Err(RequirementError::Empty(text.to_string()));
        }

        let found = Operator::DETECTION_ORDER
            .iter()
            .find_map(|op| text.find(op.as_str()).map(|idx| (*op, idx)));

        let Some((op, idx)) = found else {
            return Ok(Self::any(text));
        };

        let name = &text[..idx];
        if name.is_empty() {
            return Err(RequirementError::EmptyName(text.to_string()));
        }

        let version = Version::parse(&text[idx + op.as_str().len()..]).map_err(|source| {
            RequirementError::Version {
                requirement: text.to_string(),
                source,
            }
        })?;

        Ok(Self {
            name: name.to_string(),
            constraint: Some((op, version)),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn operator(&self) -> Option<Operator> {
        self.constraint.as_ref().map(|(op, _)| *op)
    }

    pub fn version(&self) -> Option<&Version> {
        self.constraint.as_ref().map(|(_, v)| v)
    }

    /// True when this requirement names exactly `name` at `version`
    pub fn is_exact(&self, name: &str, version: &Version) -> bool {
        self.name == name
            && matches!(&self.constraint, Some((Operator::Equal, v)) if v == version)
    }

    /// Check whether a package with `name` and `version` satisfies this requirement
    pub fn matches(&self, name: &str, version: &Version) -> bool {
        if self.name != name {
            return false;
        }
        match &self.constraint {
            None => true,
            Some((op, required)) => op.accepts(version.cmp(required)),
        }
    }
}

impl FromStr for Requirement {
    type Err = RequirementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.constraint {
            None => write!(f, "{}", self.name),
            Some((op, version)) => write!(f, "{}{}{}", self.name, op, version),
        }
    }
}
