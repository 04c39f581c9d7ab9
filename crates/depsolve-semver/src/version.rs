//! Dotted-integer versions

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use thiserror::Error;

/// Error type for version parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Invalid version string \"{0}\": version is empty")]
    Empty(String),
    #[error("Invalid version string \"{version}\": component \"{component}\" is not a non-negative integer")]
    InvalidComponent { version: String, component: String },
}

/// A parsed version.
///
/// Ordering is component-wise over the shared prefix; if the prefix is equal
/// the shorter version is smaller, so `1.2 < 1.2.0 < 1.2.1`. There is no
/// trailing-zero normalization. Equality and hashing follow the ordering, so
/// `01.2` and `1.2` are the same version while keeping the text they were parsed from.
#[derive(Debug, Clone)]
pub struct Version {
    components: Vec<u64>,
    raw: String,
}

impl Version {
    /// Parse a version string such as `1.2.10`
    pub fn parse(version: &str) -> Result<Self, VersionError> {
        if version.is_empty() {
            return Err(VersionError::Empty(version.to_string()));
        }

        let components = version
            .split('.')
            .map(|part| {
                part.parse::<u64>().map_err(|_| VersionError::InvalidComponent {
                    version: version.to_string(),
                    component: part.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            components,
            raw: version.to_string(),
        })
    }

    /// The integer components
    pub fn components(&self) -> &[u64] {
        &self.components
    }

    /// The text this version was parsed from
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.components.iter().zip(other.components.iter()) {
            match a.cmp(b) {
                Ordering::Equal => continue,
                decided => return decided,
            }
        }
        self.components.len().cmp(&other.components.len())
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.components == other.components
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.components.hash(state);
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Compare two version strings.
///
/// Fails if either side has a component that is not an integer.
pub fn compare_versions(version1: &str, version2: &str) -> Result<Ordering, VersionError> {
    let v1 = Version::parse(version1)?;
    let v2 = Version::parse(version2)?;
    Ok(v1.cmp(&v2))
}
