use depsolve_semver::{RequirementError, VersionError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DepsolveError {
    // JSON/parsing errors
    #[error("Failed to parse input: {0}")]
    JsonParse(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Catalog errors
    #[error("Invalid version for package {package}: {source}")]
    InvalidVersion {
        package: String,
        #[source]
        source: VersionError,
    },

    #[error("Invalid requirement in package {package}: {source}")]
    InvalidRequirement {
        package: String,
        #[source]
        source: RequirementError,
    },

    // Constraint / command errors
    #[error("Invalid constraint \"{constraint}\": {reason}")]
    InvalidConstraint { constraint: String, reason: String },

    #[error("Invalid command \"{command}\": {reason}")]
    InvalidCommand { command: String, reason: String },

    #[error("Invalid initial-state entry \"{entry}\": {reason}")]
    InvalidEntry { entry: String, reason: String },

    // Resolution errors
    #[error("Package not found: {name}")]
    PackageNotFound { name: String },
}

pub type Result<T> = std::result::Result<T, DepsolveError>;
