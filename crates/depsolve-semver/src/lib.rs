//! Version ordering and requirement matching for depsolve
//!
//! Versions are dotted integer sequences (`1`, `1.2`, `1.2.0`) compared
//! component-wise, where a strict prefix sorts before the longer version.
//! Requirements are `name` or `name<op>version` strings.

pub mod constraint;
mod version;

pub use constraint::{Operator, Requirement, RequirementError};
pub use version::{compare_versions, Version, VersionError};
