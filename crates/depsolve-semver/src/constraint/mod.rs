//! Operators and requirements for version matching

mod operator;
mod requirement;

pub use operator::Operator;
pub use requirement::{Requirement, RequirementError};
