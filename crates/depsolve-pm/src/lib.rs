pub mod error;
pub mod event;
pub mod json;
pub mod package;
pub mod repository;
pub mod solver;

pub use error::{DepsolveError, Result};
pub use event::{NoopListener, SearchListener};
pub use package::{Package, PackageRecord};
pub use repository::{Catalog, PackageId};
pub use solver::{
    Command, ConfigState, Constraint, ConstraintKind, CostModel, DeadlineCheck, Heuristics,
    OperationKind, Request, SearchOptions, SearchOutcome, SearchStats, Slot, Solution, Solver,
    StateValidator, Termination, Violation,
};
