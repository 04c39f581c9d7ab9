//! Exhaustive minimum-cost planner.
//!
//! The solver walks configuration states depth-first, one install or
//! uninstall at a time, and keeps the cheapest command log that ends in a
//! state satisfying every constraint.
//!
//! # Architecture
//!
//! - [`ConfigState`]: ordered sequence of installed packages
//! - [`StateValidator`]: dependency and conflict rules for a state
//! - [`Request`]: the `+`/`-` constraints a goal state must satisfy
//! - [`CostModel`]: prices a command log
//! - [`SearchOptions`]: deadline, penalty and pruning knobs
//! - [`Solver`]: the depth-first search itself
//!
//! # Example
//!
//! ```ignore
//! use depsolve_pm::solver::{ConfigState, Request, Solver};
//!
//! let request = Request::parse(&["+a"])?;
//! let outcome = Solver::new(&catalog, &request).solve(ConfigState::new());
//!
//! match outcome.solution {
//!     Some(solution) => println!("{:?}", solution.plan(&catalog)),
//!     None => println!("No solution found."),
//! }
//! ```

mod policy;
mod request;
mod rule;
mod solver;
mod state;
mod transaction;


pub use policy::{DeadlineCheck, Heuristics, SearchOptions, DEFAULT_TIMEOUT};
pub use request::{Constraint, ConstraintKind, Request};
pub use rule::{StateValidator, Violation};
pub use solver::{SearchOutcome, SearchStats, Solution, Solver, Termination};
pub use state::{ConfigState, Slot};
pub use transaction::{render_plan, Command, CostModel, OperationKind, DEFAULT_UNINSTALL_PENALTY};
