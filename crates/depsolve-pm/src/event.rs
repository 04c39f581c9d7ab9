//! Search progress notifications.
//!
//! The solver reports to a [`SearchListener`] as it runs. Listeners are
//! called synchronously from the search loop and must be cheap.

use crate::solver::{SearchStats, Solution};

/// Observer of a running search.
pub trait SearchListener {
    /// Called each time a valid, not-yet-on-path state is entered.
    fn state_entered(&self, _stats: &SearchStats) {}

    /// Called when a goal state beats the best known cost.
    fn solution_improved(&self, _solution: &Solution) {}
}

/// Listener that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl SearchListener for NoopListener {}
