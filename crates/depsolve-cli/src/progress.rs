//! Progress reporting while a search runs.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use depsolve_pm::{SearchListener, SearchStats, Solution};

/// Redraw the counter every this many entered states
const REFRESH_EVERY: u64 = 1024;

/// Counting spinner on stderr, driven by solver notifications
pub struct SearchProgress {
    bar: ProgressBar,
}

impl SearchProgress {
    /// Create a new spinner; a disabled one draws nothing
    pub fn new(enabled: bool) -> Self {
        if !enabled {
            return Self {
                bar: ProgressBar::hidden(),
            };
        }

        let bar = ProgressBar::new_spinner();
        if let Ok(style) =
            ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg} ({pos} states)")
        {
            bar.set_style(style);
        }
        bar.set_message("Searching");
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    /// Remove the spinner from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl SearchListener for SearchProgress {
    fn state_entered(&self, stats: &SearchStats) {
        if stats.states_entered % REFRESH_EVERY == 0 {
            self.bar.set_position(stats.states_entered);
        }
    }

    fn solution_improved(&self, solution: &Solution) {
        self.bar.set_message(format!("Searching, best cost {}", solution.cost));
    }
}
