use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::transaction::DEFAULT_UNINSTALL_PENALTY;

/// Default wall-clock budget for a search
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(60_000);

/// When the wall-clock deadline is consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeadlineCheck {
    /// Only when a goal state fails to improve on the best cost
    #[default]
    OnGoal,
    /// Before entering every state
    EveryStep,
}

/// Pruning rules that decide whether a branch is generated at all.
///
/// None of these carry a correctness proof; they cut the branching factor.
/// Disabling all of them gives the plain exhaustive search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Heuristics {
    /// Never reinstall a package this path already uninstalled
    pub skip_reinstall_after_uninstall: bool,
    /// Never uninstall a package this path already installed, unless the
    /// path is still shorter than the number of constraints
    pub skip_uninstall_after_install: bool,
    /// Never uninstall a pinned package
    pub respect_pins: bool,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            skip_reinstall_after_uninstall: true,
            skip_uninstall_after_install: true,
            respect_pins: true,
        }
    }
}

impl Heuristics {
    /// All pruning rules disabled
    pub fn none() -> Self {
        Self {
            skip_reinstall_after_uninstall: false,
            skip_uninstall_after_install: false,
            respect_pins: false,
        }
    }
}

/// Knobs for a single search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Wall-clock budget
    pub timeout: Duration,
    /// Cost of each uninstall command
    pub uninstall_penalty: u64,
    /// Where the deadline is checked
    pub deadline_check: DeadlineCheck,
    /// Re-check every package's dependencies instead of only the last one
    pub full_revalidation: bool,
    /// Branch pruning rules
    pub heuristics: Heuristics,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            uninstall_penalty: DEFAULT_UNINSTALL_PENALTY,
            deadline_check: DeadlineCheck::OnGoal,
            full_revalidation: false,
            heuristics: Heuristics::default(),
        }
    }
}

impl SearchOptions {
    /// Create options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn uninstall_penalty(mut self, penalty: u64) -> Self {
        self.uninstall_penalty = penalty;
        self
    }

    pub fn deadline_check(mut self, check: DeadlineCheck) -> Self {
        self.deadline_check = check;
        self
    }

    pub fn full_revalidation(mut self, full: bool) -> Self {
        self.full_revalidation = full;
        self
    }

    pub fn heuristics(mut self, heuristics: Heuristics) -> Self {
        self.heuristics = heuristics;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = SearchOptions::default();
        assert_eq!(options.timeout, Duration::from_secs(60));
        assert_eq!(options.uninstall_penalty, 1_000_000);
        assert_eq!(options.deadline_check, DeadlineCheck::OnGoal);
        assert!(!options.full_revalidation);
        assert!(options.heuristics.respect_pins);
        assert!(options.heuristics.skip_reinstall_after_uninstall);
        assert!(options.heuristics.skip_uninstall_after_install);
    }

    #[test]
    fn test_builder() {
        let options = SearchOptions::new()
            .timeout(Duration::from_millis(5))
            .uninstall_penalty(3)
            .deadline_check(DeadlineCheck::EveryStep)
            .full_revalidation(true)
            .heuristics(Heuristics::none());
        assert_eq!(options.timeout, Duration::from_millis(5));
        assert_eq!(options.uninstall_penalty, 3);
        assert_eq!(options.deadline_check, DeadlineCheck::EveryStep);
        assert!(options.full_revalidation);
        assert!(!options.heuristics.respect_pins);
    }

    #[test]
    fn test_deadline_check_names() {
        let check: DeadlineCheck = serde_json::from_str(r#""every-step""#).unwrap();
        assert_eq!(check, DeadlineCheck::EveryStep);
        let check: DeadlineCheck = serde_json::from_str(r#""on-goal""#).unwrap();
        assert_eq!(check, DeadlineCheck::OnGoal);
    }
}
