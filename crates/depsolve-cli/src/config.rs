use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use depsolve_pm::{DeadlineCheck, Heuristics, SearchOptions};

/// File name searched for when no `--config` is given
pub const CONFIG_FILE: &str = "depsolve.toml";

/// The depsolve configuration file structure (depsolve.toml)
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DepsolveConfig {
    /// Search knobs
    pub search: SearchConfig,

    /// Output formatting
    pub output: OutputConfig,
}

/// `[search]` table. Unset keys fall back to the library defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Wall-clock budget in milliseconds
    pub timeout_ms: Option<u64>,

    /// Cost of every uninstall command
    pub uninstall_penalty: Option<u64>,

    /// "on-goal" or "every-step"
    pub deadline_check: Option<DeadlineCheck>,

    /// Check every installed package's dependencies on each step
    pub full_revalidation: Option<bool>,

    /// Branch pruning rules
    pub heuristics: Option<Heuristics>,
}

/// `[output]` table
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Pretty-print JSON plans
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl SearchConfig {
    /// Library defaults overlaid with the values set in this table
    pub fn to_options(&self) -> SearchOptions {
        let mut options = SearchOptions::default();
        if let Some(ms) = self.timeout_ms {
            options.timeout = Duration::from_millis(ms);
        }
        if let Some(penalty) = self.uninstall_penalty {
            options.uninstall_penalty = penalty;
        }
        if let Some(check) = self.deadline_check {
            options.deadline_check = check;
        }
        if let Some(full) = self.full_revalidation {
            options.full_revalidation = full;
        }
        if let Some(heuristics) = self.heuristics {
            options.heuristics = heuristics;
        }
        options
    }
}

impl DepsolveConfig {
    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a specific configuration file
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Find depsolve.toml, searching upward from the given directory
    pub fn find(start_dir: &Path) -> Option<PathBuf> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(CONFIG_FILE);
            if config_path.is_file() {
                return Some(config_path);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from depsolve.toml, searching upward from the given directory
    pub fn load(start_dir: &Path) -> Result<Option<Self>> {
        match Self::find(start_dir) {
            Some(path) => {
                log::debug!("Using configuration from {}", path.display());
                Self::load_file(&path).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Resolve the configuration for a run: an explicit file, or discovery
    /// from the current working directory, or the defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }
        let cwd = std::env::current_dir()?;
        Ok(Self::load(&cwd)?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_empty_config() {
        let config = DepsolveConfig::parse("").unwrap();
        assert!(config.output.pretty);
        assert_eq!(config.search.to_options(), SearchOptions::default());
    }

    #[test]
    fn test_parse_search_config() {
        let toml = r#"
[search]
timeout_ms = 250
uninstall_penalty = 42
deadline_check = "every-step"
full_revalidation = true

[search.heuristics]
respect_pins = false

[output]
pretty = false
"#;
        let config = DepsolveConfig::parse(toml).unwrap();
        let options = config.search.to_options();

        assert_eq!(options.timeout, Duration::from_millis(250));
        assert_eq!(options.uninstall_penalty, 42);
        assert_eq!(options.deadline_check, DeadlineCheck::EveryStep);
        assert!(options.full_revalidation);
        assert!(!options.heuristics.respect_pins);
        assert!(options.heuristics.skip_reinstall_after_uninstall);
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_reject_unknown_keys() {
        assert!(DepsolveConfig::parse("[search]\ntimeout = 5\n").is_err());
        assert!(DepsolveConfig::parse("[search]\ndeadline_check = \"sometimes\"\n").is_err());
    }

    #[test]
    fn test_load_searches_upward() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[search]\nuninstall_penalty = 9\n").unwrap();

        let config = DepsolveConfig::load(&nested).unwrap().unwrap();
        assert_eq!(config.search.uninstall_penalty, Some(9));
    }

    #[test]
    fn test_load_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[search\n").unwrap();

        let err = DepsolveConfig::load_file(&path).unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }
}
