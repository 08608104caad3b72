//! Configuration loading from bumphunter.toml
//!
//! Settings can be kept in a `bumphunter.toml` file next to the analysis.
//! The file is discovered by walking up from the current directory.

use bumphunter_stats::{DEFAULT_PSEUDO_EXPERIMENTS, ExperimentConfig, ZeroPredictionPolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the file searched for by [`HuntConfig::discover`]
pub const CONFIG_FILE_NAME: &str = "bumphunter.toml";

/// BumpHunter configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HuntConfig {
    /// Pseudo-experiment settings
    #[serde(default)]
    pub experiment: ExperimentSection,
    /// Window scan settings
    #[serde(default)]
    pub scan: ScanSection,
}

/// Pseudo-experiment settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExperimentSection {
    /// Number of pseudo-experiments
    #[serde(default = "default_toys")]
    pub toys: usize,
    /// Fixed seed for reproducible ensembles
    #[serde(default)]
    pub seed: Option<u64>,
    /// Evaluate toys in parallel
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    /// Worker threads (0 = all available cores)
    #[serde(default)]
    pub threads: usize,
}

impl Default for ExperimentSection {
    fn default() -> Self {
        Self {
            toys: default_toys(),
            seed: None,
            parallel: default_parallel(),
            threads: 0,
        }
    }
}

fn default_toys() -> usize {
    DEFAULT_PSEUDO_EXPERIMENTS
}
fn default_parallel() -> bool {
    true
}

/// Handling of windows with data but no prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ZeroPredictionMode {
    /// Fail the scan (default)
    #[default]
    Reject,
    /// Score the window as p = 1
    Ignore,
}

impl From<ZeroPredictionMode> for ZeroPredictionPolicy {
    fn from(mode: ZeroPredictionMode) -> Self {
        match mode {
            ZeroPredictionMode::Reject => ZeroPredictionPolicy::Reject,
            ZeroPredictionMode::Ignore => ZeroPredictionPolicy::Ignore,
        }
    }
}

/// Window scan settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ScanSection {
    /// "reject" or "ignore"
    #[serde(default)]
    pub zero_prediction: ZeroPredictionMode,
    /// Per-window diagnostics for the real measurement
    #[serde(default)]
    pub verbose: bool,
}

impl HuntConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Self::load(&config_path).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Runtime configuration for the experiment driver
    pub fn experiment_config(&self) -> ExperimentConfig {
        ExperimentConfig {
            toys: self.experiment.toys,
            seed: self.experiment.seed,
            parallel: self.experiment.parallel,
            threads: self.experiment.threads,
            zero_prediction: self.scan.zero_prediction.into(),
            verbose: self.scan.verbose,
        }
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# BumpHunter Configuration

[experiment]
# Number of pseudo-experiments used to calibrate the global significance
toys = 1000
# Fixed seed for reproducible ensembles (uncomment to enable)
# seed = 42
# Evaluate pseudo-experiments in parallel
parallel = true
# Worker threads (0 = all available cores)
threads = 0

[scan]
# Windows with data but zero prediction: "reject" or "ignore"
zero_prediction = "reject"
# Per-window diagnostics for the real measurement
verbose = false
"#
        .to_string()
    }
}
