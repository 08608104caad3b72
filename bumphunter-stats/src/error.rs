//! Error Types
//!
//! Every failure the scan or the pseudo-experiment driver can produce. All of
//! them are deterministic given the inputs, so none are worth retrying.

use std::fmt;
use thiserror::Error;

/// Which input sequence a validation failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    /// Observed per-bin counts
    Observed,
    /// Predicted (background) per-bin yields
    Predicted,
    /// Bin-edge coordinates
    Edges,
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Series::Observed => write!(f, "observed"),
            Series::Predicted => write!(f, "predicted"),
            Series::Edges => write!(f, "edges"),
        }
    }
}

/// Errors from the bump scan and the experiment driver
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HuntError {
    #[error("Observed and predicted histograms must be non-empty and aligned: got {observed} and {predicted} bins")]
    InputMismatch { observed: usize, predicted: usize },

    #[error("Negative {series} count {value} in bin {bin}")]
    NegativeInput { series: Series, bin: usize, value: f64 },

    #[error("Non-finite {series} value {value} in bin {bin}")]
    NonFiniteInput { series: Series, bin: usize, value: f64 },

    #[error("Window [{lo}, {hi}) has a non-finite {series} total")]
    NonFiniteTotal { series: Series, lo: usize, hi: usize },

    #[error("Expected {} bin edges for {bins} bins, got {edges}", .bins + 1)]
    EdgeMismatch { edges: usize, bins: usize },

    #[error("Active search range [{lo}, {hi}] is too narrow to admit any window")]
    DegenerateRange { lo: usize, hi: usize },

    #[error("Window [{lo}, {hi}) has zero prediction but {observed} observed counts")]
    DataExceedsZeroPrediction { lo: usize, hi: usize, observed: f64 },

    #[error("At least one pseudo-experiment is required")]
    NoPseudoExperiments,

    #[error("Cannot sample Poisson toy for bin {bin} with mean {mean}: {reason}")]
    ToyDistribution { bin: usize, mean: f64, reason: String },

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),

    #[error("Pseudo-experiment ensemble was cancelled")]
    Cancelled,
}

impl From<rayon::ThreadPoolBuildError> for HuntError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        HuntError::ThreadPool(err.to_string())
    }
}
