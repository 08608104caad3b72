#![warn(missing_docs)]
//! BumpHunter Statistical Engine
//!
//! Locates the most significant localized excess of observed counts over a
//! predicted background in a one-dimensional histogram:
//! - Window enumeration over the prediction's non-zero support
//! - Local Poisson upper-tail p-values via the regularized incomplete gamma function
//! - The test statistic `-ln(min p)` and the window that achieved it
//! - Seeded Poisson pseudo-experiments, scanned in parallel with Rayon
//! - Global (look-elsewhere-corrected) significance from the toy ensemble

mod error;
mod experiment;
mod histogram;
mod local;
mod significance;
mod statistic;
mod toys;
mod window;

pub use error::{HuntError, Series};
pub use experiment::{
    CancelToken, Experiment, ExperimentConfig, run_experiment, run_experiment_with_cancel,
};
pub use histogram::{ActiveRange, validate_counts, validate_edges};
pub use local::{LocalResult, ScanOptions, ZeroPredictionPolicy, local_p_value, poisson_tail};
pub use significance::{EnsembleSummary, GlobalSignificance, summarize_ensemble, z_score};
pub use statistic::{BumpStatistic, evaluate_statistic};
pub use toys::{ToyGenerator, make_toys};
pub use window::{Window, WindowScan, Windows, step_for};

/// Default number of pseudo-experiments
pub const DEFAULT_PSEUDO_EXPERIMENTS: usize = 1_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(DEFAULT_PSEUDO_EXPERIMENTS, 1_000);
    }
}
