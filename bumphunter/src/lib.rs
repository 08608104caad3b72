#![warn(missing_docs)]
//! # BumpHunter
//!
//! Finds the most significant localized excess ("bump") of observed counts
//! over a predicted background in a one-dimensional binned histogram, and
//! calibrates it with Poisson pseudo-experiments.
//!
//! - **Window Scan**: every window from one bin up to half the active range, overlapping by ~50%
//! - **Local Significance**: Poisson upper-tail p-value per window; dips are ignored
//! - **Test Statistic**: `-ln(min p)` over all windows, plus the winning window
//! - **Pseudo-Experiments**: seeded, reproducible Poisson toys scanned in parallel
//! - **Global Significance**: look-elsewhere-corrected p-value and Gaussian z-score
//!
//! ## Quick Start
//!
//! ```ignore
//! use bumphunter::prelude::*;
//!
//! let predicted = [0.0, 5.0, 5.0, 5.0, 5.0, 5.0, 0.0];
//! let observed = [0.0, 5.0, 5.0, 20.0, 5.0, 5.0, 0.0];
//!
//! let (statistic, (lo, hi), toys) = bumphunter(&observed, &predicted, 500)?;
//! ```
//!
//! ## Configuration
//!
//! ```ignore
//! let config = HuntConfig::discover().unwrap_or_default();
//! let experiment = run(&observed, &predicted, Some(&edges), &config)?;
//! let significance = experiment.global_significance()?;
//! ```

mod config;

pub use config::*;

// Re-export the statistical engine
pub use bumphunter_stats::{
    ActiveRange, BumpStatistic, CancelToken, DEFAULT_PSEUDO_EXPERIMENTS, EnsembleSummary,
    Experiment, ExperimentConfig, GlobalSignificance, HuntError, LocalResult, ScanOptions, Series,
    ToyGenerator, Window, WindowScan, ZeroPredictionPolicy, evaluate_statistic, local_p_value,
    make_toys, poisson_tail, run_experiment, run_experiment_with_cancel, summarize_ensemble,
    z_score,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Experiment, GlobalSignificance, HuntConfig, HuntError, Window, bumphunter, run,
    };
}

/// Compute the BumpHunter statistic and run `toys` pseudo-experiments
///
/// Returns `(statistic, (lo, hi), pseudo_experiments)` where `[lo, hi)` is
/// the most significant window of the real data. Toys are seeded freshly;
/// use [`run`] with a configured seed for reproducible ensembles.
pub fn bumphunter(
    observed: &[f64],
    predicted: &[f64],
    toys: usize,
) -> Result<(f64, (usize, usize), Vec<f64>), HuntError> {
    let config = ExperimentConfig {
        toys,
        ..Default::default()
    };
    run_experiment(observed, predicted, None, &config).map(Experiment::into_tuple)
}

/// Run a full experiment with file-level configuration
///
/// `edges` only label diagnostics and never change the result.
pub fn run(
    observed: &[f64],
    predicted: &[f64],
    edges: Option<&[f64]>,
    config: &HuntConfig,
) -> Result<Experiment, HuntError> {
    run_experiment(observed, predicted, edges, &config.experiment_config())
}

/// Install a `tracing` subscriber for BumpHunter diagnostics
///
/// Per-window scan lines are emitted at debug level, so they only show with
/// `verbose`. Does nothing if a global subscriber is already installed.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        "bumphunter=debug"
    } else {
        "bumphunter=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .ok();
}
