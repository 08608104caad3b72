//! Experiment Driver
//!
//! One scan of the real data plus an ensemble of pseudo-experiments scanned
//! against the same fixed prediction. Toys are independent, so the ensemble
//! is dispatched over Rayon; a failure in any toy aborts the whole run.

use crate::DEFAULT_PSEUDO_EXPERIMENTS;
use crate::error::HuntError;
use crate::local::{ScanOptions, ZeroPredictionPolicy};
use crate::significance::{EnsembleSummary, GlobalSignificance, summarize_ensemble};
use crate::statistic::{BumpStatistic, evaluate_statistic, scan};
use crate::toys::ToyGenerator;
use crate::window::Window;
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Experiment configuration
#[derive(Debug, Clone)]
pub struct ExperimentConfig {
    /// Number of pseudo-experiments (default: 1,000)
    pub toys: usize,
    /// Seed for toy generation; a fresh one is drawn when `None`
    pub seed: Option<u64>,
    /// Whether to evaluate toys in parallel
    pub parallel: bool,
    /// Dedicated worker count; 0 uses the global Rayon pool
    pub threads: usize,
    /// Handling of data in windows without prediction
    pub zero_prediction: ZeroPredictionPolicy,
    /// Emit per-window diagnostics for the real measurement
    pub verbose: bool,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            toys: DEFAULT_PSEUDO_EXPERIMENTS,
            seed: None,
            parallel: true,
            threads: 0,
            zero_prediction: ZeroPredictionPolicy::default(),
            verbose: false,
        }
    }
}

/// Coarse cancellation flag shared with a running ensemble
///
/// Checked before each toy; toys already in flight finish normally.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Real measurement plus its pseudo-experiment ensemble
#[derive(Debug, Clone)]
pub struct Experiment {
    /// Scan of the real data
    pub measurement: BumpStatistic,
    /// Test statistic of each toy, in toy order
    pub pseudo_experiments: Vec<f64>,
    /// Seed the ensemble was generated from
    pub seed: u64,
}

impl Experiment {
    pub fn statistic(&self) -> f64 {
        self.measurement.statistic
    }

    pub fn window(&self) -> Window {
        self.measurement.window
    }

    /// `(statistic, (lo, hi), pseudo_experiments)`
    pub fn into_tuple(self) -> (f64, (usize, usize), Vec<f64>) {
        (
            self.measurement.statistic,
            self.measurement.window.into(),
            self.pseudo_experiments,
        )
    }

    /// Calibrate the measurement against the ensemble
    pub fn global_significance(&self) -> Result<GlobalSignificance, HuntError> {
        GlobalSignificance::from_ensemble(self.measurement.statistic, &self.pseudo_experiments)
    }

    pub fn ensemble_summary(&self) -> Option<EnsembleSummary> {
        summarize_ensemble(&self.pseudo_experiments)
    }
}

/// Measure `observed` against `predicted` and run the pseudo-experiments
pub fn run_experiment(
    observed: &[f64],
    predicted: &[f64],
    edges: Option<&[f64]>,
    config: &ExperimentConfig,
) -> Result<Experiment, HuntError> {
    run_experiment_with_cancel(observed, predicted, edges, config, &CancelToken::new())
}

/// Like [`run_experiment`], abandoning remaining toys once `cancel` fires
pub fn run_experiment_with_cancel(
    observed: &[f64],
    predicted: &[f64],
    edges: Option<&[f64]>,
    config: &ExperimentConfig,
    cancel: &CancelToken,
) -> Result<Experiment, HuntError> {
    if config.toys == 0 {
        return Err(HuntError::NoPseudoExperiments);
    }

    let real_options = ScanOptions {
        zero_prediction: config.zero_prediction,
        verbose: config.verbose,
        edges,
    };
    let measurement = evaluate_statistic(observed, predicted, &real_options)?;

    let seed = config.seed.unwrap_or_else(rand::random);
    tracing::info!(
        statistic = measurement.statistic,
        lo = measurement.window.lo,
        hi = measurement.window.hi,
        toys = config.toys,
        seed,
        "measured, starting pseudo-experiments"
    );

    let generator = ToyGenerator::new(predicted, seed)?;
    let toy_options = ScanOptions {
        zero_prediction: config.zero_prediction,
        ..Default::default()
    };

    let evaluate_toy = |index: usize| -> Result<f64, HuntError> {
        if cancel.is_cancelled() {
            return Err(HuntError::Cancelled);
        }
        let toy = generator.toy(index as u64);
        scan(&toy, predicted, &toy_options).map(|s| s.statistic)
    };

    let pseudo_experiments = if !config.parallel {
        (0..config.toys)
            .map(evaluate_toy)
            .collect::<Result<Vec<_>, _>>()
    } else if config.threads > 0 {
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()?;
        pool.install(|| {
            (0..config.toys)
                .into_par_iter()
                .map(evaluate_toy)
                .collect::<Result<Vec<_>, _>>()
        })
    } else {
        (0..config.toys)
            .into_par_iter()
            .map(evaluate_toy)
            .collect::<Result<Vec<_>, _>>()
    };

    let pseudo_experiments = pseudo_experiments.inspect_err(|e| {
        if matches!(e, HuntError::Cancelled) {
            tracing::debug!(seed, "pseudo-experiments cancelled");
        }
    })?;

    tracing::info!(toys = pseudo_experiments.len(), "pseudo-experiments complete");

    Ok(Experiment {
        measurement,
        pseudo_experiments,
        seed,
    })
}
