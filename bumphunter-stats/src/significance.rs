//! Global Significance
//!
//! Calibrates a measured statistic against the pseudo-experiment ensemble,
//! which accounts for the look-elsewhere effect of scanning many windows.

use crate::error::HuntError;
use statrs::function::erf::erfc_inv;

/// Look-elsewhere-corrected significance of a measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalSignificance {
    /// Fraction of toys scoring at least the measurement
    pub p_value: f64,
    /// Number of toys scoring at least the measurement
    pub exceeded: usize,
    /// Ensemble size
    pub toys: usize,
    /// One-sided Gaussian equivalent of `p_value`, floored at zero
    ///
    /// Infinite when no toy reaches the measurement; in that case the true
    /// p-value is only bounded by `1 / toys`.
    pub z_score: f64,
}

impl GlobalSignificance {
    pub fn from_ensemble(measurement: f64, ensemble: &[f64]) -> Result<Self, HuntError> {
        if ensemble.is_empty() {
            return Err(HuntError::NoPseudoExperiments);
        }

        let exceeded = ensemble.iter().filter(|&&t| t >= measurement).count();
        let p_value = exceeded as f64 / ensemble.len() as f64;

        Ok(Self {
            p_value,
            exceeded,
            toys: ensemble.len(),
            z_score: z_score(p_value),
        })
    }

    /// Upper bound on the p-value resolvable with this many toys
    pub fn resolution(&self) -> f64 {
        1.0 / self.toys as f64
    }
}

/// One-sided Gaussian significance of a p-value
pub fn z_score(p_value: f64) -> f64 {
    if p_value <= 0.0 {
        return f64::INFINITY;
    }
    if p_value >= 0.5 {
        return 0.0;
    }
    std::f64::consts::SQRT_2 * erfc_inv(2.0 * p_value)
}

/// Shape of the null distribution of the test statistic
#[derive(Debug, Clone, PartialEq)]
pub struct EnsembleSummary {
    pub toys: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub median: f64,
    pub p90: f64,
    pub p95: f64,
    pub p99: f64,
    pub max: f64,
}

/// Summarise the pseudo-experiment statistics
///
/// Returns `None` for an empty ensemble.
pub fn summarize_ensemble(ensemble: &[f64]) -> Option<EnsembleSummary> {
    if ensemble.is_empty() {
        return None;
    }

    let mut sorted = ensemble.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let std_dev = if n < 2 {
        0.0
    } else {
        (sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64).sqrt()
    };

    Some(EnsembleSummary {
        toys: n,
        mean,
        std_dev,
        median: percentile_sorted(&sorted, 50.0),
        p90: percentile_sorted(&sorted, 90.0),
        p95: percentile_sorted(&sorted, 95.0),
        p99: percentile_sorted(&sorted, 99.0),
        max: sorted[n - 1],
    })
}

/// Linear interpolation between nearest ranks of sorted, non-empty data
fn percentile_sorted(sorted: &[f64], percentile: f64) -> f64 {
    let n = sorted.len();
    let rank = percentile / 100.0 * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (lower + 1).min(n - 1);
    let fraction = rank - lower as f64;

    sorted[lower] + fraction * (sorted[upper] - sorted[lower])
}
