//! Local Significance
//!
//! Poisson upper-tail p-value of the observed total in one window against
//! the predicted total.

use crate::error::{HuntError, Series};
use crate::window::Window;
use statrs::function::gamma::checked_gamma_lr;

/// What to do with a window that has data but no prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroPredictionPolicy {
    /// Fail with [`HuntError::DataExceedsZeroPrediction`]
    #[default]
    Reject,
    /// Treat the window as non-significant (p = 1)
    Ignore,
}

/// Diagnostics and policy threaded through a scan
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions<'a> {
    /// Handling of windows with zero prediction and non-zero data
    pub zero_prediction: ZeroPredictionPolicy,
    /// Emit per-window diagnostics
    pub verbose: bool,
    /// Bin edges used to label diagnostics (one more than the bin count)
    pub edges: Option<&'a [f64]>,
}

/// Aggregated counts and p-value for one window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalResult {
    pub window: Window,
    /// Observed total
    pub observed: f64,
    /// Predicted total
    pub expected: f64,
    pub p_value: f64,
}

/// P(X >= d) for X ~ Poisson(m)
///
/// Evaluated as the regularized lower incomplete gamma function P(d, m),
/// which stays accurate for large counts where summing the pmf would not.
/// Totals that are not an excess (`d <= m`) score exactly 1, and the result
/// never drops below `f64::MIN_POSITIVE` so `-ln(p)` stays finite.
///
/// NaN inputs score 1; an infinite excess scores `f64::MIN_POSITIVE`.
pub fn poisson_tail(observed: f64, expected: f64) -> f64 {
    if observed.is_nan() || expected.is_nan() || expected <= 0.0 || observed <= expected {
        return 1.0;
    }
    checked_gamma_lr(observed, expected)
        .map_or(f64::MIN_POSITIVE, |p| p.clamp(f64::MIN_POSITIVE, 1.0))
}

/// Evaluate the local p-value of `window`
///
/// Slices must already be validated and aligned; the window must lie within them.
/// Totals that overflow to infinity fail with [`HuntError::NonFiniteTotal`].
/// Edges only label the verbose diagnostic, which is skipped when they do not
/// cover the window.
pub fn local_p_value(
    window: Window,
    observed: &[f64],
    predicted: &[f64],
    options: &ScanOptions<'_>,
) -> Result<LocalResult, HuntError> {
    let d: f64 = observed[window.lo..window.hi].iter().sum();
    let m: f64 = predicted[window.lo..window.hi].iter().sum();

    for (series, total) in [(Series::Observed, d), (Series::Predicted, m)] {
        if !total.is_finite() {
            return Err(HuntError::NonFiniteTotal {
                series,
                lo: window.lo,
                hi: window.hi,
            });
        }
    }

    if m == 0.0 && d > 0.0 && options.zero_prediction == ZeroPredictionPolicy::Reject {
        return Err(HuntError::DataExceedsZeroPrediction {
            lo: window.lo,
            hi: window.hi,
            observed: d,
        });
    }

    let p_value = poisson_tail(d, m);

    if options.verbose {
        let labels = options
            .edges
            .and_then(|edges| Some((*edges.get(window.lo)?, *edges.get(window.hi)?)));
        if let Some((lo_edge, hi_edge)) = labels {
            tracing::debug!(
                target: "bumphunter::scan",
                lo = window.lo,
                hi = window.hi,
                lo_edge,
                hi_edge,
                observed = d,
                expected = m,
                p_value,
                score = -p_value.ln(),
                "window"
            );
        }
    }

    Ok(LocalResult {
        window,
        observed: d,
        expected: m,
        p_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(observed: &[f64], predicted: &[f64], options: &ScanOptions<'_>) -> Result<f64, HuntError> {
        let window = Window::new(0, observed.len());
        local_p_value(window, observed, predicted, options).map(|r| r.p_value)
    }

    #[test]
    fn test_dip_is_not_significant() {
        let p = eval(&[1.0, 2.0], &[5.0, 5.0], &ScanOptions::default()).unwrap();
        assert_eq!(p, 1.0);
    }

    #[test]
    fn test_exact_agreement_is_not_significant() {
        let p = eval(&[5.0, 5.0], &[5.0, 5.0], &ScanOptions::default()).unwrap();
        assert_eq!(p, 1.0);
    }

    #[test]
    fn test_empty_window_is_not_significant() {
        let p = eval(&[0.0, 0.0], &[0.0, 0.0], &ScanOptions::default()).unwrap();
        assert_eq!(p, 1.0);
    }

    #[test]
    fn test_zero_prediction_rejected() {
        let result = eval(&[0.0, 3.0], &[0.0, 0.0], &ScanOptions::default());
        assert!(matches!(
            result,
            Err(HuntError::DataExceedsZeroPrediction { lo: 0, hi: 2, .. })
        ));
    }

    #[test]
    fn test_zero_prediction_ignored() {
        let options = ScanOptions {
            zero_prediction: ZeroPredictionPolicy::Ignore,
            ..Default::default()
        };
        let p = eval(&[0.0, 3.0], &[0.0, 0.0], &options).unwrap();
        assert_eq!(p, 1.0);
    }

    #[test]
    fn test_matches_poisson_sum() {
        // P(X >= 20 | 5) by direct summation of the complement
        let m: f64 = 5.0;
        let mut pmf = (-m).exp();
        let mut cdf = pmf;
        for k in 1..20 {
            pmf *= m / k as f64;
            cdf += pmf;
        }
        let expected = 1.0 - cdf;
        let p = poisson_tail(20.0, 5.0);
        assert!((p - expected).abs() / expected < 1e-6, "{p} vs {expected}");
    }

    #[test]
    fn test_small_excess() {
        // P(X >= 2 | 1) = 1 - e^-1 * (1 + 1)
        let expected = 1.0 - 2.0 * (-1.0f64).exp();
        assert!((poisson_tail(2.0, 1.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_large_counts_stay_positive() {
        let p = poisson_tail(1.0e6, 1.0e3);
        assert!(p > 0.0);
        assert!(p.ln().is_finite());

        let p = poisson_tail(1.0e5 + 1500.0, 1.0e5);
        assert!(p > 0.0 && p < 1e-4);
    }

    #[test]
    fn test_monotone_in_observed() {
        let m = 12.5;
        let mut previous = 1.0;
        for d in 13..80 {
            let p = poisson_tail(d as f64, m);
            assert!(p <= previous, "p rose at d={d}");
            previous = p;
        }
    }

    #[test]
    fn test_verbose_with_edges_does_not_change_result() {
        let edges = [0.0, 1.0, 2.0];
        let quiet = eval(&[9.0, 9.0], &[2.0, 2.0], &ScanOptions::default()).unwrap();
        let loud = eval(
            &[9.0, 9.0],
            &[2.0, 2.0],
            &ScanOptions {
                verbose: true,
                edges: Some(&edges[..]),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(quiet, loud);
    }

    #[test]
    fn test_overflowing_window_total_is_rejected() {
        let result = eval(&[1e308, 1e308], &[1.0, 1.0], &ScanOptions::default());
        assert!(matches!(
            result,
            Err(HuntError::NonFiniteTotal {
                series: Series::Observed,
                lo: 0,
                hi: 2
            })
        ));

        let result = eval(&[1.0, 1.0], &[1e308, 1e308], &ScanOptions::default());
        assert!(matches!(
            result,
            Err(HuntError::NonFiniteTotal {
                series: Series::Predicted,
                ..
            })
        ));
    }

    #[test]
    fn test_tail_of_non_finite_totals() {
        assert_eq!(poisson_tail(f64::INFINITY, 1.0), f64::MIN_POSITIVE);
        assert_eq!(poisson_tail(5.0, f64::INFINITY), 1.0);
        assert_eq!(poisson_tail(f64::INFINITY, f64::INFINITY), 1.0);
        assert_eq!(poisson_tail(f64::NAN, 1.0), 1.0);
        assert_eq!(poisson_tail(3.0, f64::NAN), 1.0);
    }

    #[test]
    fn test_short_edges_skip_diagnostic() {
        let edges = [0.0, 1.0];
        let quiet = eval(&[9.0, 9.0], &[2.0, 2.0], &ScanOptions::default()).unwrap();
        let loud = eval(
            &[9.0, 9.0],
            &[2.0, 2.0],
            &ScanOptions {
                verbose: true,
                edges: Some(&edges[..]),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(quiet, loud);
    }
}
