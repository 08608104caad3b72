//! BumpHunter Test Statistic
//!
//! Scans every admissible window over the active range and reports
//! `-ln(min p)` together with the window that achieved it.

use crate::error::HuntError;
use crate::histogram::{ActiveRange, validate_counts, validate_edges};
use crate::local::{LocalResult, ScanOptions, local_p_value};
use crate::window::{Window, WindowScan};

/// Most significant window found by a scan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BumpStatistic {
    /// `-ln` of the smallest local p-value; zero when no window is an excess
    pub statistic: f64,
    /// Window with the smallest local p-value
    pub window: Window,
    /// The smallest local p-value itself
    pub p_value: f64,
    /// Observed total inside the window
    pub observed: f64,
    /// Predicted total inside the window
    pub expected: f64,
}

impl BumpStatistic {
    fn from_local(best: LocalResult) -> Self {
        let statistic = if best.p_value >= 1.0 {
            0.0
        } else {
            -best.p_value.ln()
        };
        Self {
            statistic,
            window: best.window,
            p_value: best.p_value,
            observed: best.observed,
            expected: best.expected,
        }
    }
}

/// Compute the test statistic for `observed` against `predicted`
///
/// Validates both sequences (and the edges, when given) before scanning.
pub fn evaluate_statistic(
    observed: &[f64],
    predicted: &[f64],
    options: &ScanOptions<'_>,
) -> Result<BumpStatistic, HuntError> {
    validate_counts(observed, predicted)?;
    if let Some(edges) = options.edges {
        validate_edges(edges, observed.len())?;
    }
    scan(observed, predicted, options)
}

/// Scan already-validated inputs
///
/// Ties keep the first window in enumeration order, which favours narrower
/// and earlier windows.
pub(crate) fn scan(
    observed: &[f64],
    predicted: &[f64],
    options: &ScanOptions<'_>,
) -> Result<BumpStatistic, HuntError> {
    let range = ActiveRange::from_prediction(predicted).ok_or(HuntError::DegenerateRange {
        lo: 0,
        hi: predicted.len().saturating_sub(1),
    })?;

    let scan = WindowScan::over(range);
    if scan.is_empty() {
        return Err(HuntError::DegenerateRange {
            lo: range.lo,
            hi: range.hi,
        });
    }

    let mut width = 0;
    let mut best: Option<LocalResult> = None;
    for window in scan.iter() {
        if options.verbose && window.width() != width {
            width = window.width();
            tracing::trace!(target: "bumphunter::scan", width, "scanning width");
        }

        let local = local_p_value(window, observed, predicted, options)?;
        if best.is_none_or(|b| local.p_value < b.p_value) {
            best = Some(local);
        }
    }

    best.map(BumpStatistic::from_local)
        .ok_or(HuntError::DegenerateRange {
            lo: range.lo,
            hi: range.hi,
        })
}
