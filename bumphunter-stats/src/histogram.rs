//! Histogram Inputs
//!
//! Validation of the observed/predicted sequences and the active search
//! range derived from the prediction's non-zero support.

use crate::error::{HuntError, Series};

/// Span of bins with strictly positive prediction
///
/// Both bounds are inclusive bin indices: `lo` is the first and `hi` the last
/// bin whose predicted yield is non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveRange {
    pub lo: usize,
    pub hi: usize,
}

impl ActiveRange {
    /// Locate the non-zero support of `predicted`
    ///
    /// Returns `None` when every bin is zero.
    pub fn from_prediction(predicted: &[f64]) -> Option<Self> {
        let lo = predicted.iter().position(|&m| m > 0.0)?;
        let hi = predicted.iter().rposition(|&m| m > 0.0)?;
        Some(Self { lo, hi })
    }

    /// Distance between the first and last supported bin
    pub fn span(&self) -> usize {
        self.hi - self.lo
    }
}

/// Check that observed and predicted are aligned, non-empty, finite and non-negative
pub fn validate_counts(observed: &[f64], predicted: &[f64]) -> Result<(), HuntError> {
    if observed.is_empty() || predicted.is_empty() || observed.len() != predicted.len() {
        return Err(HuntError::InputMismatch {
            observed: observed.len(),
            predicted: predicted.len(),
        });
    }

    check_series(observed, Series::Observed)?;
    check_series(predicted, Series::Predicted)
}

/// Check that `edges` has one more entry than there are bins
///
/// Edges only feed diagnostics; they are not required to be sorted.
pub fn validate_edges(edges: &[f64], bins: usize) -> Result<(), HuntError> {
    if edges.len() != bins + 1 {
        return Err(HuntError::EdgeMismatch {
            edges: edges.len(),
            bins,
        });
    }
    match edges.iter().position(|e| !e.is_finite()) {
        Some(bin) => Err(HuntError::NonFiniteInput {
            series: Series::Edges,
            bin,
            value: edges[bin],
        }),
        None => Ok(()),
    }
}

/// Check that a prediction is usable as Poisson means
pub fn validate_prediction(predicted: &[f64]) -> Result<(), HuntError> {
    check_series(predicted, Series::Predicted)
}

fn check_series(values: &[f64], series: Series) -> Result<(), HuntError> {
    for (bin, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            return Err(HuntError::NonFiniteInput { series, bin, value });
        }
        if value < 0.0 {
            return Err(HuntError::NegativeInput { series, bin, value });
        }
    }
    Ok(())
}
