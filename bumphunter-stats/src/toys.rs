//! Pseudo-Experiment Generation
//!
//! Poisson-fluctuated replicas of the prediction, used as synthetic data
//! under the null hypothesis.
//!
//! Toy `i` is drawn from its own ChaCha8 stream keyed by `(seed, i)`, so a
//! toy does not depend on how many others were generated before it or on
//! which thread produced it.

use crate::error::HuntError;
use crate::histogram::validate_prediction;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Poisson};

/// Samples toys from a fixed prediction
#[derive(Debug, Clone)]
pub struct ToyGenerator {
    /// One distribution per bin; `None` for bins with zero mean
    bins: Vec<Option<Poisson<f64>>>,
    seed: u64,
}

impl ToyGenerator {
    /// Prepare per-bin Poisson distributions for `predicted`
    pub fn new(predicted: &[f64], seed: u64) -> Result<Self, HuntError> {
        validate_prediction(predicted)?;

        let bins = predicted
            .iter()
            .enumerate()
            .map(|(bin, &mean)| {
                if mean == 0.0 {
                    return Ok(None);
                }
                Poisson::new(mean)
                    .map(Some)
                    .map_err(|e| HuntError::ToyDistribution {
                        bin,
                        mean,
                        reason: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { bins, seed })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of bins in every toy
    pub fn bins(&self) -> usize {
        self.bins.len()
    }

    /// Generate toy number `index`
    pub fn toy(&self, index: u64) -> Vec<f64> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        rng.set_stream(index);
        self.bins
            .iter()
            .map(|dist| dist.as_ref().map_or(0.0, |d| d.sample(&mut rng)))
            .collect()
    }

    /// Generate toys `0..n`
    pub fn generate(&self, n: usize) -> Vec<Vec<f64>> {
        (0..n as u64).map(|i| self.toy(i)).collect()
    }
}

/// Fluctuate `predicted` `n` times
pub fn make_toys(predicted: &[f64], n: usize, seed: u64) -> Result<Vec<Vec<f64>>, HuntError> {
    Ok(ToyGenerator::new(predicted, seed)?.generate(n))
}
