//! Distribution traits.
//!
//! [`ContinuousDistribution`] is the evaluation surface shared by continuous
//! laws. [`Parameterized`] exposes parameters as a flat `f64` slice with a
//! stable name → index association, so that generic fitting or
//! optimization code can work over any distribution without knowing its
//! fields.

use crate::error::{DistributionError, Result};

/// Trait for continuous probability distributions.
pub trait ContinuousDistribution {
    /// Probability density function.
    fn pdf(&self, x: f64) -> f64;
    /// Natural log of the probability density function.
    fn ln_pdf(&self, x: f64) -> f64;
    /// Cumulative distribution function P(X ≤ x).
    fn cdf(&self, x: f64) -> f64;
    /// Survival function P(X > x), evaluated without forming `1 − cdf(x)`.
    fn survival(&self, x: f64) -> f64;
    /// Quantile function (inverse CDF). Returns x such that P(X ≤ x) = p.
    ///
    /// # Errors
    /// [`DistributionError::InvalidProbability`] if `p ∉ [0, 1]`.
    fn quantile(&self, p: f64) -> Result<f64>;
    /// Expected value E\[X\].
    fn mean(&self) -> f64;
    /// Variance Var(X).
    fn variance(&self) -> f64;
    /// Standard deviation √Var(X).
    fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }
    /// Differential entropy in nats.
    fn entropy(&self) -> f64;
}

/// Trait for distributions whose parameters marshal to a fixed-length slice.
pub trait Parameterized {
    /// Number of parameters, and the required slice length for marshaling.
    const NUM_PARAMETERS: usize;

    /// Read-only association from parameter name to slice index.
    fn parameter_map(&self) -> &'static [(&'static str, usize)];

    /// Writes the parameters into `out`.
    ///
    /// # Errors
    /// [`DistributionError::LengthMismatch`] unless
    /// `out.len() == NUM_PARAMETERS`; `out` is left untouched.
    fn marshal_slice(&self, out: &mut [f64]) -> Result<()>;

    /// Replaces the parameters with the contents of `params`.
    ///
    /// # Errors
    /// [`DistributionError::LengthMismatch`] on a wrong length, or
    /// [`DistributionError::InvalidParameters`] if the values violate the
    /// distribution's constraints. `self` is unchanged on error.
    fn unmarshal_slice(&mut self, params: &[f64]) -> Result<()>;

    /// Number of parameters.
    fn num_parameters(&self) -> usize {
        Self::NUM_PARAMETERS
    }

    /// Slice index of the named parameter.
    fn parameter_index(&self, name: &str) -> Option<usize> {
        self.parameter_map()
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, i)| i)
    }
}

/// Returns `Err(LengthMismatch)` unless `actual == expected`.
pub(crate) fn check_len(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(DistributionError::LengthMismatch { expected, actual })
    }
}
