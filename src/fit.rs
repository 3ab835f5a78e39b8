//! Conjugate-prior fitting of [`Normal`] to weighted samples.
//!
//! A fit pools the sample's weighted mean and uncorrected variance with
//! optional prior sufficient statistics, then returns the fitted
//! distribution together with the updated statistics so that fits can be
//! chained over successive batches.
//!
//! # Algorithm
//!
//! With sample mean `m`, uncorrected variance `v`, total sample weight `W`,
//! prior values `[μ₀, σ₀]` and prior weights `[w₀, w₁]`:
//!
//! ```text
//! μ' = (m·W + μ₀·w₀) / (W + w₀)
//! σ'² = (v·W + w₁·σ₀² + w₀·W·(m − μ₀)² / (W + w₀)) / (W + w₀)
//! ```
//!
//! The returned prior is `value = [μ', σ']`, `weight = [W + w₀, W + w₁]`.

use crate::error::{DistributionError, PriorDefect, Result};
use crate::normal::Normal;
use crate::stats;

/// Prior sufficient statistics for a normal fit.
///
/// `value = [mean, scale]` and `weight = [mean count, scale count]`, where the
/// counts are effective sample sizes backing each value.
///
/// # Examples
/// ```
/// use u_gaussian::PriorStatistics;
/// assert!(PriorStatistics::from_slices(&[], &[]).unwrap().is_none());
/// let p = PriorStatistics::from_slices(&[0.0, 1.0], &[1.0, 1.0]).unwrap().unwrap();
/// assert_eq!(p.mean(), 0.0);
/// assert!(PriorStatistics::from_slices(&[0.0], &[1.0]).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriorStatistics {
    /// `[mean, scale]`.
    pub value: [f64; 2],
    /// `[mean count, scale count]`.
    pub weight: [f64; 2],
}

impl PriorStatistics {
    /// Creates prior statistics from `[mean, scale]` and their weights.
    pub fn new(value: [f64; 2], weight: [f64; 2]) -> Self {
        Self { value, weight }
    }

    /// Builds prior statistics from loose slices.
    ///
    /// Two empty slices mean "no prior" and yield `Ok(None)`.
    ///
    /// # Errors
    /// [`DistributionError::MalformedPrior`] when only one slice is empty,
    /// the lengths differ, more than two entries are given, or only one is.
    pub fn from_slices(value: &[f64], weight: &[f64]) -> Result<Option<Self>> {
        let defect = match (value.len(), weight.len()) {
            (0, 0) => return Ok(None),
            (0, _) => PriorDefect::MissingValue,
            (_, 0) => PriorDefect::MissingWeight,
            (v, w) if v != w => PriorDefect::UnequalLengths,
            (v, _) if v > 2 => PriorDefect::TooManyValues,
            (1, _) => PriorDefect::Incomplete,
            _ => {
                return Ok(Some(Self::new(
                    [value[0], value[1]],
                    [weight[0], weight[1]],
                )))
            }
        };
        Err(DistributionError::MalformedPrior(defect))
    }

    /// Prior mean `value[0]`.
    pub fn mean(&self) -> f64 {
        self.value[0]
    }

    /// Prior scale (standard deviation) `value[1]`.
    pub fn scale(&self) -> f64 {
        self.value[1]
    }

    /// Effective sample size behind the mean, `weight[0]`.
    pub fn mean_weight(&self) -> f64 {
        self.weight[0]
    }

    /// Effective sample size behind the scale, `weight[1]`.
    pub fn scale_weight(&self) -> f64 {
        self.weight[1]
    }
}

impl Normal {
    /// Fits a new normal distribution to weighted samples, without a prior.
    ///
    /// The result carries this distribution's random source.
    ///
    /// # Examples
    /// ```
    /// use u_gaussian::Normal;
    /// let fitted = Normal::standard().fit(&[1.0, 2.0, 3.0], None).unwrap();
    /// assert!((fitted.mu() - 2.0).abs() < 1e-15);
    /// assert!((fitted.sigma() - (2.0_f64 / 3.0).sqrt()).abs() < 1e-15);
    /// ```
    ///
    /// # Errors
    /// See [`Normal::fit_prior`].
    pub fn fit(&self, samples: &[f64], weights: Option<&[f64]>) -> Result<Normal> {
        self.fit_prior(samples, weights, None).map(|(n, _)| n)
    }

    /// Fits a new normal distribution to weighted samples, pooling with
    /// `prior` when given, and returns the updated prior statistics.
    ///
    /// # Errors
    /// - [`DistributionError::LengthMismatch`] if `weights` and `samples`
    ///   differ in length.
    /// - [`DistributionError::EmptySample`] if `samples` is empty or the total
    ///   weight is zero.
    /// - [`DistributionError::InvalidParameters`] if a sample or weight is
    ///   not finite, a weight is negative, or the fitted σ is not finite and
    ///   positive.
    pub fn fit_prior(
        &self,
        samples: &[f64],
        weights: Option<&[f64]>,
        prior: Option<&PriorStatistics>,
    ) -> Result<(Normal, PriorStatistics)> {
        if let Some(w) = weights {
            if w.len() != samples.len() {
                return Err(DistributionError::LengthMismatch {
                    expected: samples.len(),
                    actual: w.len(),
                });
            }
        }
        if samples.is_empty() {
            return Err(DistributionError::EmptySample);
        }
        let sum_w = stats::total_weight(samples.len(), weights).ok_or_else(|| {
            DistributionError::InvalidParameters(
                "weights must be finite and non-negative".to_string(),
            )
        })?;
        if sum_w <= 0.0 {
            return Err(DistributionError::EmptySample);
        }

        let (mean, variance) = stats::weighted_mean(samples, weights)
            .and_then(|m| Some((m, stats::weighted_moment(2, samples, m, weights)?)))
            .ok_or_else(|| {
                DistributionError::InvalidParameters("samples must be finite".to_string())
            })?;

        let mut total_weight = sum_w;
        let mut total_sum = mean * sum_w;
        if let Some(p) = prior {
            total_sum += p.value[0] * p.weight[0];
            total_weight += p.weight[0];
        }
        let mu = total_sum / total_weight;

        let mut total_var = variance * sum_w;
        if let Some(p) = prior {
            total_var += p.weight[1] * p.value[1] * p.value[1];
            let d = mean - p.value[0];
            total_var += p.weight[0] * sum_w * d * d / total_weight;
        }
        let sigma = (total_var / total_weight).sqrt();

        let fitted = match Normal::new(mu, sigma) {
            Ok(n) => n,
            Err(e) => {
                log::warn!(
                    "rejected normal fit over {} samples: μ={mu}, σ={sigma}",
                    samples.len()
                );
                return Err(e);
            }
        };
        let fitted = match self.source() {
            Some(source) => fitted.with_source(source.clone()),
            None => fitted,
        };

        let scale_weight = sum_w + prior.map_or(0.0, |p| p.weight[1]);
        log::debug!(
            "fitted normal: n={}, total weight={sum_w}, prior={}, μ={mu}, σ={sigma}",
            samples.len(),
            prior.is_some()
        );
        Ok((
            fitted,
            PriorStatistics::new([mu, sigma], [total_weight, scale_weight]),
        ))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::RandomSource;
    use approx::assert_relative_eq;

    fn defect(value: &[f64], weight: &[f64]) -> PriorDefect {
        match PriorStatistics::from_slices(value, weight) {
            Err(DistributionError::MalformedPrior(d)) => d,
            other => panic!("expected MalformedPrior, got {other:?}"),
        }
    }

    // --- PriorStatistics::from_slices ---

    #[test]
    fn test_from_slices_valid() {
        let p = PriorStatistics::from_slices(&[1.0, 2.0], &[3.0, 4.0])
            .unwrap()
            .unwrap();
        assert_eq!(p, PriorStatistics::new([1.0, 2.0], [3.0, 4.0]));
        assert_eq!((p.mean(), p.scale()), (1.0, 2.0));
        assert_eq!((p.mean_weight(), p.scale_weight()), (3.0, 4.0));
    }

    #[test]
    fn test_from_slices_empty_is_no_prior() {
        assert_eq!(PriorStatistics::from_slices(&[], &[]), Ok(None));
    }

    #[test]
    fn test_from_slices_defects() {
        assert_eq!(defect(&[], &[1.0, 1.0]), PriorDefect::MissingValue);
        assert_eq!(defect(&[0.0, 1.0], &[]), PriorDefect::MissingWeight);
        assert_eq!(defect(&[0.0, 1.0], &[1.0]), PriorDefect::UnequalLengths);
        assert_eq!(defect(&[0.0, 1.0, 2.0], &[1.0, 1.0, 1.0]), PriorDefect::TooManyValues);
        assert_eq!(defect(&[0.0], &[1.0]), PriorDefect::Incomplete);
    }

    // --- fitting without a prior ---

    #[test]
    fn test_fit_unweighted() {
        let n = Normal::standard().fit(&[1.0, 2.0, 3.0], None).unwrap();
        assert_relative_eq!(n.mu(), 2.0, max_relative = 1e-15);
        assert_relative_eq!(n.sigma(), (2.0_f64 / 3.0).sqrt(), max_relative = 1e-14);
    }

    #[test]
    fn test_fit_uniform_weights_match_unweighted() {
        let xs = [0.5, -1.25, 3.0, 7.5, 2.0];
        let a = Normal::standard().fit(&xs, None).unwrap();
        let b = Normal::standard().fit(&xs, Some(&[2.0; 5])).unwrap();
        assert_relative_eq!(a.mu(), b.mu(), max_relative = 1e-14);
        assert_relative_eq!(a.sigma(), b.sigma(), max_relative = 1e-14);
    }

    #[test]
    fn test_fit_zero_weight_ignores_sample() {
        let n = Normal::standard()
            .fit(&[1.0, 3.0, 1000.0], Some(&[1.0, 1.0, 0.0]))
            .unwrap();
        assert_relative_eq!(n.mu(), 2.0, max_relative = 1e-15);
        assert_relative_eq!(n.sigma(), 1.0, max_relative = 1e-15);
    }

    #[test]
    fn test_fit_prior_returns_statistics_without_prior() {
        let (n, stats) = Normal::standard()
            .fit_prior(&[1.0, 2.0, 3.0], None, None)
            .unwrap();
        assert_eq!(stats.value, [n.mu(), n.sigma()]);
        assert_eq!(stats.weight, [3.0, 3.0]);
    }

    #[test]
    fn test_fit_does_not_modify_receiver() {
        let base = Normal::new(-7.0, 0.25).unwrap();
        let _ = base.fit(&[1.0, 2.0, 3.0], None).unwrap();
        assert_eq!((base.mu(), base.sigma()), (-7.0, 0.25));
    }

    // --- fitting with a prior ---

    #[test]
    fn test_fit_prior_single_sample() {
        let prior = PriorStatistics::new([0.0, 1.0], [1.0, 1.0]);
        let (n, updated) = Normal::standard()
            .fit_prior(&[5.0], Some(&[1.0]), Some(&prior))
            .unwrap();
        assert_eq!(n.mu(), 2.5);
        assert_relative_eq!(n.sigma(), 6.75_f64.sqrt(), max_relative = 1e-15);
        assert_eq!(updated.value[0], 2.5);
        assert_eq!(updated.value[1], n.sigma());
        assert_eq!(updated.weight, [2.0, 2.0]);
    }

    #[test]
    fn test_fit_prior_asymmetric_weights() {
        // m = 4, v = 1, W = 2; μ₀ = 1, σ₀ = 2, w₀ = 2, w₁ = 3
        let prior = PriorStatistics::new([1.0, 2.0], [2.0, 3.0]);
        let (n, updated) = Normal::standard()
            .fit_prior(&[3.0, 5.0], None, Some(&prior))
            .unwrap();
        // (8 + 2) / 4
        assert_eq!(n.mu(), 2.5);
        // (2 + 12 + 2·2·9/4) / 4 = 23 / 4
        assert_relative_eq!(n.sigma(), 5.75_f64.sqrt(), max_relative = 1e-15);
        assert_eq!(updated.weight, [4.0, 5.0]);
    }

    #[test]
    fn test_fit_prior_chains() {
        let first = Normal::standard();
        let (n1, p1) = first.fit_prior(&[1.0, 2.0, 4.0], None, None).unwrap();
        let (n2, p2) = n1.fit_prior(&[3.0, 3.5], None, Some(&p1)).unwrap();
        assert_eq!(p2.weight, [5.0, 5.0]);
        assert!(n2.sigma() > 0.0);
        assert_relative_eq!(n2.mu(), (7.0 + 6.5) / 5.0, max_relative = 1e-14);
    }

    #[test]
    fn test_fit_identical_samples_with_prior_is_valid() {
        let prior = PriorStatistics::new([2.0, 0.5], [1.0, 1.0]);
        let (n, _) = Normal::standard()
            .fit_prior(&[2.0, 2.0, 2.0], None, Some(&prior))
            .unwrap();
        assert_eq!(n.mu(), 2.0);
        assert_relative_eq!(n.sigma(), (0.25_f64 / 4.0).sqrt(), max_relative = 1e-15);
    }

    // --- validation ---

    #[test]
    fn test_fit_weight_length_mismatch() {
        let err = Normal::standard().fit(&[1.0, 2.0], Some(&[1.0])).unwrap_err();
        assert_eq!(err, DistributionError::LengthMismatch { expected: 2, actual: 1 });
    }

    #[test]
    fn test_fit_empty_sample() {
        assert_eq!(
            Normal::standard().fit(&[], None).unwrap_err(),
            DistributionError::EmptySample
        );
        assert_eq!(
            Normal::standard().fit(&[], Some(&[])).unwrap_err(),
            DistributionError::EmptySample
        );
    }

    #[test]
    fn test_fit_zero_total_weight() {
        let err = Normal::standard()
            .fit(&[1.0, 2.0], Some(&[0.0, 0.0]))
            .unwrap_err();
        assert_eq!(err, DistributionError::EmptySample);
    }

    #[test]
    fn test_fit_bad_weights_or_samples() {
        let n = Normal::standard();
        assert!(matches!(
            n.fit(&[1.0, 2.0], Some(&[1.0, -1.0])),
            Err(DistributionError::InvalidParameters(_))
        ));
        assert!(matches!(
            n.fit(&[1.0, 2.0], Some(&[1.0, f64::NAN])),
            Err(DistributionError::InvalidParameters(_))
        ));
        assert!(matches!(
            n.fit(&[1.0, f64::INFINITY], None),
            Err(DistributionError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_fit_degenerate_sigma_rejected() {
        let err = Normal::standard().fit(&[4.0, 4.0, 4.0], None).unwrap_err();
        assert!(matches!(err, DistributionError::InvalidParameters(_)));
    }

    // --- source inheritance ---

    #[test]
    fn test_fit_inherits_source() {
        let source = RandomSource::seeded(17);
        let base = Normal::standard().with_source(source.clone());
        let fitted = base.fit(&[1.0, 2.0, 3.0], None).unwrap();
        assert!(fitted.source().unwrap().same_source(&source));

        let plain = Normal::standard().fit(&[1.0, 2.0, 3.0], None).unwrap();
        assert!(plain.source().is_none());
    }
}
