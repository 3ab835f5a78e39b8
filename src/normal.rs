//! Normal (Gaussian) distribution.
//!
//! # Mathematical Definition
//! - PDF: φ(x) = (1/(σ√(2π))) exp(−(x−μ)²/(2σ²))
//! - CDF: Φ((x−μ)/σ) = ½(1 + erf((x−μ)/(σ√2)))
//! - Quantile: μ + σ·Φ⁻¹(p), with Φ⁻¹ from [`crate::quantile`]
//! - Mean = median = mode = μ, variance σ², skewness and excess kurtosis 0
//! - Entropy: ½(ln 2π + 1 + 2 ln σ)
//!
//! Reference: Johnson, Kotz & Balakrishnan (1994), *Continuous Univariate
//! Distributions*, Vol. 1, Chapter 13.

use std::fmt;

use rand::distr::Distribution;
use rand::Rng;

use crate::distribution::{check_len, ContinuousDistribution, Parameterized};
use crate::error::{DistributionError, Result};
use crate::quantile::standard_normal_quantile;
use crate::random::{self, RandomSource};
use crate::special::{self, LN_2PI, LN_SQRT_2PI};

/// Parameter layout of [`Normal`] when marshaled: `[μ, σ]`.
pub const NORMAL_PARAMETERS: &[(&str, usize)] = &[("Mu", 0), ("Sigma", 1)];

/// The standard normal distribution N(0, 1) with the default random source.
pub const UNIT_NORMAL: Normal = Normal {
    mu: 0.0,
    sigma: 1.0,
    source: None,
};

/// Normal (Gaussian) distribution N(μ, σ²).
///
/// `σ` is the standard deviation and is always finite and positive; every
/// way of setting it ([`Normal::new`], [`Parameterized::unmarshal_slice`],
/// [`Normal::fit`]) enforces that.
///
/// A `Normal` optionally carries a [`RandomSource`] used by [`Normal::rand`];
/// without one it draws from `rand::rng()`.
///
/// # Examples
/// ```
/// use u_gaussian::{ContinuousDistribution, Normal};
///
/// let n = Normal::new(10.0, 2.0).unwrap();
/// assert_eq!(n.quantile(0.5).unwrap(), 10.0);
/// assert!((n.cdf(10.0 + 2.0 * 1.959963984540054) - 0.975).abs() < 1e-14);
/// ```
#[derive(Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "NormalParams", into = "NormalParams")
)]
pub struct Normal {
    mu: f64,
    sigma: f64,
    source: Option<RandomSource>,
}

impl Normal {
    /// Creates a new normal distribution N(μ, σ).
    ///
    /// # Errors
    /// Returns `Err` if `sigma ≤ 0` or parameters are not finite.
    pub fn new(mu: f64, sigma: f64) -> Result<Self> {
        validate(mu, sigma)?;
        Ok(Self {
            mu,
            sigma,
            source: None,
        })
    }

    /// The standard normal distribution N(0, 1).
    pub fn standard() -> Self {
        UNIT_NORMAL
    }

    /// Attaches a random source used by [`Normal::rand`].
    pub fn with_source(mut self, source: RandomSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Detaches the random source, falling back to `rand::rng()`.
    pub fn without_source(mut self) -> Self {
        self.source = None;
        self
    }

    /// The attached random source, if any.
    pub fn source(&self) -> Option<&RandomSource> {
        self.source.as_ref()
    }

    /// Location parameter μ.
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Scale parameter σ, the standard deviation.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Median, equal to μ.
    pub fn median(&self) -> f64 {
        self.mu
    }

    /// Mode, equal to μ.
    pub fn mode(&self) -> f64 {
        self.mu
    }

    /// Skewness, zero by symmetry.
    pub fn skewness(&self) -> f64 {
        0.0
    }

    /// Excess kurtosis (kurtosis − 3), zero for every normal law.
    pub fn ex_kurtosis(&self) -> f64 {
        0.0
    }

    /// ∂ ln f(x) / ∂x = −(x − μ)/σ².
    pub fn d_ln_pdf_dx(&self, x: f64) -> f64 {
        -(x - self.mu) / (self.sigma * self.sigma)
    }

    /// Gradient of ln f(x) with respect to `[μ, σ]`:
    ///
    /// ```text
    /// ∂/∂μ = (x − μ)/σ²
    /// ∂/∂σ = −1/σ + (x − μ)²/σ³
    /// ```
    pub fn d_ln_pdf_dparams(&self, x: f64) -> [f64; 2] {
        let d = x - self.mu;
        let s2 = self.sigma * self.sigma;
        [d / s2, -1.0 / self.sigma + d * d / (s2 * self.sigma)]
    }

    /// Writes the gradient of [`Normal::d_ln_pdf_dparams`] into a
    /// caller-provided buffer, in marshaling order.
    ///
    /// # Errors
    /// [`DistributionError::LengthMismatch`] unless `out.len() == 2`.
    pub fn d_ln_pdf_dparam(&self, x: f64, out: &mut [f64]) -> Result<()> {
        check_len(Self::NUM_PARAMETERS, out.len())?;
        out.copy_from_slice(&self.d_ln_pdf_dparams(x));
        Ok(())
    }

    /// Draws a sample using the attached source, or `rand::rng()` if none.
    pub fn rand(&self) -> f64 {
        let z = match &self.source {
            Some(source) => source.standard_normal(),
            None => random::standard_normal(&mut rand::rng()),
        };
        self.scale_variate(z)
    }

    /// Draws a sample from a caller-borrowed generator, ignoring any attached
    /// source.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.scale_variate(random::standard_normal(rng))
    }

    #[inline]
    fn scale_variate(&self, z: f64) -> f64 {
        z * self.sigma + self.mu
    }
}

fn validate(mu: f64, sigma: f64) -> Result<()> {
    if !mu.is_finite() || !sigma.is_finite() || sigma <= 0.0 {
        return Err(DistributionError::InvalidParameters(format!(
            "Normal requires finite μ and σ > 0, got μ={mu}, σ={sigma}"
        )));
    }
    Ok(())
}

impl ContinuousDistribution for Normal {
    /// PDF as `exp(ln_pdf(x))`.
    fn pdf(&self, x: f64) -> f64 {
        self.ln_pdf(x).exp()
    }

    /// ln f(x) = −ln σ − ln √(2π) − (x−μ)²/(2σ²).
    fn ln_pdf(&self, x: f64) -> f64 {
        let d = x - self.mu;
        -self.sigma.ln() - LN_SQRT_2PI - d * d / (2.0 * self.sigma * self.sigma)
    }

    /// CDF: Φ((x−μ)/σ).
    fn cdf(&self, x: f64) -> f64 {
        special::standard_normal_cdf((x - self.mu) / self.sigma)
    }

    /// Survival: 1 − Φ((x−μ)/σ) via `erfc`.
    fn survival(&self, x: f64) -> f64 {
        special::standard_normal_sf((x - self.mu) / self.sigma)
    }

    /// Inverse CDF (quantile): μ + σ·Φ⁻¹(p).
    ///
    /// Returns `−∞` at `p = 0` and `+∞` at `p = 1`.
    fn quantile(&self, p: f64) -> Result<f64> {
        Ok(self.mu + self.sigma * standard_normal_quantile(p)?)
    }

    fn mean(&self) -> f64 {
        self.mu
    }

    fn variance(&self) -> f64 {
        self.sigma * self.sigma
    }

    fn std_dev(&self) -> f64 {
        self.sigma
    }

    fn entropy(&self) -> f64 {
        0.5 * (LN_2PI + 1.0 + 2.0 * self.sigma.ln())
    }
}

impl Parameterized for Normal {
    const NUM_PARAMETERS: usize = 2;

    fn parameter_map(&self) -> &'static [(&'static str, usize)] {
        NORMAL_PARAMETERS
    }

    fn marshal_slice(&self, out: &mut [f64]) -> Result<()> {
        check_len(Self::NUM_PARAMETERS, out.len())?;
        out[0] = self.mu;
        out[1] = self.sigma;
        Ok(())
    }

    fn unmarshal_slice(&mut self, params: &[f64]) -> Result<()> {
        check_len(Self::NUM_PARAMETERS, params.len())?;
        validate(params[0], params[1])?;
        self.mu = params[0];
        self.sigma = params[1];
        Ok(())
    }
}

impl Distribution<f64> for Normal {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        Normal::sample(self, rng)
    }
}

impl Default for Normal {
    fn default() -> Self {
        UNIT_NORMAL
    }
}

impl fmt::Debug for Normal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normal")
            .field("mu", &self.mu)
            .field("sigma", &self.sigma)
            .field("source", &self.source.is_some())
            .finish()
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct NormalParams {
    mu: f64,
    sigma: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<NormalParams> for Normal {
    type Error = DistributionError;

    fn try_from(p: NormalParams) -> Result<Self> {
        Normal::new(p.mu, p.sigma)
    }
}

#[cfg(feature = "serde")]
impl From<Normal> for NormalParams {
    fn from(n: Normal) -> Self {
        NormalParams {
            mu: n.mu,
            sigma: n.sigma,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn roundtrip_cdf_quantile(
            mu in -1e3_f64..1e3,
            sigma in 1e-3_f64..1e3,
            p in 1e-9_f64..(1.0 - 1e-9),
        ) {
            let n = Normal::new(mu, sigma).unwrap();
            let x = n.quantile(p).unwrap();
            let back = n.cdf(x);
            // the affine step rounds x by ~ulp(|μ|), which moves Φ by at most φ·ulp/σ
            let tol = 1e-12 + 1e-15 * mu.abs() / sigma;
            prop_assert!((back - p).abs() < tol, "p={p}, x={x}, back={back}");
        }

        #[test]
        fn cdf_plus_survival_is_one(
            mu in -1e3_f64..1e3,
            sigma in 1e-2_f64..1e2,
            x in -1e4_f64..1e4,
        ) {
            let n = Normal::new(mu, sigma).unwrap();
            let sum = n.cdf(x) + n.survival(x);
            prop_assert!((sum - 1.0).abs() < 1e-15, "sum = {sum}");
        }

        #[test]
        fn pdf_equals_exp_ln_pdf(
            mu in -1e3_f64..1e3,
            sigma in 1e-2_f64..1e2,
            x in -1e4_f64..1e4,
        ) {
            let n = Normal::new(mu, sigma).unwrap();
            prop_assert_eq!(n.pdf(x), n.ln_pdf(x).exp());
        }

        #[test]
        fn d_ln_pdf_dx_matches_finite_difference(
            mu in -10.0_f64..10.0,
            sigma in 0.1_f64..10.0,
            x in -20.0_f64..20.0,
        ) {
            let n = Normal::new(mu, sigma).unwrap();
            let h = 1e-5;
            let fd = (n.ln_pdf(x + h) - n.ln_pdf(x - h)) / (2.0 * h);
            let exact = n.d_ln_pdf_dx(x);
            prop_assert!((exact - fd).abs() < 1e-4 * exact.abs().max(1.0), "{exact} vs {fd}");
        }

        #[test]
        fn marshal_unmarshal_identity(mu in -1e6_f64..1e6, sigma in 1e-6_f64..1e6) {
            let n = Normal::new(mu, sigma).unwrap();
            let mut buf = [0.0; 2];
            n.marshal_slice(&mut buf).unwrap();
            let mut m = Normal::standard();
            m.unmarshal_slice(&buf).unwrap();
            prop_assert_eq!((m.mu(), m.sigma()), (mu, sigma));
        }
    }
}
