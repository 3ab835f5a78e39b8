//! Special mathematical functions.
//!
//! The error function pair and the standard normal density, distribution and
//! survival functions built on it. `erf`/`erfc` come from `libm`, the
//! FreeBSD/musl routines, accurate to within about one ulp over the whole
//! real line.

use std::f64::consts::SQRT_2;

/// 1/√(2π) ≈ 0.3989422804014327
#[allow(clippy::excessive_precision)]
pub const FRAC_1_SQRT_2PI: f64 = 0.3989422804014326779399460599343818684758586311649;

/// ln √(2π) ≈ 0.9189385332046727
#[allow(clippy::excessive_precision)]
pub const LN_SQRT_2PI: f64 = 0.9189385332046727417803297364056176398613974736377834;

/// ln 2π ≈ 1.8378770664093453
#[allow(clippy::excessive_precision)]
pub const LN_2PI: f64 = 1.8378770664093454835606594728112352797227949472755668;

/// Error function.
///
/// ```text
/// erf(x) = (2/√π) ∫₀ˣ exp(-t²) dt
/// ```
///
/// # Examples
/// ```
/// use u_gaussian::special::erf;
/// assert_eq!(erf(0.0), 0.0);
/// assert!((erf(1.0) - 0.8427007929497149).abs() < 1e-15);
/// ```
pub fn erf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    libm::erf(x)
}

/// Complementary error function erfc(x) = 1 − erf(x).
///
/// Evaluated directly rather than by subtraction, so it keeps full relative
/// precision for large `x` where `erf(x)` rounds to 1.
///
/// # Examples
/// ```
/// use u_gaussian::special::erfc;
/// assert_eq!(erfc(0.0), 1.0);
/// assert!((erfc(6.0) - 2.1519736712498913e-17).abs() < 1e-30);
/// ```
pub fn erfc(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    libm::erfc(x)
}

/// Standard normal CDF Φ(z) = P(Z ≤ z) for Z ~ N(0,1).
///
/// Uses `½(1 + erf(z/√2))` on the upper half and `½·erfc(−z/√2)` on the
/// lower half, so the lower tail keeps relative precision.
///
/// # Examples
/// ```
/// use u_gaussian::special::standard_normal_cdf;
/// assert_eq!(standard_normal_cdf(0.0), 0.5);
/// assert!((standard_normal_cdf(1.0) - 0.8413447460685429).abs() < 1e-15);
/// ```
pub fn standard_normal_cdf(z: f64) -> f64 {
    if z.is_nan() {
        return f64::NAN;
    }
    if z == f64::INFINITY {
        return 1.0;
    }
    if z == f64::NEG_INFINITY {
        return 0.0;
    }
    let t = z / SQRT_2;
    if z >= 0.0 {
        0.5 * (1.0 + erf(t))
    } else {
        0.5 * erfc(-t)
    }
}

/// Standard normal survival function 1 − Φ(z) = P(Z > z).
///
/// Computed as `½·erfc(z/√2)`, never as `1 − Φ(z)`.
///
/// # Examples
/// ```
/// use u_gaussian::special::standard_normal_sf;
/// // far upper tail: 1 − Φ(10) underflows to 0 but the survival does not
/// assert!((standard_normal_sf(10.0) - 7.619853024160527e-24).abs() < 1e-36);
/// ```
pub fn standard_normal_sf(z: f64) -> f64 {
    if z.is_nan() {
        return f64::NAN;
    }
    if z == f64::INFINITY {
        return 0.0;
    }
    if z == f64::NEG_INFINITY {
        return 1.0;
    }
    0.5 * erfc(z / SQRT_2)
}

/// Standard normal PDF φ(x) = (1/√(2π)) exp(-x²/2).
///
/// # Examples
/// ```
/// use u_gaussian::special::standard_normal_pdf;
/// let peak = standard_normal_pdf(0.0);
/// assert!((peak - 0.3989422804014327).abs() < 1e-15);
/// ```
pub fn standard_normal_pdf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    FRAC_1_SQRT_2PI * (-0.5 * x * x).exp()
}

// ============================================================================
// Tests
// ============================================================================
