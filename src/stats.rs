//! Weighted descriptive statistics with numerical stability guarantees.
//!
//! These are the sufficient statistics consumed by distribution fitting.
//! Every sum goes through Neumaier compensated summation, and moments are
//! computed in two passes (mean first, then deviations about it) to avoid
//! the catastrophic cancellation of `E[X²] − (E[X])²`.
//!
//! # Conventions
//!
//! - `weights: None` means every observation has weight 1.
//! - Weights must be finite and non-negative, with a positive total.
//! - Moments are **population** (uncorrected) moments: the normalizer is
//!   the total weight, never `n − 1`.
//!
//! Functions return `None` instead of a meaningless number when these
//! conventions are violated.

/// Running Neumaier-compensated sum.
#[derive(Debug, Clone, Copy, Default)]
struct CompensatedSum {
    sum: f64,
    c: f64,
}

impl CompensatedSum {
    #[inline]
    fn add(&mut self, x: f64) {
        let t = self.sum + x;
        if self.sum.abs() >= x.abs() {
            self.c += (self.sum - t) + x;
        } else {
            self.c += (x - t) + self.sum;
        }
        self.sum = t;
    }

    #[inline]
    fn total(&self) -> f64 {
        self.sum + self.c
    }
}

/// Neumaier's improved Kahan–Babuška summation.
///
/// Unlike plain Kahan summation, this variant also handles the
/// case where the addend is larger in magnitude than the running sum.
///
/// # Algorithm
/// Maintains a running compensation variable `c`. At each step, the
/// branch ensures the smaller operand's low-order bits are captured.
///
/// Reference: Neumaier (1974), "Rundungsfehleranalyse einiger Verfahren
/// zur Summation endlicher Summen", *Zeitschrift für Angewandte
/// Mathematik und Mechanik* 54(1), pp. 39–51.
///
/// # Complexity
/// Time: O(n), Space: O(1)
///
/// # Examples
/// ```
/// use u_gaussian::stats::kahan_sum;
/// assert_eq!(kahan_sum(&[1.0, 1e100, 1.0, -1e100]), 2.0);
/// ```
pub fn kahan_sum(data: &[f64]) -> f64 {
    let mut acc = CompensatedSum::default();
    for &x in data {
        acc.add(x);
    }
    acc.total()
}

/// Total weight of a sample: `Σwᵢ`, or `n` when unweighted.
///
/// # Returns
/// - `None` if the weights fail validation against `len`.
pub fn total_weight(len: usize, weights: Option<&[f64]>) -> Option<f64> {
    match weights {
        None => Some(len as f64),
        Some(w) => {
            if w.len() != len || !w.iter().all(|&x| x.is_finite() && x >= 0.0) {
                return None;
            }
            Some(kahan_sum(w))
        }
    }
}

/// Computes the arithmetic mean using Kahan compensated summation.
///
/// # Returns
/// - `None` if `data` is empty or contains any NaN/Inf.
///
/// # Examples
/// ```
/// use u_gaussian::stats::mean;
/// let v = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert!((mean(&v).unwrap() - 3.0).abs() < 1e-15);
/// ```
pub fn mean(data: &[f64]) -> Option<f64> {
    weighted_mean(data, None)
}

/// Weighted arithmetic mean `Σwᵢxᵢ / Σwᵢ`.
///
/// # Returns
/// - `None` if `data` is empty, contains NaN/Inf, the weights have a
///   different length, any weight is negative or non-finite, or the total
///   weight is zero.
///
/// # Examples
/// ```
/// use u_gaussian::stats::weighted_mean;
/// let m = weighted_mean(&[1.0, 2.0, 3.0], Some(&[1.0, 0.0, 1.0])).unwrap();
/// assert_eq!(m, 2.0);
/// assert_eq!(weighted_mean(&[1.0, 2.0], Some(&[1.0])), None);
/// ```
pub fn weighted_mean(data: &[f64], weights: Option<&[f64]>) -> Option<f64> {
    let total = checked_total_weight(data, weights)?;
    let numerator = match weights {
        None => kahan_sum(data),
        Some(w) => {
            let mut acc = CompensatedSum::default();
            for (&x, &wi) in data.iter().zip(w) {
                acc.add(wi * x);
            }
            acc.total()
        }
    };
    Some(numerator / total)
}

/// Weighted central moment of the given order about `about`:
/// `Σwᵢ(xᵢ − about)ᵏ / Σwᵢ`.
///
/// With `about` set to the weighted mean and `order = 2` this is the
/// population (uncorrected) variance.
///
/// # Returns
/// Same `None` conditions as [`weighted_mean`].
///
/// # Examples
/// ```
/// use u_gaussian::stats::weighted_moment;
/// let v = weighted_moment(2, &[1.0, 2.0, 3.0], 2.0, None).unwrap();
/// assert!((v - 2.0 / 3.0).abs() < 1e-15);
/// ```
pub fn weighted_moment(order: i32, data: &[f64], about: f64, weights: Option<&[f64]>) -> Option<f64> {
    let total = checked_total_weight(data, weights)?;
    let mut acc = CompensatedSum::default();
    match weights {
        None => {
            for &x in data {
                acc.add((x - about).powi(order));
            }
        }
        Some(w) => {
            for (&x, &wi) in data.iter().zip(w) {
                acc.add(wi * (x - about).powi(order));
            }
        }
    }
    Some(acc.total() / total)
}

/// Computes the population variance (denominator `n`) in two passes.
///
/// # Returns
/// - `None` if `data` is empty or contains NaN/Inf.
///
/// # Examples
/// ```
/// use u_gaussian::stats::population_variance;
/// let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((population_variance(&v).unwrap() - 4.0).abs() < 1e-10);
/// ```
pub fn population_variance(data: &[f64]) -> Option<f64> {
    let m = mean(data)?;
    weighted_moment(2, data, m, None)
}

fn checked_total_weight(data: &[f64], weights: Option<&[f64]>) -> Option<f64> {
    if data.is_empty() || !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    let total = total_weight(data.len(), weights)?;
    if total > 0.0 && total.is_finite() {
        Some(total)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
