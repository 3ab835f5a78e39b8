//! # u-gaussian
//!
//! The normal (Gaussian) distribution as a self-contained numerical
//! building block.
//!
//! This crate provides density, distribution, survival and quantile
//! evaluation, moments and entropy, log-density gradients, sampling from a
//! shareable seeded source, parameter marshaling, and conjugate-prior
//! fitting to weighted samples.
//!
//! ## Modules
//!
//! - [`quantile`] — Wichura's AS 241 inverse normal CDF and its rational
//!   polynomial kernel
//! - [`special`] — Error function pair and standard normal φ, Φ, 1 − Φ
//! - [`stats`] — Compensated weighted mean and moments
//! - [`random`] — Seeded generators and the shared [`RandomSource`] handle
//! - [`distribution`] — [`ContinuousDistribution`] and [`Parameterized`]
//! - [`normal`] — The [`Normal`] distribution
//! - [`fit`] — Weighted fitting with [`PriorStatistics`]
//! - [`error`] — [`DistributionError`] and [`PriorDefect`]
//!
//! ## Design Philosophy
//!
//! - **Numerical stability first**: survival computed from `erfc`, never as
//!   `1 − Φ`; Neumaier summation for sample statistics
//! - **Errors, not panics**: every contract violation is a
//!   [`DistributionError`]
//! - **Property-based testing**: Mathematical invariants verified via proptest
//!
//! ## Example
//!
//! ```
//! use u_gaussian::{ContinuousDistribution, Normal, RandomSource};
//!
//! let n = Normal::new(0.0, 1.0).unwrap().with_source(RandomSource::seeded(42));
//! let draws: Vec<f64> = (0..1000).map(|_| n.rand()).collect();
//! let fitted = n.fit(&draws, None).unwrap();
//! assert!(fitted.mu().abs() < 0.2);
//! assert!((fitted.quantile(0.5).unwrap() - fitted.mu()).abs() < 1e-12);
//! ```

#![warn(missing_docs)]

pub mod distribution;
pub mod error;
pub mod fit;
pub mod normal;
pub mod quantile;
pub mod random;
pub mod special;
pub mod stats;

pub use distribution::{ContinuousDistribution, Parameterized};
pub use error::{DistributionError, PriorDefect, Result};
pub use fit::PriorStatistics;
pub use normal::{Normal, NORMAL_PARAMETERS, UNIT_NORMAL};
pub use random::RandomSource;
