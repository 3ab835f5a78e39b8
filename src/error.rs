//! Error types for distribution construction, evaluation, and fitting.

use thiserror::Error;

/// Errors raised by the distribution API.
///
/// Every variant describes a caller contract violation; nothing here is
/// transient or retryable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DistributionError {
    /// A probability argument was NaN or outside `[0, 1]`.
    #[error("probability out of bounds: {0} is not in [0, 1]")]
    InvalidProbability(f64),

    /// A caller-provided buffer or parallel slice has the wrong length.
    #[error("slice length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Required length.
        expected: usize,
        /// Length supplied by the caller.
        actual: usize,
    },

    /// Prior sufficient statistics were specified inconsistently.
    #[error("malformed prior: {0}")]
    MalformedPrior(PriorDefect),

    /// Parameters violate distribution constraints.
    #[error("invalid distribution parameters: {0}")]
    InvalidParameters(String),

    /// Fitting was requested on an empty or zero-weight sample.
    #[error("cannot fit a distribution to an empty sample")]
    EmptySample,
}

/// What exactly is wrong with a set of prior statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorDefect {
    /// Weights were given without values.
    MissingValue,
    /// Values were given without weights.
    MissingWeight,
    /// Values and weights have different lengths.
    UnequalLengths,
    /// More than two prior values were supplied.
    TooManyValues,
    /// Only one of the two (mean, scale) entries was supplied.
    Incomplete,
}

impl std::fmt::Display for PriorDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            PriorDefect::MissingValue => "prior weight provided but not the value",
            PriorDefect::MissingWeight => "prior value provided but not the weight",
            PriorDefect::UnequalLengths => "prior value and weight lengths differ",
            PriorDefect::TooManyValues => "too many prior values (at most 2)",
            PriorDefect::Incomplete => "prior needs both a mean and a scale entry",
        };
        f.write_str(msg)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, DistributionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = DistributionError::InvalidProbability(1.5);
        assert_eq!(e.to_string(), "probability out of bounds: 1.5 is not in [0, 1]");

        let e = DistributionError::LengthMismatch { expected: 2, actual: 3 };
        assert_eq!(e.to_string(), "slice length mismatch: expected 2, got 3");

        let e = DistributionError::MalformedPrior(PriorDefect::MissingWeight);
        assert_eq!(
            e.to_string(),
            "malformed prior: prior value provided but not the weight"
        );
    }

    #[test]
    fn test_is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<DistributionError>();
    }
}
