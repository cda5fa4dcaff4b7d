//! Error types for polyselect operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for polyselect operations.
///
/// Carries enough context to tell a malformed request (bad degree, bad fold
/// count) apart from a numerical failure inside one fold's fit. The type is
/// `Clone` so per-degree failures can be kept inside a search result.
///
/// # Examples
///
/// ```
/// use polyselect::error::PolySelectError;
///
/// let err = PolySelectError::InvalidFoldCount { k: 1, n_samples: 50 };
/// assert!(err.to_string().contains("fold count"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PolySelectError {
    /// Matrix/vector dimensions don't match for the operation.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Least-squares system is singular or rank deficient.
    SingularMatrix {
        /// Offending pivot (diagonal of R, or Cholesky pivot)
        pivot: f64,
    },

    /// Fewer samples than parameters to estimate.
    InsufficientSamples {
        /// Parameters in the model (including intercept)
        required: usize,
        /// Samples available
        actual: usize,
    },

    /// Invalid hyperparameter value provided.
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Candidate polynomial degree cannot be fitted.
    InvalidDegree {
        /// Requested degree
        degree: usize,
        /// Why the degree was rejected
        reason: String,
    },

    /// Fold count outside `2..=n_samples`.
    InvalidFoldCount {
        /// Requested number of folds
        k: usize,
        /// Training samples available
        n_samples: usize,
    },

    /// A fold fit degenerated numerically.
    NumericInstability {
        /// Degree being evaluated
        degree: usize,
        /// Fold whose fit failed
        fold: usize,
        /// Underlying failure
        reason: String,
    },

    /// Every candidate degree failed.
    NoViableDegree {
        /// Failure per degree, ascending by degree
        failures: Vec<(usize, PolySelectError)>,
    },

    /// Empty input where data is required.
    EmptyInput {
        /// What was empty
        context: String,
    },

    /// NaN or infinite value in the input.
    NonFinite {
        /// Where the value was found
        context: String,
    },

    /// Component used before `fit`/`prep`.
    NotFitted {
        /// Component name
        component: &'static str,
    },

    /// Configuration could not be parsed or serialized.
    Config(String),
}

impl fmt::Display for PolySelectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolySelectError::DimensionMismatch { expected, actual } => {
                write!(f, "Dimension mismatch: expected {expected}, got {actual}")
            }
            PolySelectError::SingularMatrix { pivot } => {
                write!(
                    f,
                    "Singular matrix detected: pivot = {pivot}, system is rank deficient"
                )
            }
            PolySelectError::InsufficientSamples { required, actual } => {
                write!(
                    f,
                    "Insufficient samples: need at least {required}, got {actual}"
                )
            }
            PolySelectError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid hyperparameter: {param} = {value}, expected {constraint}"
                )
            }
            PolySelectError::InvalidDegree { degree, reason } => {
                write!(f, "Invalid degree {degree}: {reason}")
            }
            PolySelectError::InvalidFoldCount { k, n_samples } => {
                write!(
                    f,
                    "Invalid fold count: k = {k}, expected 2 <= k <= {n_samples}"
                )
            }
            PolySelectError::NumericInstability {
                degree,
                fold,
                reason,
            } => {
                write!(
                    f,
                    "Numeric instability at degree {degree}, fold {fold}: {reason}"
                )
            }
            PolySelectError::NoViableDegree { failures } => {
                write!(f, "No viable degree: all {} candidates failed", failures.len())?;
                for (degree, err) in failures {
                    write!(f, "; degree {degree}: {err}")?;
                }
                Ok(())
            }
            PolySelectError::EmptyInput { context } => write!(f, "Empty input: {context}"),
            PolySelectError::NonFinite { context } => {
                write!(f, "Non-finite value in {context}")
            }
            PolySelectError::NotFitted { component } => {
                write!(f, "{component} not fitted. Call fit() first")
            }
            PolySelectError::Config(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for PolySelectError {}

impl From<serde_json::Error> for PolySelectError {
    fn from(err: serde_json::Error) -> Self {
        PolySelectError::Config(err.to_string())
    }
}

impl PolySelectError {
    /// Create a dimension mismatch error with descriptive context
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create an empty input error
    #[must_use]
    pub fn empty_input(context: &str) -> Self {
        Self::EmptyInput {
            context: context.to_string(),
        }
    }

    /// Create an invalid hyperparameter error
    #[must_use]
    pub fn invalid_hyperparameter(param: &str, value: impl fmt::Display, constraint: &str) -> Self {
        Self::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, PolySelectError>;
