//! Serializable settings for one selection run.
//!
//! ```
//! use polyselect::config::SelectionConfig;
//! use polyselect::model_selection::SelectionRule;
//!
//! let config = SelectionConfig::from_json(r#"{"folds": 5, "rule": "one_standard_error"}"#)
//!     .expect("valid json");
//!
//! assert_eq!(config.folds, 5);
//! assert_eq!(config.rule, SelectionRule::OneStandardError);
//! assert_eq!(config.degrees, (1..=10).collect::<Vec<_>>());
//! ```

use crate::error::{PolySelectError, Result};
use crate::linear_model::Solver;
use crate::model_selection::{SelectionRule, DEFAULT_SEED};
use crate::preprocessing::PolynomialBasis;
use serde::{Deserialize, Serialize};

/// Knobs for [`run_selection`](crate::pipeline::run_selection).
///
/// Missing JSON fields take their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Candidate degrees (default `1..=10`)
    pub degrees: Vec<usize>,
    /// Number of cross-validation folds (default 10)
    pub folds: usize,
    /// Seed for the train/test split and the fold assignment
    pub seed: u64,
    /// Fraction of observations held out for the final test (default 0.2)
    pub test_fraction: f64,
    /// Simplicity rule (default exact minimum)
    pub rule: SelectionRule,
    /// Polynomial basis (default raw)
    pub basis: PolynomialBasis,
    /// Scale the centered predictor by its standard deviation (default true)
    pub scale: bool,
    /// Least-squares solver (default QR)
    pub solver: Solver,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            degrees: (1..=10).collect(),
            folds: 10,
            seed: DEFAULT_SEED,
            test_fraction: 0.2,
            rule: SelectionRule::default(),
            basis: PolynomialBasis::Raw,
            scale: true,
            solver: Solver::Qr,
        }
    }
}

impl SelectionConfig {
    /// Create a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set candidate degrees.
    #[must_use]
    pub fn with_degrees(mut self, degrees: impl IntoIterator<Item = usize>) -> Self {
        self.degrees = degrees.into_iter().collect();
        self
    }

    /// Set the number of folds.
    #[must_use]
    pub fn with_folds(mut self, folds: usize) -> Self {
        self.folds = folds;
        self
    }

    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the test fraction.
    #[must_use]
    pub fn with_test_fraction(mut self, test_fraction: f64) -> Self {
        self.test_fraction = test_fraction;
        self
    }

    /// Set the selection rule.
    #[must_use]
    pub fn with_rule(mut self, rule: SelectionRule) -> Self {
        self.rule = rule;
        self
    }

    /// Set the polynomial basis.
    #[must_use]
    pub fn with_basis(mut self, basis: PolynomialBasis) -> Self {
        self.basis = basis;
        self
    }

    /// Set predictor scaling.
    #[must_use]
    pub fn with_scaling(mut self, scale: bool) -> Self {
        self.scale = scale;
        self
    }

    /// Set the least-squares solver.
    #[must_use]
    pub fn with_solver(mut self, solver: Solver) -> Self {
        self.solver = solver;
        self
    }

    /// Parses a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PolySelectError::Config`] on malformed JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PolySelectError::Config`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks values that do not depend on the data.
    ///
    /// The upper bound on `folds` needs the training set size and is checked
    /// by the fold split itself.
    ///
    /// # Errors
    ///
    /// Returns [`PolySelectError::InvalidHyperparameter`] for fewer than two
    /// folds, a test fraction outside `(0, 1)` or an invalid rule, and
    /// [`PolySelectError::InvalidDegree`] for an empty degree list or a zero
    /// degree.
    pub fn validate(&self) -> Result<()> {
        if self.folds < 2 {
            return Err(PolySelectError::invalid_hyperparameter(
                "folds",
                self.folds,
                "folds >= 2",
            ));
        }
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(PolySelectError::invalid_hyperparameter(
                "test_fraction",
                self.test_fraction,
                "0 < test_fraction < 1",
            ));
        }
        if self.degrees.is_empty() {
            return Err(PolySelectError::InvalidDegree {
                degree: 0,
                reason: "no candidate degrees given".to_string(),
            });
        }
        if self.degrees.contains(&0) {
            return Err(PolySelectError::InvalidDegree {
                degree: 0,
                reason: "degrees must be positive".to_string(),
            });
        }
        self.rule.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SelectionConfig::new();
        assert_eq!(config.degrees, (1..=10).collect::<Vec<_>>());
        assert_eq!(config.folds, 10);
        assert_eq!(config.seed, 42);
        assert_eq!(config.test_fraction, 0.2);
        assert_eq!(config.rule, SelectionRule::WithinTolerance(0.0));
        assert_eq!(config.basis, PolynomialBasis::Raw);
        assert!(config.scale);
        assert_eq!(config.solver, Solver::Qr);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = SelectionConfig::new()
            .with_degrees([1, 2, 3])
            .with_folds(5)
            .with_seed(7)
            .with_test_fraction(0.3)
            .with_rule(SelectionRule::PercentLoss(2.0))
            .with_basis(PolynomialBasis::Orthogonal)
            .with_scaling(false)
            .with_solver(Solver::NormalEquations);
        assert_eq!(config.degrees, vec![1, 2, 3]);
        assert_eq!(config.folds, 5);
        assert_eq!(config.seed, 7);
        assert_eq!(config.basis, PolynomialBasis::Orthogonal);
        assert!(!config.scale);
        assert_eq!(config.solver, Solver::NormalEquations);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = SelectionConfig::new()
            .with_rule(SelectionRule::WithinTolerance(0.25))
            .with_basis(PolynomialBasis::Orthogonal);
        let json = config.to_json().expect("serialize");
        assert!(json.contains("\"orthogonal\""));
        assert_eq!(SelectionConfig::from_json(&json).expect("parse"), config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SelectionConfig::from_json(r#"{"seed": 1, "solver": "normal_equations"}"#)
            .expect("parse");
        assert_eq!(config.seed, 1);
        assert_eq!(config.solver, Solver::NormalEquations);
        assert_eq!(config.folds, 10);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            SelectionConfig::from_json("{\"folds\": \"ten\"}"),
            Err(PolySelectError::Config(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let cases = [
            SelectionConfig::new().with_folds(1),
            SelectionConfig::new().with_test_fraction(0.0),
            SelectionConfig::new().with_test_fraction(1.0),
            SelectionConfig::new().with_rule(SelectionRule::WithinTolerance(-0.1)),
        ];
        for config in cases {
            assert!(matches!(
                config.validate(),
                Err(PolySelectError::InvalidHyperparameter { .. })
            ));
        }
        assert!(matches!(
            SelectionConfig::new().with_degrees(Vec::new()).validate(),
            Err(PolySelectError::InvalidDegree { .. })
        ));
        assert!(matches!(
            SelectionConfig::new().with_degrees([0, 1]).validate(),
            Err(PolySelectError::InvalidDegree { degree: 0, .. })
        ));
    }
}
