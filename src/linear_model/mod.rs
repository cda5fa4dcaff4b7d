//! Linear models for regression.
//!
//! Includes Ordinary Least Squares (OLS) linear regression.

use crate::error::{PolySelectError, Result};
use crate::primitives::{Matrix, Vector};
use crate::traits::Estimator;
use serde::{Deserialize, Serialize};

/// Least-squares solver used by [`LinearRegression`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Solver {
    /// Householder QR on the design matrix.
    #[default]
    Qr,
    /// Cholesky on `X^T X` (normal equations). Squares the condition number.
    NormalEquations,
}

/// Ordinary Least Squares (OLS) linear regression.
///
/// Fits a linear model by minimizing the residual sum of squares between
/// observed targets and predicted targets. The model equation is:
///
/// ```text
/// y = X β + ε
/// ```
///
/// where `β` is the coefficient vector and `ε` is random error.
///
/// # Solver
///
/// [`Solver::Qr`] by default. [`Solver::NormalEquations`] solves
/// `β = (X^T X)^-1 X^T y` via Cholesky decomposition.
///
/// # Examples
///
/// ```
/// use polyselect::prelude::*;
///
/// // y = 2x + 1
/// let x = Matrix::from_vec(4, 1, vec![1.0, 2.0, 3.0, 4.0]).expect("4x1");
/// let y = Vector::from_slice(&[3.0, 5.0, 7.0, 9.0]);
///
/// let mut model = LinearRegression::new();
/// model.fit(&x, &y).expect("full rank");
///
/// let r2 = model.score(&x, &y).expect("fitted");
/// assert!(r2 > 0.99);
/// ```
///
/// # Performance
///
/// - Time complexity: O(np²) where n = samples, p = features
/// - Space complexity: O(np)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinearRegression {
    /// Coefficients for features (excluding intercept).
    coefficients: Option<Vector<f64>>,
    /// Intercept (bias) term.
    intercept: f64,
    /// Whether to fit an intercept.
    fit_intercept: bool,
    /// Solver for the least-squares problem.
    solver: Solver,
}

impl LinearRegression {
    /// Creates a new `LinearRegression` with an intercept and the QR solver.
    #[must_use]
    pub fn new() -> Self {
        Self {
            coefficients: None,
            intercept: 0.0,
            fit_intercept: true,
            solver: Solver::Qr,
        }
    }

    /// Sets whether to fit an intercept term.
    #[must_use]
    pub fn with_intercept(mut self, fit_intercept: bool) -> Self {
        self.fit_intercept = fit_intercept;
        self
    }

    /// Sets the least-squares solver.
    #[must_use]
    pub fn with_solver(mut self, solver: Solver) -> Self {
        self.solver = solver;
        self
    }

    /// Returns the coefficients (excluding intercept).
    ///
    /// # Errors
    ///
    /// Returns [`PolySelectError::NotFitted`] before `fit`.
    pub fn coefficients(&self) -> Result<&Vector<f64>> {
        self.coefficients.as_ref().ok_or(PolySelectError::NotFitted {
            component: "LinearRegression",
        })
    }

    /// Returns the intercept term (0.0 when fitted without one).
    #[must_use]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Returns true if the model has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.coefficients.is_some()
    }

    fn solve(&self, x_design: &Matrix<f64>, y: &Vector<f64>) -> Result<Vector<f64>> {
        match self.solver {
            Solver::Qr => x_design.qr_least_squares(y),
            Solver::NormalEquations => {
                let xt = x_design.transpose();
                let xtx = xt.matmul(x_design)?;
                let xty = xt.matvec(y)?;
                xtx.cholesky_solve(&xty)
            }
        }
    }
}

impl Estimator for LinearRegression {
    /// Fits the linear regression model.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Input dimensions don't match
    /// - There are no samples
    /// - Not enough samples for the number of parameters (underdetermined system)
    /// - The design matrix is rank deficient
    /// - The solution is not finite
    fn fit(&mut self, x: &Matrix<f64>, y: &Vector<f64>) -> Result<()> {
        let (n_samples, n_features) = x.shape();

        if n_samples != y.len() {
            return Err(PolySelectError::dimension_mismatch(
                "target length",
                n_samples,
                y.len(),
            ));
        }

        if n_samples == 0 {
            return Err(PolySelectError::empty_input("cannot fit with zero samples"));
        }

        let required_samples = if self.fit_intercept {
            n_features + 1
        } else {
            n_features
        };

        if n_samples < required_samples {
            return Err(PolySelectError::InsufficientSamples {
                required: required_samples,
                actual: n_samples,
            });
        }

        let beta = if self.fit_intercept {
            self.solve(&x.with_intercept_column(), y)?
        } else {
            self.solve(x, y)?
        };

        if !beta.is_finite() {
            return Err(PolySelectError::NonFinite {
                context: "regression coefficients".to_string(),
            });
        }

        if self.fit_intercept {
            self.intercept = beta[0];
            self.coefficients = Some(beta.slice(1, n_features + 1));
        } else {
            self.intercept = 0.0;
            self.coefficients = Some(beta);
        }

        Ok(())
    }

    /// Predicts target values for input data.
    fn predict(&self, x: &Matrix<f64>) -> Result<Vector<f64>> {
        let coefficients = self.coefficients()?;
        let result = x.matvec(coefficients)?;
        Ok(result.add_scalar(self.intercept))
    }
}
