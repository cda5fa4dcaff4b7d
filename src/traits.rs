//! Core traits for estimators and transformers.
//!
//! These traits define the API contracts the cross-validation loop relies on:
//! an estimator is fitted on the analysis set and asked to predict the
//! assessment set, and a transformer learns its statistics in `fit` and only
//! applies them in `transform`.

use crate::error::Result;
use crate::primitives::{Matrix, Vector};

/// Primary trait for supervised regression estimators.
///
/// # Examples
///
/// ```
/// use polyselect::prelude::*;
///
/// // y = 2x + 1
/// let x_train = Matrix::from_vec(4, 1, vec![1.0, 2.0, 3.0, 4.0]).expect("4x1");
/// let y_train = Vector::from_slice(&[3.0, 5.0, 7.0, 9.0]);
///
/// let mut model = LinearRegression::new();
/// model.fit(&x_train, &y_train).expect("full rank");
///
/// let x_test = Matrix::from_vec(1, 1, vec![5.0]).expect("1x1");
/// let pred = model.predict(&x_test).expect("fitted");
/// assert!((pred[0] - 11.0).abs() < 1e-9);
/// ```
pub trait Estimator {
    /// Fits the model to training data.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails (dimension mismatch, singular matrix, etc.).
    fn fit(&mut self, x: &Matrix<f64>, y: &Vector<f64>) -> Result<()>;

    /// Predicts target values for input data.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or `x` has the wrong width.
    fn predict(&self, x: &Matrix<f64>) -> Result<Vector<f64>>;

    /// Computes the R² score on `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns an error if prediction fails or lengths differ.
    fn score(&self, x: &Matrix<f64>, y: &Vector<f64>) -> Result<f64> {
        let y_pred = self.predict(x)?;
        crate::metrics::r_squared(&y_pred, y)
    }
}

/// Trait for data transformers (scalers, basis expansions).
///
/// ```text
/// let mut scaler = StandardScaler::new();
/// let x_scaled = scaler.fit_transform(&x_analysis)?;
/// let x_assessment_scaled = scaler.transform(&x_assessment)?;
/// ```
pub trait Transformer {
    /// Learns the transformer's statistics from `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails.
    fn fit(&mut self, x: &Matrix<f64>) -> Result<()>;

    /// Transforms data using fitted statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the transformer is not fitted.
    fn transform(&self, x: &Matrix<f64>) -> Result<Matrix<f64>>;

    /// Fits and transforms in one step.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails.
    fn fit_transform(&mut self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
        self.fit(x)?;
        self.transform(x)
    }
}
