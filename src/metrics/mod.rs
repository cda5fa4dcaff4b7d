//! Regression metrics.
//!
//! Includes R², MSE, RMSE and MAE. All take predictions first and ground
//! truth second, and reject empty or mismatched inputs instead of panicking.

use crate::error::{PolySelectError, Result};
use crate::primitives::Vector;

fn check_inputs(y_pred: &Vector<f64>, y_true: &Vector<f64>) -> Result<()> {
    if y_pred.len() != y_true.len() {
        return Err(PolySelectError::dimension_mismatch(
            "predictions",
            y_true.len(),
            y_pred.len(),
        ));
    }
    if y_true.is_empty() {
        return Err(PolySelectError::empty_input("metric inputs"));
    }
    Ok(())
}

/// Computes the coefficient of determination (R²).
///
/// R² = 1 - (`SS_res` / `SS_tot`). Returns 0.0 when `SS_tot` is zero.
///
/// # Examples
///
/// ```
/// use polyselect::metrics::r_squared;
/// use polyselect::primitives::Vector;
///
/// let y_true = Vector::from_slice(&[3.0, -0.5, 2.0, 7.0]);
/// let y_pred = Vector::from_slice(&[2.5, 0.0, 2.0, 8.0]);
/// let r2 = r_squared(&y_pred, &y_true).expect("same length");
/// assert!(r2 > 0.9);
/// ```
///
/// # Errors
///
/// Returns an error if the vectors differ in length or are empty.
pub fn r_squared(y_pred: &Vector<f64>, y_true: &Vector<f64>) -> Result<f64> {
    check_inputs(y_pred, y_true)?;

    let y_mean = y_true.mean();

    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum();

    let ss_tot: f64 = y_true.iter().map(|t| (t - y_mean).powi(2)).sum();

    if ss_tot == 0.0 {
        return Ok(0.0);
    }

    Ok(1.0 - (ss_res / ss_tot))
}

/// Computes the Mean Squared Error (MSE).
///
/// MSE = (1/n) * `Σ(y_true - y_pred)²`
///
/// # Errors
///
/// Returns an error if the vectors differ in length or are empty.
pub fn mse(y_pred: &Vector<f64>, y_true: &Vector<f64>) -> Result<f64> {
    check_inputs(y_pred, y_true)?;

    let sum_sq_error: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum();

    Ok(sum_sq_error / y_true.len() as f64)
}

/// Computes the Mean Absolute Error (MAE).
///
/// # Errors
///
/// Returns an error if the vectors differ in length or are empty.
pub fn mae(y_pred: &Vector<f64>, y_true: &Vector<f64>) -> Result<f64> {
    check_inputs(y_pred, y_true)?;

    let sum_abs_error: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).abs())
        .sum();

    Ok(sum_abs_error / y_true.len() as f64)
}

/// Computes the Root Mean Squared Error (RMSE).
///
/// RMSE = sqrt(MSE), always `>= 0`.
///
/// # Examples
///
/// ```
/// use polyselect::metrics::rmse;
/// use polyselect::primitives::Vector;
///
/// let y_true = Vector::from_slice(&[1.0, 2.0, 3.0]);
/// let y_pred = Vector::from_slice(&[1.0, 2.0, 5.0]);
/// let error = rmse(&y_pred, &y_true).expect("same length");
/// assert!((error - (4.0_f64 / 3.0).sqrt()).abs() < 1e-12);
/// ```
///
/// # Errors
///
/// Returns an error if the vectors differ in length or are empty.
pub fn rmse(y_pred: &Vector<f64>, y_true: &Vector<f64>) -> Result<f64> {
    mse(y_pred, y_true).map(f64::sqrt)
}

#[cfg(test)]
#[path = "tests_regression_contract.rs"]
mod tests_regression_contract;
