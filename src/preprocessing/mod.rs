//! Preprocessing transformers for the single-predictor polynomial model.
//!
//! The pieces compose like a small recipe: center (and optionally scale)
//! the predictor, expand it into polynomial columns, then hand the design
//! matrix to a regression. Statistics are learned in `fit`/`prep` only and
//! reused unchanged when transforming other data.
//!
//! # Example
//!
//! ```
//! use polyselect::prelude::*;
//! use polyselect::preprocessing::StandardScaler;
//!
//! let data = Matrix::from_vec(4, 1, vec![18.0, 30.0, 42.0, 54.0]).expect("4x1");
//!
//! let mut scaler = StandardScaler::new().with_std(false);
//! let centered = scaler.fit_transform(&data).expect("non-empty");
//!
//! assert!((centered.get(0, 0) + 18.0).abs() < 1e-12);
//! ```

mod polynomial;
mod recipe;

pub use polynomial::{OrthogonalPolynomial, PolynomialBasis, PolynomialFeatures};
pub use recipe::{PolynomialRecipe, PreparedRecipe};

use crate::error::{PolySelectError, Result};
use crate::primitives::Matrix;
use crate::traits::Transformer;
use serde::{Deserialize, Serialize};

/// Standard deviations at or below this are treated as zero and left unscaled.
const MIN_STD: f64 = 1e-10;

/// Standardizes features by removing the mean and scaling to unit variance.
///
/// The standard score of a sample x is: z = (x - mean) / std
///
/// With `with_std(false)` this is plain centering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Mean of each feature (computed during fit).
    mean: Option<Vec<f64>>,
    /// Population standard deviation of each feature (computed during fit).
    std: Option<Vec<f64>>,
    /// Whether to center the data (subtract mean).
    with_mean: bool,
    /// Whether to scale the data (divide by std).
    with_std: bool,
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardScaler {
    /// Creates a new `StandardScaler` with centering and scaling enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mean: None,
            std: None,
            with_mean: true,
            with_std: true,
        }
    }

    /// Sets whether to center the data by subtracting the mean.
    #[must_use]
    pub fn with_mean(mut self, with_mean: bool) -> Self {
        self.with_mean = with_mean;
        self
    }

    /// Sets whether to scale the data by dividing by standard deviation.
    #[must_use]
    pub fn with_std(mut self, with_std: bool) -> Self {
        self.with_std = with_std;
        self
    }

    /// Returns the mean of each feature.
    ///
    /// # Errors
    ///
    /// Returns [`PolySelectError::NotFitted`] before `fit`.
    pub fn mean(&self) -> Result<&[f64]> {
        self.mean.as_deref().ok_or(PolySelectError::NotFitted {
            component: "StandardScaler",
        })
    }

    /// Returns the standard deviation of each feature.
    ///
    /// # Errors
    ///
    /// Returns [`PolySelectError::NotFitted`] before `fit`.
    pub fn std(&self) -> Result<&[f64]> {
        self.std.as_deref().ok_or(PolySelectError::NotFitted {
            component: "StandardScaler",
        })
    }

    /// Returns true if the scaler has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.mean.is_some()
    }

    fn fitted_stats(&self, n_features: usize) -> Result<(&[f64], &[f64])> {
        let mean = self.mean()?;
        let std = self.std()?;
        if n_features != mean.len() {
            return Err(PolySelectError::dimension_mismatch(
                "scaler features",
                mean.len(),
                n_features,
            ));
        }
        Ok((mean, std))
    }

    /// Transforms data back to original scale.
    ///
    /// # Errors
    ///
    /// Returns an error if the scaler is not fitted or dimensions mismatch.
    pub fn inverse_transform(&self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
        let (n_samples, n_features) = x.shape();
        let (mean, std) = self.fitted_stats(n_features)?;

        let mut result = Vec::with_capacity(n_samples * n_features);
        for i in 0..n_samples {
            for j in 0..n_features {
                let mut val = x.get(i, j);
                if self.with_std && std[j] > MIN_STD {
                    val *= std[j];
                }
                if self.with_mean {
                    val += mean[j];
                }
                result.push(val);
            }
        }

        Matrix::from_vec(n_samples, n_features, result)
    }
}

impl Transformer for StandardScaler {
    /// Computes the mean and population standard deviation of each feature.
    fn fit(&mut self, x: &Matrix<f64>) -> Result<()> {
        let (n_samples, n_features) = x.shape();

        if n_samples == 0 {
            return Err(PolySelectError::empty_input("cannot fit scaler with zero samples"));
        }

        let mut mean = vec![0.0; n_features];
        for (j, mean_j) in mean.iter_mut().enumerate() {
            let sum: f64 = (0..n_samples).map(|i| x.get(i, j)).sum();
            *mean_j = sum / n_samples as f64;
        }

        let mut std = vec![0.0; n_features];
        for (j, std_j) in std.iter_mut().enumerate() {
            let sum_sq: f64 = (0..n_samples)
                .map(|i| {
                    let diff = x.get(i, j) - mean[j];
                    diff * diff
                })
                .sum();
            *std_j = (sum_sq / n_samples as f64).sqrt();
        }

        self.mean = Some(mean);
        self.std = Some(std);

        Ok(())
    }

    /// Standardizes the data using the fitted mean and std.
    fn transform(&self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
        let (n_samples, n_features) = x.shape();
        let (mean, std) = self.fitted_stats(n_features)?;

        let mut result = Vec::with_capacity(n_samples * n_features);
        for i in 0..n_samples {
            for j in 0..n_features {
                let mut val = x.get(i, j);
                if self.with_mean {
                    val -= mean[j];
                }
                if self.with_std && std[j] > MIN_STD {
                    val /= std[j];
                }
                result.push(val);
            }
        }

        Matrix::from_vec(n_samples, n_features, result)
    }
}


#[cfg(test)]
#[path = "tests_recipe_contract.rs"]
mod tests_recipe_contract;
