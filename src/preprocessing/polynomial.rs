//! Polynomial basis expansions of a single predictor column.

use crate::data::distinct_count;
use crate::error::{PolySelectError, Result};
use crate::primitives::Matrix;
use crate::traits::Transformer;
use serde::{Deserialize, Serialize};

/// Relative squared norm below which a recurrence column is treated as zero.
const MIN_RELATIVE_NORM2: f64 = 1e-12;

/// Which polynomial basis spans the degree-`d` design matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolynomialBasis {
    /// Powers `x, x^2, ..., x^d`.
    #[default]
    Raw,
    /// Orthonormal polynomials learned from the fitted data.
    Orthogonal,
}

fn single_column(x: &Matrix<f64>) -> Result<Vec<f64>> {
    if x.n_cols() != 1 {
        return Err(PolySelectError::dimension_mismatch(
            "polynomial input columns",
            1,
            x.n_cols(),
        ));
    }
    Ok(x.as_slice().to_vec())
}

fn check_degree(degree: usize) -> Result<()> {
    if degree == 0 {
        return Err(PolySelectError::InvalidDegree {
            degree,
            reason: "degree must be at least 1".to_string(),
        });
    }
    Ok(())
}

/// Maps a single column `x` to `[x, x^2, ..., x^d]`.
///
/// There is no bias column; the regression fits the intercept.
///
/// # Examples
///
/// ```
/// use polyselect::prelude::*;
/// use polyselect::preprocessing::PolynomialFeatures;
///
/// let x = Matrix::column_vector(&[2.0, -1.0]);
/// let features = PolynomialFeatures::new(3).expect("degree >= 1");
/// let expanded = features.transform(&x).expect("single column");
///
/// assert_eq!(expanded.shape(), (2, 3));
/// assert_eq!(expanded.row(0).as_slice(), &[2.0, 4.0, 8.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolynomialFeatures {
    degree: usize,
}

impl PolynomialFeatures {
    /// Creates a raw power expansion of the given degree.
    ///
    /// # Errors
    ///
    /// Returns [`PolySelectError::InvalidDegree`] for degree 0.
    pub fn new(degree: usize) -> Result<Self> {
        check_degree(degree)?;
        Ok(Self { degree })
    }

    /// Polynomial degree (and number of output columns).
    #[must_use]
    pub fn degree(&self) -> usize {
        self.degree
    }
}

impl Transformer for PolynomialFeatures {
    /// Stateless; only checks the input shape.
    fn fit(&mut self, x: &Matrix<f64>) -> Result<()> {
        single_column(x).map(|_| ())
    }

    fn transform(&self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
        let values = single_column(x)?;
        let mut data = Vec::with_capacity(values.len() * self.degree);
        for &v in &values {
            let mut power = 1.0;
            for _ in 0..self.degree {
                power *= v;
                data.push(power);
            }
        }
        Matrix::from_vec(values.len(), self.degree, data)
    }
}

/// Orthonormal polynomial basis over the points it was fitted on.
///
/// Fitting runs the three-term (Stieltjes) recurrence
///
/// ```text
/// p_0(x) = 1
/// p_1(x) = x - alpha_0
/// p_{j+1}(x) = (x - alpha_j) p_j(x) - (norm2_j / norm2_{j-1}) p_{j-1}(x)
/// ```
///
/// with `alpha_j = sum(x p_j^2) / norm2_j` and `norm2_j = sum(p_j^2)` over the
/// fitted points. `transform` evaluates the same recurrence at new points
/// and divides column `j` by `sqrt(norm2_j)`, so on the fitted data the
/// columns are orthonormal. The column space matches the raw powers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrthogonalPolynomial {
    degree: usize,
    /// `alpha_0..alpha_{d-1}`
    alpha: Option<Vec<f64>>,
    /// `norm2_0..norm2_d`, where `norm2_0` is the sample count.
    norm2: Option<Vec<f64>>,
}

impl OrthogonalPolynomial {
    /// Creates an unfitted basis of the given degree.
    ///
    /// # Errors
    ///
    /// Returns [`PolySelectError::InvalidDegree`] for degree 0.
    pub fn new(degree: usize) -> Result<Self> {
        check_degree(degree)?;
        Ok(Self {
            degree,
            alpha: None,
            norm2: None,
        })
    }

    /// Polynomial degree (and number of output columns).
    #[must_use]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Returns true if the recurrence coefficients have been learned.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.alpha.is_some()
    }

    /// Evaluates `p_0..p_d` at `values`, one `Vec` per degree.
    fn recurrence(values: &[f64], alpha: &[f64], norm2: &[f64]) -> Vec<Vec<f64>> {
        let n = values.len();
        let mut columns: Vec<Vec<f64>> = Vec::with_capacity(alpha.len() + 1);
        columns.push(vec![1.0; n]);
        for j in 0..alpha.len() {
            let next: Vec<f64> = (0..n)
                .map(|i| {
                    let mut v = (values[i] - alpha[j]) * columns[j][i];
                    if j > 0 {
                        v -= norm2[j] / norm2[j - 1] * columns[j - 1][i];
                    }
                    v
                })
                .collect();
            columns.push(next);
        }
        columns
    }
}

impl Transformer for OrthogonalPolynomial {
    /// Learns `alpha` and `norm2` from `x`.
    ///
    /// Fails with [`PolySelectError::InvalidDegree`] when `x` has no more
    /// distinct values than the degree.
    fn fit(&mut self, x: &Matrix<f64>) -> Result<()> {
        let values = single_column(x)?;
        if values.is_empty() {
            return Err(PolySelectError::empty_input("orthogonal polynomial fit"));
        }

        let distinct = distinct_count(&values);
        if self.degree >= distinct {
            return Err(PolySelectError::InvalidDegree {
                degree: self.degree,
                reason: format!("only {distinct} distinct predictor values"),
            });
        }

        let mut alpha = Vec::with_capacity(self.degree);
        let mut norm2 = Vec::with_capacity(self.degree + 1);
        let mut prev: Vec<f64> = Vec::new();
        let mut current = vec![1.0; values.len()];
        norm2.push(values.len() as f64);

        for j in 0..self.degree {
            let a = values
                .iter()
                .zip(&current)
                .map(|(x, p)| x * p * p)
                .sum::<f64>()
                / norm2[j];
            alpha.push(a);

            let next: Vec<f64> = (0..values.len())
                .map(|i| {
                    let mut v = (values[i] - a) * current[i];
                    if j > 0 {
                        v -= norm2[j] / norm2[j - 1] * prev[i];
                    }
                    v
                })
                .collect();

            let n2: f64 = next.iter().map(|v| v * v).sum();
            if !n2.is_finite() || n2 <= MIN_RELATIVE_NORM2 * norm2[j] {
                return Err(PolySelectError::SingularMatrix { pivot: n2 });
            }
            norm2.push(n2);

            prev = std::mem::replace(&mut current, next);
        }

        self.alpha = Some(alpha);
        self.norm2 = Some(norm2);
        Ok(())
    }

    fn transform(&self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
        let (Some(alpha), Some(norm2)) = (self.alpha.as_deref(), self.norm2.as_deref()) else {
            return Err(PolySelectError::NotFitted {
                component: "OrthogonalPolynomial",
            });
        };

        let values = single_column(x)?;
        let columns = Self::recurrence(&values, alpha, norm2);

        let mut data = Vec::with_capacity(values.len() * self.degree);
        for i in 0..values.len() {
            for j in 1..=self.degree {
                data.push(columns[j][i] / norm2[j].sqrt());
            }
        }
        Matrix::from_vec(values.len(), self.degree, data)
    }
}
