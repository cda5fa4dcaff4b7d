//! Matrix type for 2D numeric data.

use super::Vector;
use crate::error::{PolySelectError, Result};
use serde::{Deserialize, Serialize};

/// Relative threshold on `|R_kk| / max|R_jj|` below which a least-squares
/// system is treated as rank deficient.
pub(crate) const RANK_TOLERANCE: f64 = 1e-10;

/// A 2D matrix of floating-point values (row-major storage).
///
/// # Examples
///
/// ```
/// use polyselect::primitives::Matrix;
///
/// let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
///     .expect("data length matches rows * cols");
/// assert_eq!(m.shape(), (2, 3));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Copy> Matrix<T> {
    /// Creates a new matrix from a vector of data.
    ///
    /// # Errors
    ///
    /// Returns an error if data length doesn't match rows * cols.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(PolySelectError::dimension_mismatch(
                "rows * cols",
                rows * cols,
                data.len(),
            ));
        }
        Ok(Self { data, rows, cols })
    }

    /// Returns the shape as (rows, cols).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.cols
    }

    /// Gets element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.cols + col]
    }

    /// Sets element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.data[row * self.cols + col] = value;
    }

    /// Returns a row as a Vector.
    #[must_use]
    pub fn row(&self, row_idx: usize) -> Vector<T> {
        let start = row_idx * self.cols;
        let end = start + self.cols;
        Vector::from_slice(&self.data[start..end])
    }

    /// Returns a column as a Vector.
    #[must_use]
    pub fn column(&self, col_idx: usize) -> Vector<T> {
        let data: Vec<T> = (0..self.rows)
            .map(|row| self.data[row * self.cols + col_idx])
            .collect();
        Vector::from_vec(data)
    }

    /// Returns the underlying data as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl Matrix<f64> {
    /// Creates a matrix of zeros.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Creates a single-column matrix.
    #[must_use]
    pub fn column_vector(values: &[f64]) -> Self {
        Self {
            data: values.to_vec(),
            rows: values.len(),
            cols: 1,
        }
    }

    /// Returns a copy with a leading column of ones.
    #[must_use]
    pub fn with_intercept_column(&self) -> Self {
        let mut data = Vec::with_capacity(self.rows * (self.cols + 1));
        for i in 0..self.rows {
            data.push(1.0);
            data.extend_from_slice(&self.data[i * self.cols..(i + 1) * self.cols]);
        }
        Self {
            data,
            rows: self.rows,
            cols: self.cols + 1,
        }
    }

    /// Transposes the matrix.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut data = vec![0.0; self.rows * self.cols];
        for i in 0..self.rows {
            for j in 0..self.cols {
                data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        Self {
            data,
            rows: self.cols,
            cols: self.rows,
        }
    }

    /// Matrix-matrix multiplication.
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions don't match.
    pub fn matmul(&self, other: &Self) -> Result<Self> {
        if self.cols != other.rows {
            return Err(PolySelectError::DimensionMismatch {
                expected: format!("{} rows", self.cols),
                actual: format!("{} rows", other.rows),
            });
        }

        let mut result = vec![0.0; self.rows * other.cols];
        for i in 0..self.rows {
            for j in 0..other.cols {
                let mut sum = 0.0;
                for k in 0..self.cols {
                    sum += self.get(i, k) * other.get(k, j);
                }
                result[i * other.cols + j] = sum;
            }
        }

        Ok(Self {
            data: result,
            rows: self.rows,
            cols: other.cols,
        })
    }

    /// Matrix-vector multiplication.
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions don't match.
    pub fn matvec(&self, vec: &Vector<f64>) -> Result<Vector<f64>> {
        if self.cols != vec.len() {
            return Err(PolySelectError::dimension_mismatch(
                "matrix columns",
                self.cols,
                vec.len(),
            ));
        }

        let result: Vec<f64> = (0..self.rows)
            .map(|i| {
                let row = &self.data[i * self.cols..(i + 1) * self.cols];
                row.iter().zip(vec.iter()).map(|(a, b)| a * b).sum()
            })
            .collect();

        Ok(Vector::from_vec(result))
    }

    /// Multiplies each element by a scalar.
    #[must_use]
    pub fn mul_scalar(&self, scalar: f64) -> Self {
        Self {
            data: self.data.iter().map(|x| x * scalar).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Solves the linear system Ax = b using Cholesky decomposition.
    ///
    /// The matrix must be symmetric positive definite.
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix is not square or not positive definite.
    pub fn cholesky_solve(&self, b: &Vector<f64>) -> Result<Vector<f64>> {
        if self.rows != self.cols {
            return Err(PolySelectError::DimensionMismatch {
                expected: "square matrix".to_string(),
                actual: format!("{}x{}", self.rows, self.cols),
            });
        }
        if self.rows != b.len() {
            return Err(PolySelectError::dimension_mismatch(
                "matrix rows",
                self.rows,
                b.len(),
            ));
        }

        let n = self.rows;

        // A = L * L^T
        let mut l = vec![0.0; n * n];

        for i in 0..n {
            for j in 0..=i {
                let mut sum = 0.0;

                if i == j {
                    for k in 0..j {
                        sum += l[j * n + k] * l[j * n + k];
                    }
                    let diag = self.get(j, j) - sum;
                    if diag <= 0.0 || !diag.is_finite() {
                        return Err(PolySelectError::SingularMatrix { pivot: diag });
                    }
                    l[j * n + j] = diag.sqrt();
                } else {
                    for k in 0..j {
                        sum += l[i * n + k] * l[j * n + k];
                    }
                    l[i * n + j] = (self.get(i, j) - sum) / l[j * n + j];
                }
            }
        }

        // Forward substitution: L * y = b
        let mut y = vec![0.0; n];
        for i in 0..n {
            let mut sum = 0.0;
            for j in 0..i {
                sum += l[i * n + j] * y[j];
            }
            y[i] = (b[i] - sum) / l[i * n + i];
        }

        // Backward substitution: L^T * x = y
        let mut x = vec![0.0; n];
        for i in (0..n).rev() {
            let mut sum = 0.0;
            for j in (i + 1)..n {
                sum += l[j * n + i] * x[j];
            }
            x[i] = (y[i] - sum) / l[i * n + i];
        }

        Ok(Vector::from_vec(x))
    }

    /// Solves `min ||A x - b||` with Householder QR.
    ///
    /// Works on the design matrix directly, so the conditioning is that of
    /// `A` rather than `A^T A`.
    ///
    /// # Errors
    ///
    /// Returns [`PolySelectError::InsufficientSamples`] when `rows < cols`,
    /// and [`PolySelectError::SingularMatrix`] when a diagonal entry of `R`
    /// falls below [`RANK_TOLERANCE`] relative to the largest one.
    pub fn qr_least_squares(&self, b: &Vector<f64>) -> Result<Vector<f64>> {
        let (m, n) = (self.rows, self.cols);
        if m != b.len() {
            return Err(PolySelectError::dimension_mismatch("matrix rows", m, b.len()));
        }
        if m < n {
            return Err(PolySelectError::InsufficientSamples {
                required: n,
                actual: m,
            });
        }
        if n == 0 {
            return Ok(Vector::from_vec(Vec::new()));
        }

        let mut a = self.data.clone();
        let mut rhs = b.as_slice().to_vec();
        let mut r_diag = vec![0.0; n];

        for k in 0..n {
            let norm = (k..m).map(|i| a[i * n + k].powi(2)).sum::<f64>().sqrt();
            if norm == 0.0 {
                continue;
            }
            let alpha = if a[k * n + k] > 0.0 { -norm } else { norm };
            // v = a[k.., k] - alpha * e_k, stored in place
            a[k * n + k] -= alpha;
            let v_norm_sq: f64 = (k..m).map(|i| a[i * n + k].powi(2)).sum();
            if v_norm_sq == 0.0 {
                r_diag[k] = alpha;
                continue;
            }

            for j in (k + 1)..n {
                let s: f64 = (k..m).map(|i| a[i * n + k] * a[i * n + j]).sum();
                let f = 2.0 * s / v_norm_sq;
                for i in k..m {
                    a[i * n + j] -= f * a[i * n + k];
                }
            }
            let s: f64 = (k..m).map(|i| a[i * n + k] * rhs[i]).sum();
            let f = 2.0 * s / v_norm_sq;
            for i in k..m {
                rhs[i] -= f * a[i * n + k];
            }

            r_diag[k] = alpha;
        }

        let max_diag = r_diag.iter().fold(0.0_f64, |acc, d| acc.max(d.abs()));
        if let Some(&pivot) = r_diag
            .iter()
            .find(|d| d.abs() <= RANK_TOLERANCE * max_diag || !d.is_finite())
        {
            return Err(PolySelectError::SingularMatrix { pivot });
        }

        // Back substitution on R x = Q^T b
        let mut x = vec![0.0; n];
        for k in (0..n).rev() {
            let mut sum = rhs[k];
            for j in (k + 1)..n {
                sum -= a[k * n + j] * x[j];
            }
            x[k] = sum / r_diag[k];
        }

        Ok(Vector::from_vec(x))
    }
}

#[cfg(test)]
#[path = "matrix_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests_matrix_contract.rs"]
mod tests_matrix_contract;
