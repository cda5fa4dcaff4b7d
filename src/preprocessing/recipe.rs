//! Prep-once, bake-many preprocessing for one cross-validation split.

use super::{OrthogonalPolynomial, PolynomialBasis, PolynomialFeatures, StandardScaler};
use crate::data::distinct_count;
use crate::error::{PolySelectError, Result};
use crate::primitives::Matrix;
use crate::traits::Transformer;
use serde::{Deserialize, Serialize};

/// Unprepared description of the predictor pipeline: center, optionally
/// scale, then expand to `degree` polynomial columns.
///
/// # Examples
///
/// ```
/// use polyselect::preprocessing::{PolynomialBasis, PolynomialRecipe};
///
/// let analysis = [20.0, 30.0, 40.0, 50.0];
/// let prepared = PolynomialRecipe::new(2)
///     .with_basis(PolynomialBasis::Raw)
///     .with_scaling(false)
///     .prep(&analysis)
///     .expect("enough distinct values");
///
/// assert!((prepared.center() - 35.0).abs() < 1e-12);
///
/// let design = prepared.bake(&[35.0, 45.0]).expect("prepared");
/// assert_eq!(design.row(1).as_slice(), &[10.0, 100.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolynomialRecipe {
    degree: usize,
    basis: PolynomialBasis,
    scale: bool,
}

impl PolynomialRecipe {
    /// Raw basis with scaling enabled.
    #[must_use]
    pub fn new(degree: usize) -> Self {
        Self {
            degree,
            basis: PolynomialBasis::Raw,
            scale: true,
        }
    }

    /// Sets the polynomial basis.
    #[must_use]
    pub fn with_basis(mut self, basis: PolynomialBasis) -> Self {
        self.basis = basis;
        self
    }

    /// Sets whether the centered predictor is divided by its standard
    /// deviation before expansion.
    #[must_use]
    pub fn with_scaling(mut self, scale: bool) -> Self {
        self.scale = scale;
        self
    }

    /// Polynomial degree.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Learns every statistic from `analysis_x` and nothing else.
    ///
    /// # Errors
    ///
    /// - [`PolySelectError::InvalidDegree`] if the degree is 0 or not below
    ///   the number of distinct values in `analysis_x`
    /// - [`PolySelectError::EmptyInput`] if `analysis_x` is empty
    pub fn prep(&self, analysis_x: &[f64]) -> Result<PreparedRecipe> {
        if analysis_x.is_empty() {
            return Err(PolySelectError::empty_input("recipe analysis data"));
        }
        if self.degree == 0 {
            return Err(PolySelectError::InvalidDegree {
                degree: 0,
                reason: "degree must be at least 1".to_string(),
            });
        }
        let distinct = distinct_count(analysis_x);
        if self.degree >= distinct {
            return Err(PolySelectError::InvalidDegree {
                degree: self.degree,
                reason: format!("only {distinct} distinct predictor values"),
            });
        }

        let column = Matrix::column_vector(analysis_x);
        let mut scaler = StandardScaler::new().with_std(self.scale);
        let standardized = scaler.fit_transform(&column)?;

        let expansion = match self.basis {
            PolynomialBasis::Raw => Expansion::Raw(PolynomialFeatures::new(self.degree)?),
            PolynomialBasis::Orthogonal => {
                let mut ortho = OrthogonalPolynomial::new(self.degree)?;
                ortho.fit(&standardized)?;
                Expansion::Orthogonal(ortho)
            }
        };

        Ok(PreparedRecipe {
            recipe: *self,
            scaler,
            expansion,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum Expansion {
    Raw(PolynomialFeatures),
    Orthogonal(OrthogonalPolynomial),
}

/// A recipe with its statistics learned from one analysis set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedRecipe {
    recipe: PolynomialRecipe,
    scaler: StandardScaler,
    expansion: Expansion,
}

impl PreparedRecipe {
    /// Centering offset (mean of the analysis predictor).
    #[must_use]
    pub fn center(&self) -> f64 {
        self.scaler.mean().map_or(0.0, |m| m[0])
    }

    /// Divisor applied after centering; 1.0 when scaling is off or the
    /// analysis predictor is constant.
    #[must_use]
    pub fn scale(&self) -> f64 {
        match self.scaler.std() {
            Ok(std) if self.recipe.scale && std[0] > super::MIN_STD => std[0],
            _ => 1.0,
        }
    }

    /// Recipe this was prepared from.
    #[must_use]
    pub fn recipe(&self) -> PolynomialRecipe {
        self.recipe
    }

    /// Applies the learned statistics to `x`, producing the `n x degree`
    /// design matrix (no intercept column).
    ///
    /// # Errors
    ///
    /// Propagates transformer errors.
    pub fn bake(&self, x: &[f64]) -> Result<Matrix<f64>> {
        let standardized = self.scaler.transform(&Matrix::column_vector(x))?;
        match &self.expansion {
            Expansion::Raw(features) => features.transform(&standardized),
            Expansion::Orthogonal(ortho) => ortho.transform(&standardized),
        }
    }
}
