//! Model selection: k-fold cross-validation and polynomial degree search.
//!
//! This module provides:
//! - Seeded k-fold partitioning ([`KFold`], [`FoldAssignment`])
//! - Cross-validated rmse for one degree ([`cross_validate_degree`])
//! - Degree search with a simplicity rule ([`DegreeSelector`])

mod kfold;
mod search;

pub use kfold::{FoldAssignment, KFold, DEFAULT_SEED};
pub use search::{
    select_best_degree, DegreeEvaluation, DegreeSearchResult, DegreeSelector, SelectionRule,
};

use crate::data::Dataset;
use crate::error::{PolySelectError, Result};
use crate::metrics;
use crate::pipeline::PolynomialRegression;
use serde::{Deserialize, Serialize};

/// Rmse of one fold's model on its held-out observations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoldScore {
    /// Fold index
    pub fold: usize,
    /// Number of held-out observations
    pub n_assessment: usize,
    /// Predictor center learned from the analysis folds
    pub center: f64,
    /// Predictor scale learned from the analysis folds
    pub scale: f64,
    /// Root mean squared error on the held-out observations
    pub rmse: f64,
}

/// Results from cross-validating one degree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossValidationResult {
    /// Degree evaluated
    pub degree: usize,
    /// Score for each fold, in fold order
    pub folds: Vec<FoldScore>,
}

impl CrossValidationResult {
    /// Fold rmse values in fold order.
    #[must_use]
    pub fn scores(&self) -> Vec<f64> {
        self.folds.iter().map(|f| f.rmse).collect()
    }

    /// Calculate mean score across folds
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.folds.is_empty() {
            return 0.0;
        }
        self.folds.iter().map(|f| f.rmse).sum::<f64>() / self.folds.len() as f64
    }

    /// Sample standard deviation of fold scores (`k - 1` denominator).
    ///
    /// Zero with fewer than two folds.
    #[must_use]
    pub fn std(&self) -> f64 {
        if self.folds.len() < 2 {
            return 0.0;
        }
        let mean = self.mean();
        let variance = self
            .folds
            .iter()
            .map(|f| (f.rmse - mean).powi(2))
            .sum::<f64>()
            / (self.folds.len() - 1) as f64;
        variance.sqrt()
    }

    /// Standard error of the mean score: `std / sqrt(k)`
    #[must_use]
    pub fn std_error(&self) -> f64 {
        if self.folds.is_empty() {
            return 0.0;
        }
        self.std() / (self.folds.len() as f64).sqrt()
    }

    /// Get minimum score
    #[must_use]
    pub fn min(&self) -> f64 {
        self.folds.iter().map(|f| f.rmse).fold(f64::INFINITY, f64::min)
    }

    /// Get maximum score
    #[must_use]
    pub fn max(&self) -> f64 {
        self.folds
            .iter()
            .map(|f| f.rmse)
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Cross-validates `model`'s degree over a fixed fold assignment.
///
/// For each fold, a fresh copy of `model` is fitted on the analysis folds
/// and scored by rmse on the held-out fold. The center and scale it learned
/// are recorded in the fold's [`FoldScore`].
///
/// # Errors
///
/// - [`PolySelectError::DimensionMismatch`] if `folds` was built for a
///   different number of samples
/// - [`PolySelectError::InvalidDegree`] if the degree is 0 or not below the
///   number of distinct predictor values in `dataset`
/// - [`PolySelectError::NumericInstability`] if any fold's fit fails or
///   yields a non-finite score
///
/// # Example
///
/// ```rust
/// use polyselect::model_selection::{cross_validate_degree, KFold};
/// use polyselect::pipeline::PolynomialRegression;
/// use polyselect::synthetic::polynomial_dataset;
///
/// let data = polynomial_dataset(&[0.0, 1.0], 40, (0.0, 1.0), 0.05, 1).expect("valid");
/// let folds = KFold::new(4).with_seed(1).split(data.len()).expect("2 <= k <= n");
///
/// let result = cross_validate_degree(&PolynomialRegression::new(1), &data, &folds)
///     .expect("well-posed");
/// assert_eq!(result.folds.len(), 4);
/// assert!(result.mean() >= 0.0);
/// ```
pub fn cross_validate_degree(
    model: &PolynomialRegression,
    dataset: &Dataset,
    folds: &FoldAssignment,
) -> Result<CrossValidationResult> {
    if folds.n_samples() != dataset.len() {
        return Err(PolySelectError::dimension_mismatch(
            "fold assignment samples",
            dataset.len(),
            folds.n_samples(),
        ));
    }

    let degree = model.degree();
    let distinct = dataset.distinct_predictor_count();
    if degree == 0 || degree >= distinct {
        return Err(PolySelectError::InvalidDegree {
            degree,
            reason: format!("training set has {distinct} distinct predictor values"),
        });
    }

    let mut scores = Vec::with_capacity(folds.n_folds());

    for (fold, (analysis_idx, assessment_idx)) in folds.splits().enumerate() {
        let analysis = dataset.subset(&analysis_idx);
        let assessment = dataset.subset(assessment_idx);

        let score = fit_and_score(model, fold, &analysis, &assessment).map_err(|e| {
            PolySelectError::NumericInstability {
                degree,
                fold,
                reason: e.to_string(),
            }
        })?;

        if !score.rmse.is_finite() {
            return Err(PolySelectError::NumericInstability {
                degree,
                fold,
                reason: format!("non-finite rmse {}", score.rmse),
            });
        }

        tracing::debug!(
            degree,
            fold,
            n_assessment = score.n_assessment,
            center = score.center,
            rmse = score.rmse,
            "fold evaluated"
        );

        scores.push(score);
    }

    Ok(CrossValidationResult {
        degree,
        folds: scores,
    })
}

fn fit_and_score(
    model: &PolynomialRegression,
    fold: usize,
    analysis: &Dataset,
    assessment: &Dataset,
) -> Result<FoldScore> {
    let mut fold_model = model.clone();
    fold_model.fit(analysis)?;
    let predictions = fold_model.predict(&assessment.predictors())?;
    let rmse = metrics::rmse(&predictions, &assessment.responses())?;

    let prepared = fold_model.prepared()?;
    Ok(FoldScore {
        fold,
        n_assessment: assessment.len(),
        center: prepared.center(),
        scale: prepared.scale(),
        rmse,
    })
}


#[cfg(test)]
#[path = "tests_kfold_contract.rs"]
mod tests_kfold_contract;
