//! Degree search over a shared fold assignment.

use super::{cross_validate_degree, CrossValidationResult, KFold, DEFAULT_SEED};
use crate::config::SelectionConfig;
use crate::data::Dataset;
use crate::error::{PolySelectError, Result};
use crate::linear_model::Solver;
use crate::pipeline::PolynomialRegression;
use crate::preprocessing::PolynomialBasis;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// How much worse than the minimum a simpler degree may score and still be
/// preferred.
///
/// Every rule resolves to an absolute tolerance `t`; the selected degree is
/// the smallest one whose mean rmse is `<= min + t`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionRule {
    /// Fixed absolute tolerance. `0.0` picks the exact minimum, ties going
    /// to the smaller degree.
    WithinTolerance(f64),
    /// Tolerance equal to the standard error of the best degree's fold
    /// scores: sample std (`k - 1` denominator) over `sqrt(k)`.
    OneStandardError,
    /// Tolerance as a percentage of the minimum score.
    PercentLoss(f64),
}

impl Default for SelectionRule {
    fn default() -> Self {
        Self::WithinTolerance(0.0)
    }
}

impl SelectionRule {
    /// Checks the rule's parameter.
    ///
    /// # Errors
    ///
    /// Returns [`PolySelectError::InvalidHyperparameter`] for a negative or
    /// non-finite tolerance or percentage.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::WithinTolerance(t) if !(t.is_finite() && t >= 0.0) => Err(
                PolySelectError::invalid_hyperparameter("tolerance", t, "finite and >= 0"),
            ),
            Self::PercentLoss(p) if !(p.is_finite() && p >= 0.0) => Err(
                PolySelectError::invalid_hyperparameter("percent_loss", p, "finite and >= 0"),
            ),
            _ => Ok(()),
        }
    }

    /// Absolute tolerance given the best degree's cross-validation result.
    fn resolve(&self, best: &CrossValidationResult) -> f64 {
        match *self {
            Self::WithinTolerance(t) => t,
            Self::OneStandardError => best.std_error(),
            Self::PercentLoss(p) => best.mean() * p / 100.0,
        }
    }
}

/// Outcome of cross-validating one candidate degree.
#[derive(Debug, Clone, PartialEq)]
pub enum DegreeEvaluation {
    /// Every fold fitted and scored.
    Scored(CrossValidationResult),
    /// The degree could not be evaluated; other degrees were unaffected.
    Failed(PolySelectError),
}

impl DegreeEvaluation {
    /// Mean fold rmse, if scored.
    #[must_use]
    pub fn score(&self) -> Option<f64> {
        match self {
            Self::Scored(cv) => Some(cv.mean()),
            Self::Failed(_) => None,
        }
    }

    /// Cross-validation details, if scored.
    #[must_use]
    pub fn result(&self) -> Option<&CrossValidationResult> {
        match self {
            Self::Scored(cv) => Some(cv),
            Self::Failed(_) => None,
        }
    }

    /// Failure, if any.
    #[must_use]
    pub fn error(&self) -> Option<&PolySelectError> {
        match self {
            Self::Scored(_) => None,
            Self::Failed(e) => Some(e),
        }
    }
}

/// Degree search result containing the selected degree and every evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct DegreeSearchResult {
    /// Selected degree
    pub best_degree: usize,
    /// Mean rmse of the selected degree
    pub best_score: f64,
    /// Lowest mean rmse over all scored degrees
    pub min_score: f64,
    /// Resolved absolute tolerance used for selection
    pub tolerance: f64,
    /// Evaluation per requested degree, ascending
    pub evaluations: BTreeMap<usize, DegreeEvaluation>,
}

impl DegreeSearchResult {
    /// Degree to mean rmse, for scored degrees only.
    #[must_use]
    pub fn scores(&self) -> BTreeMap<usize, f64> {
        self.evaluations
            .iter()
            .filter_map(|(&d, e)| e.score().map(|s| (d, s)))
            .collect()
    }

    /// Degrees that could not be evaluated.
    #[must_use]
    pub fn failures(&self) -> Vec<(usize, &PolySelectError)> {
        self.evaluations
            .iter()
            .filter_map(|(&d, e)| e.error().map(|err| (d, err)))
            .collect()
    }

    /// Cross-validation details of the selected degree.
    #[must_use]
    pub fn best(&self) -> Option<&CrossValidationResult> {
        self.evaluations
            .get(&self.best_degree)
            .and_then(DegreeEvaluation::result)
    }
}

/// Chooses a polynomial degree by k-fold cross-validation.
///
/// The fold assignment is computed once from the seed and reused for every
/// degree, so scores are comparable and the whole search is a pure function
/// of `(dataset, degrees, configuration)`.
///
/// # Example
///
/// ```rust
/// use polyselect::model_selection::{DegreeSelector, SelectionRule};
/// use polyselect::synthetic::polynomial_dataset;
///
/// // y = 1 + 2x - x^2 + 0.5x^3 + noise
/// let data = polynomial_dataset(&[1.0, 2.0, -1.0, 0.5], 100, (-2.0, 2.0), 0.3, 42)
///     .expect("valid");
///
/// let result = DegreeSelector::new(10)
///     .with_seed(42)
///     .with_rule(SelectionRule::WithinTolerance(0.0))
///     .select(&data, 1..=10)
///     .expect("valid request");
///
/// assert_eq!(result.scores().len(), 10);
/// assert_eq!(result.best_score, result.min_score);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegreeSelector {
    n_folds: usize,
    seed: u64,
    rule: SelectionRule,
    basis: PolynomialBasis,
    scale: bool,
    solver: Solver,
}

impl DegreeSelector {
    /// `n_folds`-fold selector with the default seed, exact-minimum rule,
    /// raw basis, scaling on and the QR solver.
    #[must_use]
    pub fn new(n_folds: usize) -> Self {
        Self {
            n_folds,
            seed: DEFAULT_SEED,
            rule: SelectionRule::default(),
            basis: PolynomialBasis::Raw,
            scale: true,
            solver: Solver::Qr,
        }
    }

    /// Selector matching a run configuration.
    #[must_use]
    pub fn from_config(config: &SelectionConfig) -> Self {
        Self::new(config.folds)
            .with_seed(config.seed)
            .with_rule(config.rule)
            .with_basis(config.basis)
            .with_scaling(config.scale)
            .with_solver(config.solver)
    }

    /// Sets the fold shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the simplicity rule.
    #[must_use]
    pub fn with_rule(mut self, rule: SelectionRule) -> Self {
        self.rule = rule;
        self
    }

    /// Sets the polynomial basis.
    #[must_use]
    pub fn with_basis(mut self, basis: PolynomialBasis) -> Self {
        self.basis = basis;
        self
    }

    /// Sets whether fold predictors are scaled after centering.
    #[must_use]
    pub fn with_scaling(mut self, scale: bool) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the least-squares solver.
    #[must_use]
    pub fn with_solver(mut self, solver: Solver) -> Self {
        self.solver = solver;
        self
    }

    fn model(&self, degree: usize) -> PolynomialRegression {
        PolynomialRegression::new(degree)
            .with_basis(self.basis)
            .with_scaling(self.scale)
            .with_solver(self.solver)
    }

    fn evaluate(
        &self,
        dataset: &Dataset,
        folds: &super::FoldAssignment,
        degree: usize,
    ) -> DegreeEvaluation {
        match cross_validate_degree(&self.model(degree), dataset, folds) {
            Ok(cv) => {
                tracing::debug!(
                    degree,
                    mean_rmse = cv.mean(),
                    std_error = cv.std_error(),
                    "degree evaluated"
                );
                DegreeEvaluation::Scored(cv)
            }
            Err(err) => {
                tracing::warn!(degree, error = %err, "degree evaluation failed");
                DegreeEvaluation::Failed(err)
            }
        }
    }

    /// Cross-validates every degree in `degrees` and selects one.
    ///
    /// Duplicate degrees are evaluated once. A degree that cannot be fitted
    /// (too few distinct predictor values, a singular fold) is recorded in
    /// [`DegreeSearchResult::evaluations`] as [`DegreeEvaluation::Failed`]
    /// without affecting the others.
    ///
    /// # Errors
    ///
    /// Rejects the whole request, before fitting anything, with:
    /// - [`PolySelectError::InvalidDegree`] if `degrees` is empty or contains 0
    /// - [`PolySelectError::InvalidHyperparameter`] for an invalid rule
    /// - [`PolySelectError::InvalidFoldCount`] unless `2 <= k <= dataset.len()`
    ///
    /// Returns [`PolySelectError::NoViableDegree`] if every degree failed.
    pub fn select(
        &self,
        dataset: &Dataset,
        degrees: impl IntoIterator<Item = usize>,
    ) -> Result<DegreeSearchResult> {
        let degrees: BTreeSet<usize> = degrees.into_iter().collect();
        if degrees.is_empty() {
            return Err(PolySelectError::InvalidDegree {
                degree: 0,
                reason: "no candidate degrees given".to_string(),
            });
        }
        if degrees.contains(&0) {
            return Err(PolySelectError::InvalidDegree {
                degree: 0,
                reason: "degrees must be positive".to_string(),
            });
        }
        self.rule.validate()?;

        let folds = KFold::new(self.n_folds)
            .with_seed(self.seed)
            .split(dataset.len())?;

        let degrees: Vec<usize> = degrees.into_iter().collect();

        #[cfg(feature = "parallel")]
        let evaluated: Vec<(usize, DegreeEvaluation)> = degrees
            .par_iter()
            .map(|&d| (d, self.evaluate(dataset, &folds, d)))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let evaluated: Vec<(usize, DegreeEvaluation)> = degrees
            .iter()
            .map(|&d| (d, self.evaluate(dataset, &folds, d)))
            .collect();

        let evaluations: BTreeMap<usize, DegreeEvaluation> = evaluated.into_iter().collect();

        let Some((min_degree, min_score)) = lowest_score(&evaluations) else {
            let failures = evaluations
                .into_iter()
                .filter_map(|(d, e)| match e {
                    DegreeEvaluation::Failed(err) => Some((d, err)),
                    DegreeEvaluation::Scored(_) => None,
                })
                .collect();
            return Err(PolySelectError::NoViableDegree { failures });
        };

        let tolerance = evaluations
            .get(&min_degree)
            .and_then(DegreeEvaluation::result)
            .map_or(0.0, |cv| self.rule.resolve(cv));

        let (best_degree, best_score) = evaluations
            .iter()
            .filter_map(|(&d, e)| e.score().map(|s| (d, s)))
            .find(|&(_, s)| s <= min_score + tolerance)
            .unwrap_or((min_degree, min_score));

        tracing::info!(
            best_degree,
            best_score,
            min_degree,
            min_score,
            tolerance,
            n_folds = folds.n_folds(),
            "degree selected"
        );

        Ok(DegreeSearchResult {
            best_degree,
            best_score,
            min_score,
            tolerance,
            evaluations,
        })
    }
}

/// Lowest mean score; the smaller degree wins exact ties.
fn lowest_score(evaluations: &BTreeMap<usize, DegreeEvaluation>) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (&degree, evaluation) in evaluations {
        if let Some(score) = evaluation.score() {
            update_best_if_improved(score, degree, &mut best);
        }
    }
    best
}

fn update_best_if_improved(score: f64, degree: usize, best: &mut Option<(usize, f64)>) {
    if best.map_or(true, |(_, s)| score < s) {
        *best = Some((degree, score));
    }
}

/// Selects a degree with [`DegreeSelector`] defaults and the given folds and
/// seed.
///
/// # Errors
///
/// See [`DegreeSelector::select`].
pub fn select_best_degree(
    training_set: &Dataset,
    degrees: impl IntoIterator<Item = usize>,
    k: usize,
    seed: u64,
) -> Result<DegreeSearchResult> {
    DegreeSelector::new(k).with_seed(seed).select(training_set, degrees)
}
