//! Polynomial regression pipeline and holdout evaluation.
//!
//! [`PolynomialRegression`] chains a [`PolynomialRecipe`] and a
//! [`LinearRegression`]: `fit` preps the recipe on the training predictor and
//! fits OLS on the baked design matrix; `predict` bakes new predictor values
//! with the stored statistics. [`run_selection`] is the end-to-end flow:
//! split, choose the degree by cross-validation on the training set, refit
//! on the full training set and score on the test set.

use crate::config::SelectionConfig;
use crate::data::{train_test_split, Dataset};
use crate::error::{PolySelectError, Result};
use crate::linear_model::{LinearRegression, Solver};
use crate::metrics;
use crate::model_selection::{DegreeSearchResult, DegreeSelector};
use crate::preprocessing::{PolynomialBasis, PolynomialRecipe, PreparedRecipe};
use crate::primitives::Vector;
use crate::traits::Estimator;
use serde::{Deserialize, Serialize};

/// OLS on a polynomial expansion of one centered predictor.
///
/// # Examples
///
/// ```
/// use polyselect::data::Dataset;
/// use polyselect::pipeline::PolynomialRegression;
///
/// // y = 1 + x^2
/// let xs = [-2.0, -1.0, 0.0, 1.0, 2.0, 3.0];
/// let ys: Vec<f64> = xs.iter().map(|x| 1.0 + x * x).collect();
/// let data = Dataset::from_columns(&xs, &ys).expect("valid");
///
/// let mut model = PolynomialRegression::new(2);
/// model.fit(&data).expect("enough distinct values");
///
/// let pred = model.predict(&[4.0]).expect("fitted");
/// assert!((pred[0] - 17.0).abs() < 1e-8);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolynomialRegression {
    recipe: PolynomialRecipe,
    solver: Solver,
    prepared: Option<PreparedRecipe>,
    model: LinearRegression,
}

impl PolynomialRegression {
    /// Raw basis, scaling on, QR solver.
    #[must_use]
    pub fn new(degree: usize) -> Self {
        Self {
            recipe: PolynomialRecipe::new(degree),
            solver: Solver::Qr,
            prepared: None,
            model: LinearRegression::new(),
        }
    }

    /// Sets the polynomial basis.
    #[must_use]
    pub fn with_basis(mut self, basis: PolynomialBasis) -> Self {
        self.recipe = self.recipe.with_basis(basis);
        self
    }

    /// Sets whether the centered predictor is scaled by its standard deviation.
    #[must_use]
    pub fn with_scaling(mut self, scale: bool) -> Self {
        self.recipe = self.recipe.with_scaling(scale);
        self
    }

    /// Sets the least-squares solver.
    #[must_use]
    pub fn with_solver(mut self, solver: Solver) -> Self {
        self.solver = solver;
        self.model = self.model.with_solver(solver);
        self
    }

    /// Polynomial degree.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.recipe.degree()
    }

    /// Returns true once `fit` has succeeded.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.prepared.is_some() && self.model.is_fitted()
    }

    /// Recipe statistics learned during `fit`.
    ///
    /// # Errors
    ///
    /// Returns [`PolySelectError::NotFitted`] before `fit`.
    pub fn prepared(&self) -> Result<&PreparedRecipe> {
        self.prepared.as_ref().ok_or(PolySelectError::NotFitted {
            component: "PolynomialRegression",
        })
    }

    /// Underlying linear model (coefficients are on the baked scale).
    #[must_use]
    pub fn linear_model(&self) -> &LinearRegression {
        &self.model
    }

    /// Preps the recipe on `data`'s predictor and fits OLS.
    ///
    /// # Errors
    ///
    /// - [`PolySelectError::InvalidDegree`] if the degree is 0 or not below
    ///   the number of distinct predictor values
    /// - [`PolySelectError::SingularMatrix`] / [`PolySelectError::NonFinite`]
    ///   from the least-squares fit
    pub fn fit(&mut self, data: &Dataset) -> Result<()> {
        self.prepared = None;
        let prepared = self.recipe.prep(&data.predictors())?;
        let design = prepared.bake(&data.predictors())?;

        let mut model = LinearRegression::new().with_solver(self.solver);
        model.fit(&design, &data.responses())?;

        self.model = model;
        self.prepared = Some(prepared);
        Ok(())
    }

    /// Predicts responses for predictor values `xs`.
    ///
    /// # Errors
    ///
    /// Returns [`PolySelectError::NotFitted`] before `fit`.
    pub fn predict(&self, xs: &[f64]) -> Result<Vector<f64>> {
        let design = self.prepared()?.bake(xs)?;
        self.model.predict(&design)
    }

    /// Scores the fitted model on `data`.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or `data` is empty.
    pub fn evaluate(&self, data: &Dataset) -> Result<HoldoutReport> {
        let predictions = self.predict(&data.predictors())?;
        let truth = data.responses();
        Ok(HoldoutReport {
            degree: self.degree(),
            rmse: metrics::rmse(&predictions, &truth)?,
            r_squared: metrics::r_squared(&predictions, &truth)?,
            n: data.len(),
        })
    }
}

/// Score of a fitted model on held-out data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoldoutReport {
    /// Degree of the evaluated model
    pub degree: usize,
    /// Root mean squared error on the held-out data
    pub rmse: f64,
    /// Coefficient of determination on the held-out data
    pub r_squared: f64,
    /// Number of held-out observations
    pub n: usize,
}

/// Fits a default [`PolynomialRegression`] on `train` and scores it on `test`.
///
/// # Errors
///
/// Propagates fit and evaluation errors.
pub fn fit_and_evaluate(train: &Dataset, test: &Dataset, degree: usize) -> Result<HoldoutReport> {
    let mut model = PolynomialRegression::new(degree);
    model.fit(train)?;
    model.evaluate(test)
}

/// Outcome of [`run_selection`].
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionReport {
    /// Cross-validation results on the training set
    pub search: DegreeSearchResult,
    /// Selected degree refitted on the training set, scored on the test set
    pub holdout: HoldoutReport,
    /// Training set size
    pub n_train: usize,
    /// Test set size
    pub n_test: usize,
}

/// Split, select the degree by k-fold CV, refit and score on the test set.
///
/// # Errors
///
/// - Configuration errors from [`SelectionConfig::validate`]
/// - Split errors from [`train_test_split`]
/// - Any request-level error from [`DegreeSelector::select`]
/// - Fit errors when refitting the selected degree
///
/// # Example
///
/// ```
/// use polyselect::config::SelectionConfig;
/// use polyselect::pipeline::run_selection;
/// use polyselect::synthetic::polynomial_dataset;
///
/// let data = polynomial_dataset(&[1.0, 0.0, -2.0], 120, (-2.0, 2.0), 0.1, 7).expect("valid");
/// let config = SelectionConfig::default().with_degrees(1..=5).with_folds(5);
///
/// let report = run_selection(&data, &config).expect("valid configuration");
/// assert_eq!(report.n_train + report.n_test, 120);
/// assert_eq!(report.holdout.degree, report.search.best_degree);
/// ```
pub fn run_selection(dataset: &Dataset, config: &SelectionConfig) -> Result<SelectionReport> {
    config.validate()?;

    let (train, test) = train_test_split(dataset, config.test_fraction, config.seed)?;
    let selector = DegreeSelector::from_config(config);
    let search = selector.select(&train, config.degrees.iter().copied())?;

    let mut model = PolynomialRegression::new(search.best_degree)
        .with_basis(config.basis)
        .with_scaling(config.scale)
        .with_solver(config.solver);
    model.fit(&train)?;
    let holdout = model.evaluate(&test)?;

    tracing::info!(
        degree = holdout.degree,
        rmse = holdout.rmse,
        r_squared = holdout.r_squared,
        n_test = holdout.n,
        "holdout evaluation"
    );

    Ok(SelectionReport {
        search,
        holdout,
        n_train: train.len(),
        n_test: test.len(),
    })
}
