//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use polyselect::prelude::*;
//! ```

pub use crate::config::SelectionConfig;
pub use crate::data::{train_test_split, Dataset, Observation};
pub use crate::error::PolySelectError;
pub use crate::linear_model::{LinearRegression, Solver};
pub use crate::metrics::{mae, mse, r_squared, rmse};
pub use crate::model_selection::{
    cross_validate_degree, select_best_degree, CrossValidationResult, DegreeEvaluation,
    DegreeSearchResult, DegreeSelector, KFold, SelectionRule,
};
pub use crate::pipeline::{fit_and_evaluate, run_selection, HoldoutReport, PolynomialRegression};
pub use crate::preprocessing::{PolynomialBasis, PolynomialRecipe};
pub use crate::primitives::{Matrix, Vector};
pub use crate::synthetic::polynomial_dataset;
pub use crate::traits::{Estimator, Transformer};
