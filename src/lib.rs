//! Polyselect: polynomial regression degree selection by k-fold cross-validation.
//!
//! Given `(x, y)` observations and a range of candidate degrees, polyselect
//! estimates each degree's out-of-sample rmse with k-fold cross-validation,
//! picks the simplest degree within a tolerance of the best, then refits and
//! scores it on a held-out test set.
//!
//! # Quick Start
//!
//! ```
//! use polyselect::prelude::*;
//!
//! // 100 points from a cubic plus noise
//! let data = polynomial_dataset(&[1.0, 2.0, -1.0, 0.5], 100, (-2.0, 2.0), 0.3, 42)
//!     .expect("valid generator arguments");
//!
//! let (train, test) = train_test_split(&data, 0.2, 42).expect("valid split");
//!
//! let search = select_best_degree(&train, 1..=10, 10, 42).expect("valid request");
//! assert_eq!(search.best_score, search.min_score);
//!
//! let report = fit_and_evaluate(&train, &test, search.best_degree).expect("fit");
//! assert!(report.rmse >= 0.0);
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Core Vector and Matrix types with least-squares solvers
//! - [`data`]: Observations, datasets and the seeded train/test split
//! - [`preprocessing`]: Centering, scaling and polynomial bases
//! - [`linear_model`]: Ordinary least squares
//! - [`metrics`]: Regression metrics (rmse, mse, mae, R²)
//! - [`model_selection`]: K-fold cross-validation and degree search
//! - [`pipeline`]: Polynomial regression model and holdout evaluation
//! - [`synthetic`]: Seeded polynomial-plus-noise datasets
//! - [`config`]: Serializable run configuration
//!
//! # Features
//!
//! - `parallel`: evaluate candidate degrees on the rayon thread pool. Results
//!   are identical with and without it.

pub mod config;
pub mod data;
pub mod error;
pub mod linear_model;
pub mod metrics;
pub mod model_selection;
pub mod pipeline;
pub mod prelude;
pub mod preprocessing;
pub mod primitives;
pub mod synthetic;
pub mod traits;

pub use error::{PolySelectError, Result};
pub use primitives::{Matrix, Vector};
pub use traits::{Estimator, Transformer};
