//! Observations, datasets and the seeded train/test split.
//!
//! A [`Dataset`] is an ordered, immutable collection of `(x, y)` pairs. All
//! randomness takes an explicit seed, so the same seed and data always give
//! the same split.

use crate::error::{PolySelectError, Result};
use crate::primitives::Vector;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// A single (predictor, response) pair, e.g. (age, wage).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Predictor value
    pub x: f64,
    /// Response value
    pub y: f64,
}

impl Observation {
    /// Creates an observation.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Ordered collection of observations.
///
/// # Examples
///
/// ```
/// use polyselect::data::Dataset;
///
/// let ds = Dataset::from_columns(&[1.0, 2.0, 2.0], &[3.0, 4.0, 5.0]).expect("equal lengths");
/// assert_eq!(ds.len(), 3);
/// assert_eq!(ds.distinct_predictor_count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    observations: Vec<Observation>,
}

impl Dataset {
    /// Creates a dataset from observations.
    ///
    /// # Errors
    ///
    /// Returns [`PolySelectError::NonFinite`] if any value is NaN or infinite.
    pub fn new(observations: Vec<Observation>) -> Result<Self> {
        if let Some(i) = observations
            .iter()
            .position(|o| !o.x.is_finite() || !o.y.is_finite())
        {
            return Err(PolySelectError::NonFinite {
                context: format!("observation {i}"),
            });
        }
        Ok(Self { observations })
    }

    /// Creates a dataset from parallel predictor and response columns.
    ///
    /// # Errors
    ///
    /// Returns an error if the columns differ in length or hold non-finite
    /// values.
    pub fn from_columns(xs: &[f64], ys: &[f64]) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(PolySelectError::dimension_mismatch(
                "response length",
                xs.len(),
                ys.len(),
            ));
        }
        Self::new(
            xs.iter()
                .zip(ys.iter())
                .map(|(&x, &y)| Observation::new(x, y))
                .collect(),
        )
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Returns true if there are no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Observations in order.
    #[must_use]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Predictor column.
    #[must_use]
    pub fn predictors(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.x).collect()
    }

    /// Response column.
    #[must_use]
    pub fn responses(&self) -> Vector<f64> {
        self.observations.iter().map(|o| o.y).collect()
    }

    /// Number of distinct predictor values.
    #[must_use]
    pub fn distinct_predictor_count(&self) -> usize {
        distinct_count(&self.predictors())
    }

    /// Returns the observations at `indices`, in the given order.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of bounds.
    #[must_use]
    pub fn subset(&self, indices: &[usize]) -> Self {
        Self {
            observations: indices.iter().map(|&i| self.observations[i]).collect(),
        }
    }
}

impl FromIterator<Observation> for Dataset {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        Self {
            observations: iter.into_iter().collect(),
        }
    }
}

/// Counts distinct values (exact equality).
pub(crate) fn distinct_count(values: &[f64]) -> usize {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();
    sorted.len()
}

/// Validates inputs for `train_test_split`, returning `(n_train, n_test)`.
fn validate_split_inputs(n_samples: usize, test_fraction: f64) -> Result<(usize, usize)> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(PolySelectError::invalid_hyperparameter(
            "test_fraction",
            test_fraction,
            "0 < test_fraction < 1",
        ));
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n_test = (n_samples as f64 * test_fraction).round() as usize;
    let n_train = n_samples.saturating_sub(n_test);

    if n_test == 0 || n_train == 0 {
        return Err(PolySelectError::EmptyInput {
            context: format!(
                "split would leave an empty set (n_train={n_train}, n_test={n_test})"
            ),
        });
    }

    Ok((n_train, n_test))
}

/// Shuffles `0..n_samples` with a seeded generator.
pub(crate) fn shuffled_indices(n_samples: usize, seed: u64) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n_samples).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);
    indices
}

/// Splits a dataset into random train and test subsets.
///
/// `round(n * test_fraction)` observations go to the test set. The split is a
/// pure function of `(dataset, test_fraction, seed)`.
///
/// # Errors
///
/// Returns an error if `test_fraction` is outside `(0, 1)` or either side of
/// the split would be empty.
///
/// # Example
///
/// ```rust
/// use polyselect::data::{train_test_split, Dataset};
///
/// let xs: Vec<f64> = (0..10).map(f64::from).collect();
/// let ds = Dataset::from_columns(&xs, &xs).expect("valid");
///
/// let (train, test) = train_test_split(&ds, 0.2, 42).expect("valid split");
/// assert_eq!(train.len(), 8);
/// assert_eq!(test.len(), 2);
/// ```
pub fn train_test_split(
    dataset: &Dataset,
    test_fraction: f64,
    seed: u64,
) -> Result<(Dataset, Dataset)> {
    let (n_train, n_test) = validate_split_inputs(dataset.len(), test_fraction)?;

    let indices = shuffled_indices(dataset.len(), seed);
    let train = dataset.subset(&indices[..n_train]);
    let test = dataset.subset(&indices[n_train..]);

    tracing::debug!(n_train, n_test, seed, "dataset split");

    Ok((train, test))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_dataset(n: usize) -> Dataset {
        (0..n)
            .map(|i| Observation::new(i as f64, 2.0 * i as f64 + 1.0))
            .collect()
    }

    #[test]
    fn test_from_columns_length_mismatch() {
        let result = Dataset::from_columns(&[1.0, 2.0], &[1.0]);
        assert!(matches!(
            result,
            Err(PolySelectError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        let result = Dataset::from_columns(&[1.0, f64::NAN], &[1.0, 2.0]);
        assert!(matches!(result, Err(PolySelectError::NonFinite { .. })));
        let result = Dataset::new(vec![Observation::new(1.0, f64::INFINITY)]);
        assert!(matches!(result, Err(PolySelectError::NonFinite { .. })));
    }

    #[test]
    fn test_columns_roundtrip() {
        let ds = Dataset::from_columns(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]).expect("valid");
        assert_eq!(ds.predictors(), vec![1.0, 2.0, 3.0]);
        assert_eq!(ds.responses().as_slice(), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_distinct_predictor_count() {
        let ds = Dataset::from_columns(&[18.0, 18.0, 25.0, 40.0, 25.0], &[1.0; 5]).expect("valid");
        assert_eq!(ds.distinct_predictor_count(), 3);
        assert_eq!(Dataset::default().distinct_predictor_count(), 0);
    }

    #[test]
    fn test_subset_preserves_order() {
        let ds = linear_dataset(5);
        let sub = ds.subset(&[4, 0, 2]);
        assert_eq!(sub.predictors(), vec![4.0, 0.0, 2.0]);
    }

    #[test]
    fn test_train_test_split_sizes() {
        let ds = linear_dataset(100);
        let (train, test) = train_test_split(&ds, 0.2, 42).expect("valid split");
        assert_eq!(train.len(), 80);
        assert_eq!(test.len(), 20);
    }

    #[test]
    fn test_train_test_split_disjoint_and_complete() {
        let ds = linear_dataset(37);
        let (train, test) = train_test_split(&ds, 0.25, 7).expect("valid split");

        let mut all: Vec<f64> = train.predictors();
        all.extend(test.predictors());
        all.sort_by(f64::total_cmp);
        assert_eq!(all, ds.predictors());
    }

    #[test]
    fn test_train_test_split_reproducibility() {
        let ds = linear_dataset(50);
        let first = train_test_split(&ds, 0.2, 42).expect("valid split");
        let second = train_test_split(&ds, 0.2, 42).expect("valid split");
        assert_eq!(first, second);
    }

    #[test]
    fn test_train_test_split_different_seeds() {
        let ds = linear_dataset(50);
        let (a, _) = train_test_split(&ds, 0.2, 1).expect("valid split");
        let (b, _) = train_test_split(&ds, 0.2, 2).expect("valid split");
        assert_ne!(a, b);
    }

    #[test]
    fn test_train_test_split_invalid_fraction() {
        let ds = linear_dataset(10);
        for bad in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
            assert!(matches!(
                train_test_split(&ds, bad, 0),
                Err(PolySelectError::InvalidHyperparameter { .. })
            ));
        }
    }

    #[test]
    fn test_train_test_split_empty_side() {
        let ds = linear_dataset(2);
        assert!(matches!(
            train_test_split(&ds, 0.1, 0),
            Err(PolySelectError::EmptyInput { .. })
        ));
    }
}
