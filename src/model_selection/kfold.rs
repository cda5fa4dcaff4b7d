//! Seeded k-fold partitioning.

use crate::data::shuffled_indices;
use crate::error::{PolySelectError, Result};
use serde::{Deserialize, Serialize};

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 42;

/// K-Fold cross-validator.
///
/// Shuffles `0..n` with a seeded generator and cuts the permutation into
/// `k` consecutive folds. The first `n % k` folds get one extra element, so
/// fold sizes differ by at most one.
///
/// # Example
///
/// ```rust
/// use polyselect::model_selection::KFold;
///
/// let folds = KFold::new(5).with_seed(7).split(12).expect("2 <= k <= n");
///
/// assert_eq!(folds.n_folds(), 5);
/// assert_eq!(folds.assessment_indices(0).len(), 3);
/// assert_eq!(folds.assessment_indices(4).len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KFold {
    n_splits: usize,
    seed: u64,
}

impl KFold {
    /// Create a new K-Fold cross-validator with [`DEFAULT_SEED`].
    ///
    /// `n_splits` is checked against the sample count in [`KFold::split`].
    #[must_use]
    pub fn new(n_splits: usize) -> Self {
        Self {
            n_splits,
            seed: DEFAULT_SEED,
        }
    }

    /// Set the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of folds.
    #[must_use]
    pub fn n_splits(&self) -> usize {
        self.n_splits
    }

    /// Assigns each of `n_samples` indices to exactly one fold.
    ///
    /// # Errors
    ///
    /// Returns [`PolySelectError::InvalidFoldCount`] unless
    /// `2 <= n_splits <= n_samples`.
    pub fn split(&self, n_samples: usize) -> Result<FoldAssignment> {
        if self.n_splits < 2 || self.n_splits > n_samples {
            return Err(PolySelectError::InvalidFoldCount {
                k: self.n_splits,
                n_samples,
            });
        }

        let indices = shuffled_indices(n_samples, self.seed);

        let fold_size = n_samples / self.n_splits;
        let remainder = n_samples % self.n_splits;

        let mut folds = Vec::with_capacity(self.n_splits);
        let mut fold_of = vec![0; n_samples];
        let mut start = 0;

        for i in 0..self.n_splits {
            let current_fold_size = if i < remainder {
                fold_size + 1
            } else {
                fold_size
            };
            let end = start + current_fold_size;

            let members = indices[start..end].to_vec();
            for &idx in &members {
                fold_of[idx] = i;
            }
            folds.push(members);

            start = end;
        }

        Ok(FoldAssignment { folds, fold_of })
    }
}

/// Partition of `0..n` into disjoint folds.
///
/// Computed once per cross-validation run and shared by every degree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldAssignment {
    /// Assessment indices per fold, in shuffled order
    folds: Vec<Vec<usize>>,
    /// Fold of each sample index
    fold_of: Vec<usize>,
}

impl FoldAssignment {
    /// Number of folds.
    #[must_use]
    pub fn n_folds(&self) -> usize {
        self.folds.len()
    }

    /// Number of partitioned samples.
    #[must_use]
    pub fn n_samples(&self) -> usize {
        self.fold_of.len()
    }

    /// Fold holding sample `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= n_samples()`.
    #[must_use]
    pub fn fold_of(&self, index: usize) -> usize {
        self.fold_of[index]
    }

    /// Held-out indices of fold `fold`.
    ///
    /// # Panics
    ///
    /// Panics if `fold >= n_folds()`.
    #[must_use]
    pub fn assessment_indices(&self, fold: usize) -> &[usize] {
        &self.folds[fold]
    }

    /// Indices of every other fold, ascending.
    #[must_use]
    pub fn analysis_indices(&self, fold: usize) -> Vec<usize> {
        self.fold_of
            .iter()
            .enumerate()
            .filter(|&(_, &f)| f != fold)
            .map(|(i, _)| i)
            .collect()
    }

    /// `(analysis, assessment)` index pairs, one per fold.
    pub fn splits(&self) -> impl Iterator<Item = (Vec<usize>, &[usize])> + '_ {
        (0..self.n_folds()).map(move |i| (self.analysis_indices(i), self.assessment_indices(i)))
    }
}
