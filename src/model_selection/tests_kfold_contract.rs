// =========================================================================
// KFold partition contract.
//
// The same fold assignment is reused for every candidate degree, so the
// partition itself has to be right: k disjoint folds covering 0..n, sizes
// within one of each other, fully determined by the seed.
// =========================================================================

use super::*;
use proptest::prelude::*;
use std::collections::HashSet;

/// KF-001: K-Fold produces exactly K folds
#[test]
fn kf_001_produces_k_folds() {
    let folds = KFold::new(5).split(100).expect("valid k");
    assert_eq!(folds.n_folds(), 5, "KF-001 violated");
    assert_eq!(folds.n_samples(), 100);
}

/// KF-002: Every sample appears in exactly one assessment fold
#[test]
fn kf_002_every_sample_in_one_fold() {
    let folds = KFold::new(5).with_seed(3).split(20).expect("valid k");

    let mut counts = vec![0usize; 20];
    for fold in 0..folds.n_folds() {
        for &idx in folds.assessment_indices(fold) {
            counts[idx] += 1;
            assert_eq!(folds.fold_of(idx), fold);
        }
    }
    for (i, &count) in counts.iter().enumerate() {
        assert_eq!(count, 1, "KF-002 violated: sample {i} in {count} folds");
    }
}

/// KF-003: Analysis and assessment are disjoint and cover all samples
#[test]
fn kf_003_analysis_assessment_partition() {
    let n = 17;
    let folds = KFold::new(4).split(n).expect("valid k");

    for (fold_idx, (analysis, assessment)) in folds.splits().enumerate() {
        let a: HashSet<usize> = analysis.iter().copied().collect();
        let b: HashSet<usize> = assessment.iter().copied().collect();
        assert!(a.is_disjoint(&b), "KF-003 violated: fold {fold_idx} overlaps");
        assert_eq!(a.len() + b.len(), n, "KF-003 violated: fold {fold_idx}");
    }
}

/// KF-004: Remainder goes to the first folds
#[test]
fn kf_004_remainder_distribution() {
    let folds = KFold::new(4).split(10).expect("valid k");
    let sizes: Vec<usize> = (0..4).map(|i| folds.assessment_indices(i).len()).collect();
    assert_eq!(sizes, vec![3, 3, 2, 2], "KF-004 violated");
}

/// KF-005: Leave-one-out gives singleton folds
#[test]
fn kf_005_leave_one_out() {
    let folds = KFold::new(9).split(9).expect("k == n");
    for i in 0..9 {
        assert_eq!(folds.assessment_indices(i).len(), 1, "KF-005 violated");
        assert_eq!(folds.analysis_indices(i).len(), 8);
    }
}

/// KF-006: Fold count outside 2..=n is rejected
#[test]
fn kf_006_invalid_fold_counts() {
    for (k, n) in [(0, 10), (1, 10), (11, 10), (2, 1), (2, 0)] {
        assert_eq!(
            KFold::new(k).split(n),
            Err(PolySelectError::InvalidFoldCount { k, n_samples: n }),
            "KF-006 violated for k={k}, n={n}"
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// KF-007: partition invariants hold for any valid (n, k, seed)
    #[test]
    fn kf_007_prop_partition(n in 2usize..200, k_frac in 0.0f64..1.0, seed in any::<u64>()) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let k = 2 + ((n - 2) as f64 * k_frac) as usize;
        let folds = KFold::new(k).with_seed(seed).split(n).expect("2 <= k <= n");

        let sizes: Vec<usize> = (0..k).map(|i| folds.assessment_indices(i).len()).collect();
        let max = sizes.iter().copied().max().unwrap_or(0);
        let min = sizes.iter().copied().min().unwrap_or(0);
        prop_assert!(max - min <= 1);
        prop_assert_eq!(sizes.iter().sum::<usize>(), n);

        let mut all: Vec<usize> = (0..k)
            .flat_map(|i| folds.assessment_indices(i).to_vec())
            .collect();
        all.sort_unstable();
        prop_assert_eq!(all, (0..n).collect::<Vec<_>>());
    }

    /// KF-008: the same seed gives the same assignment
    #[test]
    fn kf_008_prop_seed_determinism(n in 2usize..100, seed in any::<u64>()) {
        let a = KFold::new(2).with_seed(seed).split(n).expect("valid");
        let b = KFold::new(2).with_seed(seed).split(n).expect("valid");
        prop_assert_eq!(a, b);
    }
}
