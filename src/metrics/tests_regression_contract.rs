// =========================================================================
// Regression metric contract.
//
// RMSE is the fold score used by degree selection, so its basic algebra is
// pinned here: non-negative, zero iff predictions are exact, and
// symmetric in its arguments.
// =========================================================================

use super::*;

/// MR-001: R² = 1.0 for perfect predictions
#[test]
fn mr_001_r2_perfect() {
    let y = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let r2 = r_squared(&y, &y).expect("valid");
    assert!((r2 - 1.0).abs() < 1e-12, "MR-001 violated: R²={r2}");
}

/// MR-002: R² < 0 when predictions are worse than the mean
#[test]
fn mr_002_r2_negative_for_bad_predictions() {
    let y_true = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let y_pred = Vector::from_slice(&[10.0, 20.0, 30.0, 40.0, 50.0]);
    let r2 = r_squared(&y_pred, &y_true).expect("valid");
    assert!(r2 < 0.0, "MR-002 violated: R²={r2}");
}

/// MR-003: RMSE is zero for perfect predictions
#[test]
fn mr_003_rmse_zero_when_exact() {
    let y = Vector::from_slice(&[0.5, -1.5, 3.25]);
    assert_eq!(rmse(&y, &y).expect("valid"), 0.0);
}

mod mr_proptest {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        /// MR-004: RMSE >= 0 for any inputs
        #[test]
        fn mr_004_prop_rmse_non_negative(
            pairs in proptest::collection::vec((-1e3f64..1e3, -1e3f64..1e3), 1..40),
        ) {
            let (p, t): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
            let error = rmse(&Vector::from_vec(p), &Vector::from_vec(t)).expect("valid");
            prop_assert!(error >= 0.0, "MR-004 violated: rmse={}", error);
        }

        /// MR-005: RMSE is symmetric in its arguments
        #[test]
        fn mr_005_prop_rmse_symmetric(
            pairs in proptest::collection::vec((-1e3f64..1e3, -1e3f64..1e3), 1..40),
        ) {
            let (p, t): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
            let p = Vector::from_vec(p);
            let t = Vector::from_vec(t);
            let ab = rmse(&p, &t).expect("valid");
            let ba = rmse(&t, &p).expect("valid");
            prop_assert!((ab - ba).abs() < 1e-9);
        }

        /// MR-006: RMSE bounds MAE from above
        #[test]
        fn mr_006_prop_rmse_at_least_mae(
            pairs in proptest::collection::vec((-1e3f64..1e3, -1e3f64..1e3), 1..40),
        ) {
            let (p, t): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
            let p = Vector::from_vec(p);
            let t = Vector::from_vec(t);
            let r = rmse(&p, &t).expect("valid");
            let a = mae(&p, &t).expect("valid");
            prop_assert!(r + 1e-9 >= a);
        }
    }
}
