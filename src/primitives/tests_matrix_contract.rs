// =========================================================================
// Least-squares contract for Matrix solvers.
//
// Both solvers must agree on well-conditioned systems, and the QR residual
// must be orthogonal to the column space of A (normal equations hold).
//
// References:
//   - Golub & Van Loan (2013) "Matrix Computations", §5.3
// =========================================================================

use super::*;

fn vandermonde(xs: &[f64], degree: usize) -> Matrix<f64> {
    let mut data = Vec::with_capacity(xs.len() * (degree + 1));
    for &x in xs {
        for p in 0..=degree {
            data.push(x.powi(p as i32));
        }
    }
    Matrix::from_vec(xs.len(), degree + 1, data).expect("valid")
}

/// LS-001: QR and normal equations agree on a well-conditioned system
#[test]
fn ls_001_qr_matches_normal_equations() {
    let xs: Vec<f64> = (0..12).map(|i| f64::from(i) / 4.0 - 1.5).collect();
    let a = vandermonde(&xs, 2);
    let y = Vector::from_vec(
        xs.iter()
            .map(|x| 0.5 - x + 2.0 * x * x + (x * 7.0).sin() * 0.1)
            .collect(),
    );

    let qr = a.qr_least_squares(&y).expect("full rank");
    let at = a.transpose();
    let normal = at
        .matmul(&a)
        .expect("compatible")
        .cholesky_solve(&at.matvec(&y).expect("compatible"))
        .expect("SPD");

    for i in 0..3 {
        assert!(
            (qr[i] - normal[i]).abs() < 1e-9,
            "LS-001 violated: qr[{i}]={} normal[{i}]={}",
            qr[i],
            normal[i]
        );
    }
}

/// LS-002: Residual is orthogonal to every column of A
#[test]
fn ls_002_residual_orthogonal_to_columns() {
    let xs: Vec<f64> = (0..20).map(|i| f64::from(i) * 0.1).collect();
    let a = vandermonde(&xs, 3);
    let y = Vector::from_vec(xs.iter().map(|x| (x * 3.0).cos()).collect());

    let beta = a.qr_least_squares(&y).expect("full rank");
    let fitted = a.matvec(&beta).expect("compatible");
    let residual: Vector<f64> = y.iter().zip(fitted.iter()).map(|(t, p)| t - p).collect();

    for j in 0..a.n_cols() {
        let proj = a.column(j).dot(&residual);
        assert!(proj.abs() < 1e-9, "LS-002 violated: column {j} projection = {proj}");
    }
}

mod ls_proptest {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(30))]

        /// LS-003: Exact polynomial data is recovered by QR
        #[test]
        fn ls_003_prop_exact_recovery(
            c0 in -5.0f64..5.0,
            c1 in -5.0f64..5.0,
            c2 in -5.0f64..5.0,
            n in 5..=30usize,
        ) {
            let xs: Vec<f64> = (0..n).map(|i| i as f64 / n as f64 * 4.0 - 2.0).collect();
            let a = vandermonde(&xs, 2);
            let y = Vector::from_vec(xs.iter().map(|x| c0 + c1 * x + c2 * x * x).collect());
            let beta = a.qr_least_squares(&y).expect("full rank");
            prop_assert!((beta[0] - c0).abs() < 1e-8);
            prop_assert!((beta[1] - c1).abs() < 1e-8);
            prop_assert!((beta[2] - c2).abs() < 1e-8);
        }

        /// LS-004: Transpose is an involution
        #[test]
        fn ls_004_prop_transpose_involution(
            rows in 1..=8usize,
            cols in 1..=8usize,
            seed in 0..500u32,
        ) {
            let data: Vec<f64> = (0..rows * cols)
                .map(|i| ((i as f64 + f64::from(seed)) * 0.37).sin() * 10.0)
                .collect();
            let a = Matrix::from_vec(rows, cols, data).expect("valid");
            prop_assert_eq!(a.transpose().transpose(), a);
        }
    }
}
