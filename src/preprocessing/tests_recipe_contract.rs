// =========================================================================
// Recipe leakage contract.
//
// A prepared recipe is a function of the analysis predictor values alone.
// Whatever is later baked (assessment rows, test rows) cannot move the
// learned center or scale, and baking never mutates the recipe.
// =========================================================================

use super::*;
use proptest::prelude::*;

/// RC-001: baking other data leaves the learned statistics unchanged
#[test]
fn rc_001_bake_does_not_refit() {
    let prepared = PolynomialRecipe::new(2)
        .prep(&[10.0, 20.0, 30.0])
        .expect("enough distinct values");
    let before = prepared.clone();
    let design = prepared.bake(&[1e6, -1e6]).expect("prepared");
    assert_eq!(design.shape(), (2, 2));
    assert_eq!(prepared, before, "RC-001 violated: bake changed the recipe");
}

/// RC-002: centering uses analysis mean, not the mean of baked data
#[test]
fn rc_002_baked_data_not_recentered() {
    let prepared = PolynomialRecipe::new(1)
        .with_scaling(false)
        .prep(&[0.0, 2.0])
        .expect("enough distinct values");
    let design = prepared.bake(&[10.0, 12.0]).expect("prepared");
    assert_eq!(design.as_slice(), &[9.0, 11.0]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// RC-003: baking is row-wise and uses the analysis statistics only
    #[test]
    fn rc_003_prop_bake_uses_analysis_statistics_only(
        analysis in proptest::collection::vec(-100.0f64..100.0, 3..30),
        assessment in proptest::collection::vec(-1e4f64..1e4, 1..10),
    ) {
        let n = analysis.len() as f64;
        let mean = analysis.iter().sum::<f64>() / n;
        let std = (analysis.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n).sqrt();
        prop_assume!(std > 1e-6);

        let prepared = PolynomialRecipe::new(1).prep(&analysis).expect("valid");
        prop_assert!((prepared.center() - mean).abs() < 1e-9);
        prop_assert!((prepared.scale() - std).abs() < 1e-9 * (1.0 + std));

        // Analysis rows bake the same whether or not assessment rows come along
        let mut combined = analysis.clone();
        combined.extend(&assessment);
        let alone = prepared.bake(&analysis).expect("prepared");
        let together = prepared.bake(&combined).expect("prepared");
        prop_assert_eq!(alone.as_slice(), &together.as_slice()[..analysis.len()]);

        for (i, &a) in assessment.iter().enumerate() {
            let expected = (a - prepared.center()) / prepared.scale();
            let baked = together.get(analysis.len() + i, 0);
            prop_assert!((baked - expected).abs() < 1e-9 * (1.0 + expected.abs()));
        }
    }

    /// RC-004: raw and orthogonal bases span the same column space
    #[test]
    fn rc_004_prop_bases_span_same_space(degree in 1usize..5) {
        let analysis: Vec<f64> = (0..15).map(|i| f64::from(i) * 0.7 - 4.0).collect();
        let raw = PolynomialRecipe::new(degree).prep(&analysis).expect("valid");
        let ortho = PolynomialRecipe::new(degree)
            .with_basis(PolynomialBasis::Orthogonal)
            .prep(&analysis)
            .expect("valid");

        let raw_design = raw.bake(&analysis).expect("prepared").with_intercept_column();
        let ortho_design = ortho.bake(&analysis).expect("prepared");

        // Every orthogonal column is reproduced exactly by least squares on raw columns
        for j in 0..degree {
            let target = ortho_design.column(j);
            let beta = raw_design.qr_least_squares(&target).expect("full rank");
            let fitted = raw_design.matvec(&beta).expect("shape");
            for i in 0..analysis.len() {
                prop_assert!((fitted[i] - target[i]).abs() < 1e-8);
            }
        }
    }
}
