//! Integration tests for polyselect.
//!
//! These tests verify end-to-end workflows combining multiple components.

use polyselect::prelude::*;

fn wage_like() -> Dataset {
    // Concave in age, like the classic wage data
    polynomial_dataset(&[-10.0, 6.0, -0.06], 400, (18.0, 80.0), 5.0, 2024).expect("valid")
}

#[test]
fn test_cubic_end_to_end() {
    let data =
        polynomial_dataset(&[1.0, 2.0, -1.0, 0.5], 100, (-2.0, 2.0), 0.3, 42).expect("valid");

    let result = DegreeSelector::new(10)
        .with_seed(42)
        .with_rule(SelectionRule::WithinTolerance(0.0))
        .select(&data, 1..=10)
        .expect("valid request");

    let scores = result.scores();
    assert_eq!(scores.len(), 10);

    let min = scores.values().copied().fold(f64::INFINITY, f64::min);
    assert_eq!(result.best_score, min);
    assert_eq!(scores[&result.best_degree], min);
    assert!(scores[&1] > scores[&3], "linear fit should lose to the cubic");
    assert!(result.best_degree >= 3);
}

#[test]
fn test_full_notebook_flow() {
    let data = wage_like();
    let config = SelectionConfig::default();

    let report = run_selection(&data, &config).expect("valid configuration");

    assert_eq!(report.n_train, 320);
    assert_eq!(report.n_test, 80);
    assert_eq!(report.search.scores().len(), 10);
    assert_eq!(report.holdout.degree, report.search.best_degree);
    assert_eq!(report.holdout.n, 80);
    assert!(report.holdout.rmse.is_finite() && report.holdout.rmse > 0.0);
    assert!(report.holdout.r_squared > 0.5);
}

#[test]
fn test_run_selection_is_reproducible() {
    let data = wage_like();
    let config = SelectionConfig::default().with_degrees(1..=6).with_folds(5);
    let a = run_selection(&data, &config).expect("valid configuration");
    let b = run_selection(&data, &config).expect("valid configuration");
    assert_eq!(a, b);

    let c = run_selection(&data, &config.clone().with_seed(7)).expect("valid configuration");
    assert_ne!(a.search.scores(), c.search.scores());
}

#[test]
fn test_manual_flow_matches_pipeline() {
    let data = wage_like();
    let config = SelectionConfig::default().with_degrees(1..=4).with_folds(5).with_seed(3);

    let (train, test) = train_test_split(&data, config.test_fraction, config.seed).expect("split");
    let search = select_best_degree(&train, 1..=4, 5, 3).expect("valid request");
    let holdout = fit_and_evaluate(&train, &test, search.best_degree).expect("fit");

    let report = run_selection(&data, &config).expect("valid configuration");
    assert_eq!(report.search, search);
    assert_eq!(report.holdout, holdout);
}

#[test]
fn test_orthogonal_config_matches_raw_selection() {
    let data = wage_like();
    let raw = run_selection(&data, &SelectionConfig::default().with_degrees(1..=5)).expect("raw");
    let ortho = run_selection(
        &data,
        &SelectionConfig::default()
            .with_degrees(1..=5)
            .with_basis(PolynomialBasis::Orthogonal),
    )
    .expect("orthogonal");

    assert_eq!(raw.search.best_degree, ortho.search.best_degree);
    assert!((raw.holdout.rmse - ortho.holdout.rmse).abs() < 1e-6);
}

#[test]
fn test_config_from_json_drives_run() {
    let config = SelectionConfig::from_json(
        r#"{
            "degrees": [1, 2, 3],
            "folds": 4,
            "seed": 11,
            "test_fraction": 0.25,
            "rule": {"percent_loss": 1.0}
        }"#,
    )
    .expect("valid json");

    let report = run_selection(&wage_like(), &config).expect("valid configuration");
    assert_eq!(report.n_test, 100);
    assert_eq!(report.search.evaluations.len(), 3);
    assert!(report.search.best_score <= report.search.min_score * 1.01 + 1e-12);
}

#[test]
fn test_leave_one_out_on_small_data() {
    let data = polynomial_dataset(&[2.0, -1.0], 12, (0.0, 3.0), 0.1, 8).expect("valid");
    let result = select_best_degree(&data, 1..=2, data.len(), 8).expect("valid request");
    for degree in [1, 2] {
        let cv = result.evaluations[&degree].result().expect("scored");
        assert_eq!(cv.folds.len(), 12);
        assert!(cv.folds.iter().all(|f| f.n_assessment == 1));
    }
}

#[test]
fn test_fold_centering_uses_analysis_data_only() {
    let data = wage_like();
    let folds = KFold::new(5).with_seed(1).split(data.len()).expect("valid k");
    let model = PolynomialRegression::new(2).with_basis(PolynomialBasis::Orthogonal);
    let baseline = cross_validate_degree(&model, &data, &folds).expect("well-posed");

    for (fold, (analysis, assessment)) in folds.splits().enumerate() {
        let analysis_x = data.subset(&analysis).predictors();
        let expected = analysis_x.iter().sum::<f64>() / analysis_x.len() as f64;
        assert!((baseline.folds[fold].center - expected).abs() < 1e-9);

        // Moving this fold's held-out ages far away must not move its center
        let mut xs = data.predictors();
        for &i in assessment {
            xs[i] += 1000.0;
        }
        let shifted = Dataset::from_columns(&xs, data.responses().as_slice()).expect("finite");
        let rerun = cross_validate_degree(&model, &shifted, &folds).expect("well-posed");
        assert_eq!(rerun.folds[fold].center, baseline.folds[fold].center);
        assert_eq!(rerun.folds[fold].scale, baseline.folds[fold].scale);
    }
}

#[test]
fn test_request_errors_before_computation() {
    let data = wage_like();
    assert!(matches!(
        select_best_degree(&data, 1..=3, 0, 0),
        Err(PolySelectError::InvalidFoldCount { k: 0, .. })
    ));
    assert!(matches!(
        select_best_degree(&data, [0], 10, 0),
        Err(PolySelectError::InvalidDegree { degree: 0, .. })
    ));
}

#[test]
fn test_error_messages_name_the_failure() {
    let err = select_best_degree(&wage_like(), 1..=2, 1000, 0).expect_err("k > n");
    assert!(err.to_string().contains("Invalid fold count"));

    let discrete: Dataset = (0..20).map(|i| Observation::new(f64::from(i % 2), 1.0)).collect();
    let err = select_best_degree(&discrete, [2, 3], 4, 0).expect_err("no degree fits");
    let msg = err.to_string();
    assert!(msg.contains("No viable degree"));
    assert!(msg.contains("degree 2"));
    assert!(msg.contains("Invalid degree 3"));
}
