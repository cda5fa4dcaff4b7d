//! Degree selection on a synthetic age/wage dataset.
//!
//! Run with `RUST_LOG=polyselect=debug cargo run --example wage_selection`
//! to see per-fold scores.

use polyselect::prelude::*;

fn main() -> Result<(), PolySelectError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("polyselect=info")),
        )
        .init();

    // wage = -10 + 6 age - 0.06 age^2 + noise
    let data = polynomial_dataset(&[-10.0, 6.0, -0.06], 3000, (18.0, 80.0), 25.0, 2024)?;

    let config = SelectionConfig::default().with_rule(SelectionRule::OneStandardError);
    println!("config:\n{}", config.to_json()?);

    let report = run_selection(&data, &config)?;

    println!("degree  mean rmse  std error");
    for (degree, evaluation) in &report.search.evaluations {
        match evaluation {
            DegreeEvaluation::Scored(cv) => {
                println!("{degree:>6}  {:>9.4}  {:>9.4}", cv.mean(), cv.std_error());
            }
            DegreeEvaluation::Failed(err) => println!("{degree:>6}  failed: {err}"),
        }
    }

    println!(
        "selected degree {} (cv rmse {:.4}, tolerance {:.4})",
        report.search.best_degree, report.search.best_score, report.search.tolerance
    );
    println!(
        "test rmse {:.4}, R² {:.4} on {} held-out observations",
        report.holdout.rmse, report.holdout.r_squared, report.holdout.n
    );

    Ok(())
}
