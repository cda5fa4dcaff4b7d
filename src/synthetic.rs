//! Seeded synthetic polynomial datasets for tests, demos and benches.

use crate::data::{Dataset, Observation};
use crate::error::{PolySelectError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draws `n` observations with `x ~ Uniform(x_range)` and
/// `y = c_0 + c_1 x + ... + c_p x^p + N(0, noise_std^2)`.
///
/// Noise comes from a Box-Muller transform over a seeded `StdRng`; the same
/// arguments always produce the same dataset.
///
/// # Errors
///
/// - [`PolySelectError::EmptyInput`] if `coefficients` is empty or `n == 0`
/// - [`PolySelectError::InvalidHyperparameter`] if the range is empty or not
///   finite, or `noise_std` is negative or not finite
///
/// # Example
///
/// ```
/// use polyselect::synthetic::polynomial_dataset;
///
/// let data = polynomial_dataset(&[1.0, 0.0, 2.0], 5, (0.0, 1.0), 0.0, 3).expect("valid");
/// for obs in data.observations() {
///     assert!((obs.y - (1.0 + 2.0 * obs.x * obs.x)).abs() < 1e-12);
/// }
/// ```
pub fn polynomial_dataset(
    coefficients: &[f64],
    n: usize,
    x_range: (f64, f64),
    noise_std: f64,
    seed: u64,
) -> Result<Dataset> {
    if coefficients.is_empty() {
        return Err(PolySelectError::empty_input("polynomial coefficients"));
    }
    if n == 0 {
        return Err(PolySelectError::empty_input("synthetic sample count"));
    }
    let (low, high) = x_range;
    if !(low.is_finite() && high.is_finite() && low < high) {
        return Err(PolySelectError::invalid_hyperparameter(
            "x_range",
            format!("({low}, {high})"),
            "finite with low < high",
        ));
    }
    if !(noise_std.is_finite() && noise_std >= 0.0) {
        return Err(PolySelectError::invalid_hyperparameter(
            "noise_std",
            noise_std,
            "finite and >= 0",
        ));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let observations = (0..n)
        .map(|_| {
            let x = rng.gen_range(low..high);
            let noise = noise_std * standard_normal(&mut rng);
            Observation::new(x, evaluate_polynomial(coefficients, x) + noise)
        })
        .collect();

    Dataset::new(observations)
}

/// Horner evaluation of `c_0 + c_1 x + ... + c_p x^p`.
#[must_use]
pub fn evaluate_polynomial(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

// Box-Muller transform
fn standard_normal(rng: &mut StdRng) -> f64 {
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen_range(0.0..1.0);
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}
