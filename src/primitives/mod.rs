//! Core compute primitives (Vector, Matrix).
//!
//! Dense row-major containers plus the handful of linear-algebra routines
//! ordinary least squares needs.

mod matrix;
mod vector;

pub use matrix::Matrix;
pub use vector::Vector;
