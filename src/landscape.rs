//! Reference objectives.

use std::f64::consts::{E, FRAC_PI_2};

use crate::counter::OperationCount;

/// Operations one [`w4`] call is accounted for.
pub const W4_COST: OperationCount = OperationCount::new(20, 5);

/// The W4 benchmark landscape, meant for `[-500, 500]` on both axes.
///
/// It combines a Schwefel term over the raw coordinates with a Rosenbrock
/// term over coordinates scaled to `[-2, 2]`, and adds the product of an
/// Ackley-type and a Schaffer-type term over coordinates scaled to
/// `[-50, 50]`. Highly multimodal, non-convex, finite everywhere.
///
/// # Examples
/// ```
/// # use optibench::landscape::w4;
/// assert!((w4(0.0, 0.0) + 499.0).abs() < 1e-6);
/// assert!(w4(420.97, 420.97) > 0.0);
/// ```
pub fn w4(x: f64, y: f64) -> f64 {
  let schwefel = -x * x.abs().sqrt().sin() - y * y.abs().sqrt().sin();

  let (xs, ys) = (x / 250.0, y / 250.0);
  let rosenbrock = 100.0 * (ys - xs * xs).powi(2) + (1.0 - xs).powi(2);

  let (x1, x2) = (25.0 * xs, 25.0 * ys);
  let squares = x1 * x1 + x2 * x2;
  let ackley = -500.0 * (-0.1 * (squares / 2.0).sqrt()).exp()
    - (((FRAC_PI_2 * x1).cos() + (FRAC_PI_2 * x2).cos()) / 2.0).exp()
    + E;
  let schaffer = 0.5
    - (squares.sqrt().sin().powi(2) - 0.5)
      / ((1.0 + 0.1 * squares).powi(2) + 1e-9);

  rosenbrock.hypot(schwefel) + ackley * schaffer
}

/// The convex bowl `x² + y²`, minimum `0` at the origin.
pub fn sphere(x: f64, y: f64) -> f64 {
  x * x + y * y
}
