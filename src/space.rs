//! Points and box bounds of the 2-D search space.

use rand::Rng;

use crate::error::{Error, Result};

/// Number of decision variables. Both optimizers work on the plane.
pub const DIMENSIONS: usize = 2;

/// A point of the search space, `[x, y]`.
pub type Point = [f64; DIMENSIONS];

/// A GA individual. Just coordinates, no memory of past fitness.
pub type Individual = Point;

/// A closed interval `[min, max]` of one axis.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Bound {
  /// Lower end.
  pub min: f64,
  /// Upper end.
  pub max: f64,
}

impl Bound {
  /// Creates a bound. Validity is checked when a run starts.
  pub const fn new(min: f64, max: f64) -> Self {
    Self { min, max }
  }

  /// Width of the interval.
  pub fn span(&self) -> f64 {
    self.max - self.min
  }

  /// Returns `true` if `v` lies within `[min, max]`.
  pub fn contains(&self, v: f64) -> bool {
    (self.min..=self.max).contains(&v)
  }

  /// Clamps `v` into `[min, max]`.
  pub fn clamp(&self, v: f64) -> f64 {
    v.clamp(self.min, self.max)
  }

  /// Draws a uniform sample from `[min, max)`.
  pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
    rng.gen_range(self.min..self.max)
  }

  /// Returns `false` for empty, inverted and non-finite intervals, and for
  /// intervals too wide to be sampled.
  pub fn is_valid(&self) -> bool {
    // inclusive sampling divides the width by `1 - ε`
    self.min < self.max
      && self.min.is_finite()
      && self.max.is_finite()
      && (self.span() / (1.0 - f64::EPSILON)).is_finite()
  }

  /// Rejects intervals that are not [valid](Self::is_valid).
  pub fn validate(&self, axis: usize) -> Result<()> {
    if self.is_valid() {
      Ok(())
    } else {
      Err(Error::InvalidBound {
        axis,
        min: self.min,
        max: self.max,
      })
    }
  }
}

/// One [`Bound`] per axis. Immutable for the duration of a run.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Bounds(pub [Bound; DIMENSIONS]);

impl Bounds {
  /// Creates bounds from per-axis intervals.
  pub const fn new(x: Bound, y: Bound) -> Self {
    Self([x, y])
  }

  /// The same interval on both axes.
  pub const fn square(min: f64, max: f64) -> Self {
    Self([Bound::new(min, max); DIMENSIONS])
  }

  /// Interval of axis `d`.
  pub fn axis(&self, d: usize) -> &Bound {
    &self.0[d]
  }

  /// Iterates over the per-axis intervals.
  pub fn iter(&self) -> impl Iterator<Item = &Bound> {
    self.0.iter()
  }

  /// Returns `true` if every coordinate of `p` lies within its bound.
  pub fn contains(&self, p: &Point) -> bool {
    self.iter().zip(p).all(|(b, v)| b.contains(*v))
  }

  /// Draws a uniformly distributed point.
  pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
    self.0.map(|b| b.sample(rng))
  }

  /// Validates every axis.
  pub fn validate(&self) -> Result<()> {
    self
      .iter()
      .enumerate()
      .try_for_each(|(axis, b)| b.validate(axis))
  }
}

impl Default for Bounds {
  fn default() -> Self {
    Self::square(-500.0, 500.0)
  }
}

#[cfg(test)]
mod tests {
  use rand::{rngs::StdRng, SeedableRng};

  use super::*;

  #[test]
  fn test_bound_validation() {
    assert!(Bound::new(-1.0, 1.0).validate(0).is_ok());
    assert!(Bound::new(1.0, 1.0).validate(0).is_err());
    assert!(Bound::new(2.0, 1.0).validate(0).is_err());
    assert!(Bound::new(f64::NEG_INFINITY, 1.0).validate(0).is_err());
    assert!(Bound::new(0.0, f64::NAN).validate(0).is_err());
  }

  #[test]
  fn test_overflowing_width_is_rejected() {
    assert!(Bound::new(-f64::MAX, f64::MAX).validate(0).is_err());
    assert!(Bound::new(-f64::MAX / 2.0, f64::MAX / 2.0).validate(0).is_err());
    assert!(Bound::new(-f64::MAX / 4.0, f64::MAX / 4.0).validate(0).is_ok());
    assert!(Bounds::square(-f64::MAX, f64::MAX).validate().is_err());
  }

  #[test]
  fn test_widest_valid_bound_can_be_sampled() {
    let mut rng = StdRng::seed_from_u64(3);
    let b = Bound::new(-f64::MAX / 4.0, f64::MAX / 4.0);
    for _ in 0..100 {
      assert!(b.contains(b.sample(&mut rng)));
      let v = rng.gen_range(b.min..=b.max);
      assert!(b.contains(v));
    }
  }

  #[test]
  fn test_bounds_report_failing_axis() {
    let bounds = Bounds::new(Bound::new(0.0, 1.0), Bound::new(3.0, -3.0));
    match bounds.validate() {
      Err(Error::InvalidBound { axis, .. }) => assert_eq!(axis, 1),
      other => panic!("unexpected {other:?}"),
    }
  }

  #[test]
  fn test_samples_stay_inside() {
    let mut rng = StdRng::seed_from_u64(7);
    let bounds = Bounds::new(Bound::new(-5.0, -4.0), Bound::new(10.0, 20.0));
    for _ in 0..1000 {
      assert!(bounds.contains(&bounds.sample(&mut rng)));
    }
  }

  #[test]
  fn test_clamp() {
    let b = Bound::new(-1.0, 1.0);
    assert_eq!(b.clamp(3.0), 1.0);
    assert_eq!(b.clamp(-3.0), -1.0);
    assert_eq!(b.clamp(0.5), 0.5);
  }
}
