//! The objective function consumed by both optimizers.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::{
  counter::OperationCount,
  error::{BoxError, Error, Result},
};

/// A function of two reals to be minimized.
///
/// It must be deterministic for a fixed input and free of side effects that
/// the optimizer could observe. Non-finite values are allowed and are never
/// accepted as an improvement. An `Err` stops the run and is handed back to
/// the caller.
///
/// # Examples
/// ```
/// # use optibench::objective::*;
/// let bowl = |x: f64, y: f64| x * x + y * y;
/// assert_eq!(bowl.evaluate(3.0, 4.0).unwrap(), 25.0);
/// ```
///
/// **Note that you always can implement this trait instead of using closures.**
pub trait Objective {
  /// Returns the objective value at `(x, y)`.
  fn evaluate(&self, x: f64, y: f64) -> Result<f64>;

  /// Arithmetic performed by one call, reported to the operation counter.
  fn cost(&self) -> OperationCount {
    OperationCount::NONE
  }
}

impl<F> Objective for F
where
  F: Fn(f64, f64) -> f64,
{
  fn evaluate(&self, x: f64, y: f64) -> Result<f64> {
    Ok(self(x, y))
  }
}

/// Adapts a fallible closure into an [`Objective`].
///
/// # Examples
/// ```
/// # use optibench::objective::*;
/// let log = Fallible(|x: f64, y: f64| {
///   if x + y > 0.0 { Ok((x + y).ln()) } else { Err("log of non-positive") }
/// });
/// assert!(log.evaluate(1.0, 0.0).is_ok());
/// assert!(log.evaluate(-1.0, 0.0).is_err());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Fallible<F>(pub F);

impl<F, E> Objective for Fallible<F>
where
  F: Fn(f64, f64) -> std::result::Result<f64, E>,
  E: Into<BoxError>,
{
  fn evaluate(&self, x: f64, y: f64) -> Result<f64> {
    (self.0)(x, y).map_err(|e| Error::Objective {
      x,
      y,
      source: e.into(),
    })
  }
}

/// Counts invocations of the wrapped objective and declares its per-call
/// arithmetic cost.
///
/// The call count is atomic, so one wrapper can be shared by runs executing
/// on different threads.
///
/// # Examples
/// ```
/// # use optibench::{objective::*, counter::OperationCount};
/// let f = Counted::new(|x: f64, y: f64| x - y).with_cost(2, 1);
/// f.evaluate(1.0, 1.0).unwrap();
/// f.evaluate(2.0, 1.0).unwrap();
/// assert_eq!(f.call_count(), 2);
/// assert_eq!(f.cost(), OperationCount::new(2, 1));
/// ```
#[derive(Debug)]
pub struct Counted<O> {
  objective: O,
  calls: AtomicU64,
  cost: OperationCount,
}

impl<O> Counted<O> {
  /// Wraps `objective` with a zero per-call cost.
  pub fn new(objective: O) -> Self {
    Self {
      objective,
      calls: AtomicU64::new(0),
      cost: OperationCount::NONE,
    }
  }

  /// Sets the number of multiplications and divisions one call performs.
  pub fn with_cost(mut self, multiplications: u64, divisions: u64) -> Self {
    self.cost = OperationCount::new(multiplications, divisions);
    self
  }

  /// Number of calls so far.
  pub fn call_count(&self) -> u64 {
    self.calls.load(Ordering::Relaxed)
  }

  /// Zeroes the call count.
  pub fn reset(&self) {
    self.calls.store(0, Ordering::Relaxed);
  }

  /// Returns the wrapped objective.
  pub fn into_inner(self) -> O {
    self.objective
  }
}

impl<O: Objective> Objective for Counted<O> {
  fn evaluate(&self, x: f64, y: f64) -> Result<f64> {
    self.calls.fetch_add(1, Ordering::Relaxed);
    self.objective.evaluate(x, y)
  }

  fn cost(&self) -> OperationCount {
    self.cost + self.objective.cost()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn as_objective<O: Objective>(_: &O) {}

  #[test]
  fn test_objective_from_closure() {
    let o = |x: f64, y: f64| x * y;
    as_objective(&o);
    assert_eq!(o.evaluate(2.0, 3.0).unwrap(), 6.0);
    assert_eq!(o.cost(), OperationCount::NONE);
  }

  #[test]
  fn test_objective_from_fn() {
    fn plane(x: f64, y: f64) -> f64 {
      x + y
    }
    as_objective(&plane);
    assert_eq!(plane.evaluate(2.0, 3.0).unwrap(), 5.0);
  }

  #[test]
  fn test_fallible_objective_reports_point() {
    let o = Fallible(|x: f64, _: f64| {
      if x < 0.0 {
        Err(std::io::Error::other("negative"))
      } else {
        Ok(x)
      }
    });
    assert_eq!(o.evaluate(1.0, 0.0).unwrap(), 1.0);
    match o.evaluate(-2.0, 5.0) {
      Err(Error::Objective { x, y, source }) => {
        assert_eq!((x, y), (-2.0, 5.0));
        assert_eq!(source.to_string(), "negative");
      }
      other => panic!("unexpected {other:?}"),
    }
  }

  #[test]
  fn test_counted_objective() {
    let o = Counted::new(|x: f64, y: f64| x + y).with_cost(20, 5);
    for i in 0..7 {
      o.evaluate(i as f64, 0.0).unwrap();
    }
    assert_eq!(o.call_count(), 7);
    assert_eq!(o.cost(), OperationCount::new(20, 5));
    o.reset();
    assert_eq!(o.call_count(), 0);
    let inner = o.into_inner();
    assert_eq!(inner(1.0, 2.0), 3.0);
  }

  #[test]
  fn test_nested_counters_add_costs() {
    let o = Counted::new(Counted::new(|x: f64, _: f64| x).with_cost(1, 1))
      .with_cost(2, 0);
    assert_eq!(o.cost(), OperationCount::new(3, 1));
  }
}
