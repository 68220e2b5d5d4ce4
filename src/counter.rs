//! Arithmetic operation accounting.
//!
//! Counting is instrumentation only: the optimizers behave identically with
//! or without a counter attached. The default counter is `()`, which ignores
//! everything.

use std::ops::{Add, AddAssign};

/// A tally of multiplications and divisions.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct OperationCount {
  /// Number of multiplications.
  pub multiplications: u64,
  /// Number of divisions.
  pub divisions: u64,
}

impl OperationCount {
  /// No operations at all.
  pub const NONE: Self = Self::new(0, 0);

  /// Creates a tally.
  pub const fn new(multiplications: u64, divisions: u64) -> Self {
    Self {
      multiplications,
      divisions,
    }
  }
}

impl Add for OperationCount {
  type Output = Self;

  fn add(self, rhs: Self) -> Self::Output {
    Self::new(
      self.multiplications + rhs.multiplications,
      self.divisions + rhs.divisions,
    )
  }
}

impl AddAssign for OperationCount {
  fn add_assign(&mut self, rhs: Self) {
    *self = *self + rhs;
  }
}

/// A side channel receiving the arithmetic performed by a run.
///
/// Optimizers reset the counter when a run starts, then report objective
/// evaluation costs, inertia weight computations and blend crossover
/// interval widths through it.
///
/// # Examples
/// ```
/// # use optibench::counter::*;
/// let mut count = OperationCount::default();
/// count.add_multiplications(3);
/// count.add_divisions(1);
/// assert_eq!(count.count(), OperationCount::new(3, 1));
/// ```
pub trait OperationCounter {
  /// Adds `n` multiplications.
  fn add_multiplications(&mut self, n: u64);

  /// Adds `n` divisions.
  fn add_divisions(&mut self, n: u64);

  /// Zeroes the tally.
  fn reset(&mut self);

  /// Returns the current tally. Counters that do not keep one return
  /// [`OperationCount::NONE`].
  fn count(&self) -> OperationCount {
    OperationCount::NONE
  }

  /// Adds a whole tally at once.
  fn record(&mut self, ops: OperationCount) {
    if ops.multiplications > 0 {
      self.add_multiplications(ops.multiplications);
    }
    if ops.divisions > 0 {
      self.add_divisions(ops.divisions);
    }
  }
}

/// Discards everything.
impl OperationCounter for () {
  fn add_multiplications(&mut self, _: u64) {}

  fn add_divisions(&mut self, _: u64) {}

  fn reset(&mut self) {}
}

impl OperationCounter for OperationCount {
  fn add_multiplications(&mut self, n: u64) {
    self.multiplications += n;
  }

  fn add_divisions(&mut self, n: u64) {
    self.divisions += n;
  }

  fn reset(&mut self) {
    *self = Self::NONE;
  }

  fn count(&self) -> OperationCount {
    *self
  }
}

impl<C: OperationCounter + ?Sized> OperationCounter for &mut C {
  fn add_multiplications(&mut self, n: u64) {
    (**self).add_multiplications(n)
  }

  fn add_divisions(&mut self, n: u64) {
    (**self).add_divisions(n)
  }

  fn reset(&mut self) {
    (**self).reset()
  }

  fn count(&self) -> OperationCount {
    (**self).count()
  }
}
