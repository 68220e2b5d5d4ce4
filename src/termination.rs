//! External termination checkpoint.
//!
//! A run normally ends by convergence or by exhausting its iteration budget.
//! A [`Terminator`] lets the caller end it earlier: it is polled once at the
//! top of every iteration, before any particle or individual is evaluated,
//! so an iteration is either executed completely or not at all.

use std::sync::atomic::{AtomicBool, Ordering};

/// Decides whether a run should stop before the given iteration starts.
///
/// # Examples
/// ```
/// # use optibench::termination::Terminator;
/// // stop before the 10th iteration
/// let mut t = |iteration: usize| iteration >= 10;
/// assert!(!t.terminate(9));
/// assert!(t.terminate(10));
/// ```
///
/// **Note that you always can implement this trait instead of using closures.**
pub trait Terminator {
  /// If returns `true`, the run ends with
  /// [`TerminationReason::Cancelled`](crate::convergence::TerminationReason).
  /// `iteration` is the 0-based index of the iteration about to start.
  fn terminate(&mut self, iteration: usize) -> bool;
}

impl<F> Terminator for F
where
  F: FnMut(usize) -> bool,
{
  fn terminate(&mut self, iteration: usize) -> bool {
    self(iteration)
  }
}

/// Stops the run once the flag is raised, possibly from another thread.
///
/// # Examples
/// ```
/// # use std::sync::atomic::{AtomicBool, Ordering};
/// # use optibench::termination::*;
/// let cancelled = AtomicBool::new(false);
/// let mut t = Flag(&cancelled);
/// assert!(!t.terminate(0));
/// cancelled.store(true, Ordering::Relaxed);
/// assert!(t.terminate(1));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Flag<'a>(pub &'a AtomicBool);

impl Terminator for Flag<'_> {
  fn terminate(&mut self, _: usize) -> bool {
    self.0.load(Ordering::Relaxed)
  }
}

/// A `Terminator` that never stops the run. The default.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Never;

impl Terminator for Never {
  fn terminate(&mut self, _: usize) -> bool {
    false
  }
}
