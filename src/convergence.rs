//! Stall-based early stopping shared by both optimizers.

/// State of a run after an observed step.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Status {
  /// Keep going.
  Running,
  /// The best value stalled for `stall_limit` consecutive steps.
  Converged,
  /// `max_iterations` steps were executed without convergence.
  Exhausted,
  /// A [`Terminator`](crate::termination::Terminator) stopped the run.
  Cancelled,
}

/// Why a run ended.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TerminationReason {
  /// See [`Status::Converged`].
  Converged,
  /// See [`Status::Exhausted`].
  Exhausted,
  /// See [`Status::Cancelled`].
  Cancelled,
}

impl TerminationReason {
  /// Lowercase name, as printed by the binary.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Converged => "converged",
      Self::Exhausted => "exhausted",
      Self::Cancelled => "cancelled",
    }
  }
}

impl std::fmt::Display for TerminationReason {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl Status {
  /// Returns the termination reason of a terminal status, `None` while
  /// running.
  pub fn termination(&self) -> Option<TerminationReason> {
    match self {
      Self::Running => None,
      Self::Converged => Some(TerminationReason::Converged),
      Self::Exhausted => Some(TerminationReason::Exhausted),
      Self::Cancelled => Some(TerminationReason::Cancelled),
    }
  }
}

/// Counts consecutive steps without meaningful improvement of the best value
/// found so far.
///
/// A step improves when the first finite best appears, or when the best
/// decreases by more than `tolerance`. Improving steps reset the stall
/// counter, other steps increment it. Once it reaches `stall_limit` the run
/// has converged. Otherwise the run is exhausted after `max_iterations`
/// steps; convergence takes precedence when both happen on the same step.
///
/// # Examples
/// ```
/// # use optibench::convergence::*;
/// let mut c = Convergence::new(f64::INFINITY, 1, 100);
/// assert_eq!(c.observe(None, Some(3.0)), Status::Running);
/// assert_eq!(c.observe(Some(3.0), Some(1.0)), Status::Converged);
/// assert_eq!(c.steps(), 2);
/// ```
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Convergence {
  tolerance: f64,
  stall_limit: usize,
  max_iterations: usize,
  stall: usize,
  steps: usize,
}

impl Convergence {
  /// Creates a tracker with no steps observed.
  pub fn new(
    tolerance: f64,
    stall_limit: usize,
    max_iterations: usize,
  ) -> Self {
    Self {
      tolerance,
      stall_limit,
      max_iterations,
      stall: 0,
      steps: 0,
    }
  }

  /// Records a step given the best-so-far values before and after it.
  pub fn observe(
    &mut self,
    before: Option<f64>,
    after: Option<f64>,
  ) -> Status {
    let improved = match (before, after) {
      (None, Some(_)) => true,
      (Some(before), Some(after)) => before - after > self.tolerance,
      _ => false,
    };
    if improved {
      self.stall = 0;
    } else {
      self.stall += 1;
    }
    self.steps += 1;
    self.status()
  }

  /// Records a step excluded from the improvement check. It only consumes
  /// the iteration budget.
  pub fn skip(&mut self) -> Status {
    self.steps += 1;
    self.status()
  }

  /// Current status.
  pub fn status(&self) -> Status {
    if self.stall >= self.stall_limit {
      Status::Converged
    } else if self.steps >= self.max_iterations {
      Status::Exhausted
    } else {
      Status::Running
    }
  }

  /// Consecutive non-improving steps.
  pub fn stall(&self) -> usize {
    self.stall
  }

  /// Steps observed so far, skipped ones included.
  pub fn steps(&self) -> usize {
    self.steps
  }
}
