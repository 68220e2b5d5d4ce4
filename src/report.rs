//! Result record of a run.

use crate::{
  convergence::TerminationReason,
  counter::OperationCount,
  space::Point,
};

/// A point together with its objective value.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Solution {
  /// Where.
  pub position: Point,
  /// How good. Always finite.
  pub value: f64,
}

/// Per-step convergence series, one entry per executed iteration.
///
/// `f64::INFINITY` stands for "nothing found yet".
#[derive(Clone, PartialEq, Debug, Default)]
pub struct History {
  /// Best value observed during each step.
  pub step_best: Vec<f64>,
  /// Best value found up to and including each step.
  pub best_so_far: Vec<f64>,
}

impl History {
  /// Appends one step.
  pub fn push(&mut self, step_best: f64, best_so_far: f64) {
    self.step_best.push(step_best);
    self.best_so_far.push(best_so_far);
  }

  /// Number of recorded steps.
  pub fn len(&self) -> usize {
    self.best_so_far.len()
  }

  /// Returns `true` if no step was recorded.
  pub fn is_empty(&self) -> bool {
    self.best_so_far.is_empty()
  }
}

/// What a finished run hands back to the caller.
///
/// Both termination reasons share the same shape; only `termination` tells
/// them apart.
#[derive(Clone, PartialEq, Debug)]
pub struct Report {
  /// Best solution of the run. `None` if the objective never returned a
  /// finite value.
  pub best: Option<Solution>,
  /// Number of executed iterations or generations.
  pub iterations: usize,
  /// Why the run ended.
  pub termination: TerminationReason,
  /// Objective evaluations performed.
  pub evaluations: u64,
  /// Operations reported to the counter during the run.
  pub operations: OperationCount,
  /// Evaluations performed when the best was last improved.
  pub evaluations_at_best: u64,
  /// Operations counted when the best was last improved.
  pub operations_at_best: OperationCount,
  /// 0-based iteration in which the best was last improved.
  pub best_iteration: Option<usize>,
  /// Convergence series, when requested by the configuration.
  pub history: Option<History>,
}

impl Report {
  /// Best value, or `f64::INFINITY` if nothing was found.
  pub fn best_value(&self) -> f64 {
    self.best.map_or(f64::INFINITY, |s| s.value)
  }

  /// Position of the best value, if any.
  pub fn best_position(&self) -> Option<Point> {
    self.best.map(|s| s.position)
  }
}

/// The best solution found so far, along with the bookkeeping taken when it
/// was found.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Incumbent {
  best: Option<Solution>,
  evaluations: u64,
  operations: OperationCount,
  iteration: Option<usize>,
}

impl Incumbent {
  /// Replaces the incumbent if `value` is finite and strictly lower.
  /// Returns `true` on replacement.
  pub fn offer(
    &mut self,
    position: Point,
    value: f64,
    iteration: usize,
    evaluations: u64,
    operations: OperationCount,
  ) -> bool {
    if !value.is_finite() || self.value().is_some_and(|best| value >= best) {
      return false;
    }
    *self = Self {
      best: Some(Solution { position, value }),
      evaluations,
      operations,
      iteration: Some(iteration),
    };
    true
  }

  /// Best solution so far.
  pub fn best(&self) -> Option<&Solution> {
    self.best.as_ref()
  }

  /// Best value so far.
  pub fn value(&self) -> Option<f64> {
    self.best.map(|s| s.value)
  }

  /// Position of the best value so far.
  pub fn position(&self) -> Option<Point> {
    self.best.map(|s| s.position)
  }

  pub(crate) fn into_report(
    self,
    iterations: usize,
    termination: TerminationReason,
    evaluations: u64,
    operations: OperationCount,
    history: Option<History>,
  ) -> Report {
    Report {
      best: self.best,
      iterations,
      termination,
      evaluations,
      operations,
      evaluations_at_best: self.evaluations,
      operations_at_best: self.operations,
      best_iteration: self.iteration,
      history,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_incumbent_requires_strict_improvement() {
    let mut inc = Incumbent::default();
    assert!(inc.offer([1.0, 1.0], 5.0, 0, 1, OperationCount::new(20, 5)));
    assert!(!inc.offer([2.0, 2.0], 5.0, 1, 2, OperationCount::NONE));
    assert_eq!(inc.position(), Some([1.0, 1.0]));
    assert!(inc.offer([3.0, 3.0], 4.0, 2, 3, OperationCount::NONE));
    assert_eq!(inc.value(), Some(4.0));
  }

  #[test]
  fn test_incumbent_rejects_non_finite() {
    let mut inc = Incumbent::default();
    assert!(!inc.offer([0.0, 0.0], f64::NAN, 0, 1, OperationCount::NONE));
    assert!(!inc.offer([0.0, 0.0], f64::NEG_INFINITY, 0, 2, OperationCount::NONE));
    assert_eq!(inc.best(), None);
  }

  #[test]
  fn test_report_keeps_bookkeeping_of_last_improvement() {
    let mut inc = Incumbent::default();
    inc.offer([1.0, 2.0], 3.0, 4, 60, OperationCount::new(1200, 300));
    inc.offer([9.0, 9.0], 7.0, 5, 75, OperationCount::new(1500, 375));
    let report = inc.into_report(
      9,
      TerminationReason::Converged,
      135,
      OperationCount::new(2700, 675),
      None,
    );
    assert_eq!(report.best_value(), 3.0);
    assert_eq!(report.best_position(), Some([1.0, 2.0]));
    assert_eq!(report.evaluations_at_best, 60);
    assert_eq!(report.operations_at_best, OperationCount::new(1200, 300));
    assert_eq!(report.best_iteration, Some(4));
    assert_eq!(report.evaluations, 135);
  }

  #[test]
  fn test_empty_report_value_is_infinite() {
    let report = Incumbent::default().into_report(
      0,
      TerminationReason::Cancelled,
      0,
      OperationCount::NONE,
      Some(History::default()),
    );
    assert_eq!(report.best_value(), f64::INFINITY);
    assert!(report.history.is_some_and(|h| h.is_empty()));
  }
}
