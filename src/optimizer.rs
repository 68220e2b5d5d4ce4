//! Abstract optimizer and the iteration loop both engines share.

use log::{debug, info, warn};

use crate::{
  convergence::{Convergence, TerminationReason},
  counter::OperationCount,
  error::Result,
  report::{History, Incumbent, Report},
};

/// Represents an abstract optimizer.
pub trait Optimizer: Sized {
  /// Runs `Optimizer` until it converges, exhausts its iteration budget or
  /// gets cancelled, then returns the report of the run.
  fn optimize(self) -> Result<Report>;
}

/// Represents a population-based search advancing in discrete steps.
///
/// Every implementor is an [`Optimizer`]: the blanket implementation polls
/// the terminator, evaluates, updates the stall tracker and history, and then
/// either stops or advances to the next step.
pub trait IterativeOptimizer {
  /// Short name used in log records.
  fn name(&self) -> &'static str;

  /// Validates the configuration, resets the operation counter and creates
  /// the initial units. Returns the stall tracker of the run.
  fn initialize(&mut self) -> Result<Convergence>;

  /// Whether to keep the convergence series.
  fn records_history(&self) -> bool;

  /// Polled before every step. If returns `true`, the run is cancelled.
  fn terminate(&mut self, iteration: usize) -> bool;

  /// Evaluates every unit and updates the incumbent. Returns the best finite
  /// value seen during this step, `None` if there was none.
  fn evaluate(&mut self, iteration: usize) -> Result<Option<f64>>;

  /// Moves or breeds the units for the next step.
  fn advance(&mut self, iteration: usize);

  /// Best solution so far.
  fn incumbent(&self) -> &Incumbent;

  /// Objective evaluations performed so far.
  fn evaluations(&self) -> u64;

  /// Operations counted so far.
  fn operations(&self) -> OperationCount;
}

impl<I: IterativeOptimizer> Optimizer for I {
  fn optimize(mut self) -> Result<Report> {
    let mut convergence = self.initialize()?;
    let mut history = self.records_history().then(History::default);
    let mut iteration = 0;

    let termination = loop {
      if self.terminate(iteration) {
        break TerminationReason::Cancelled;
      }

      let before = self.incumbent().value();
      let step_best = self.evaluate(iteration)?;
      let after = self.incumbent().value();
      let status = match step_best {
        Some(_) => convergence.observe(before, after),
        None => {
          warn!(
            "{}: no finite value in iteration {iteration}, keeping {:?}",
            self.name(),
            before
          );
          convergence.skip()
        }
      };

      let best = after.unwrap_or(f64::INFINITY);
      if let Some(history) = history.as_mut() {
        history.push(step_best.unwrap_or(best), best);
      }
      debug!(
        "{}: iteration {iteration}, best {best}, stall {}",
        self.name(),
        convergence.stall()
      );

      iteration += 1;
      match status.termination() {
        Some(reason) => break reason,
        None => self.advance(iteration - 1),
      }
    };

    info!(
      "{}: {termination} after {iteration} iterations and {} evaluations, \
       best {:?}",
      self.name(),
      self.evaluations(),
      self.incumbent().value()
    );
    Ok(self.incumbent().into_report(
      iteration,
      termination,
      self.evaluations(),
      self.operations(),
      history,
    ))
  }
}
