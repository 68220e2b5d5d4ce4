//! Particle swarm optimization.

use log::debug;
use rand::rngs::StdRng;

use crate::{
  config::{random_source, SwarmConfig},
  convergence::Convergence,
  counter::{OperationCount, OperationCounter},
  error::Result,
  objective::Objective,
  optimizer::IterativeOptimizer,
  particle::Particle,
  report::Incumbent,
  termination::{Never, Terminator},
};

/// A swarm of particles minimizing an [`Objective`].
///
/// Every iteration evaluates all particles in order, then, unless the run has
/// ended, moves each of them towards its own best and the global best. The
/// global best is replaced only on strict improvement, so ties keep the
/// earlier find.
///
/// # Examples
/// ```
/// # use optibench::{config::SwarmConfig, optimizer::Optimizer, swarm::Swarm};
/// let bowl = |x: f64, y: f64| x * x + y * y;
/// let config = SwarmConfig::builder().seed(7).build();
/// let report = Swarm::new(&bowl, config).optimize().unwrap();
/// assert!(report.best_value() < 1.0);
/// ```
#[derive(Debug)]
pub struct Swarm<'a, O: ?Sized, C = (), T = Never> {
  objective: &'a O,
  config: SwarmConfig,
  counter: C,
  terminator: T,
  rng: StdRng,
  particles: Vec<Particle>,
  incumbent: Incumbent,
  evaluations: u64,
}

impl<'a, O: Objective + ?Sized> Swarm<'a, O> {
  /// Creates a swarm with no operation counter and no terminator. Particles
  /// are created when the run starts.
  pub fn new(objective: &'a O, config: SwarmConfig) -> Self {
    Self {
      objective,
      rng: random_source(config.seed),
      config,
      counter: (),
      terminator: Never,
      particles: Vec::new(),
      incumbent: Incumbent::default(),
      evaluations: 0,
    }
  }
}

impl<'a, O: ?Sized, C, T> Swarm<'a, O, C, T> {
  /// Reports the run's arithmetic to `counter`. Pass `&mut counter` to keep
  /// ownership of it.
  pub fn counter<D: OperationCounter>(self, counter: D) -> Swarm<'a, O, D, T> {
    Swarm {
      objective: self.objective,
      config: self.config,
      counter,
      terminator: self.terminator,
      rng: self.rng,
      particles: self.particles,
      incumbent: self.incumbent,
      evaluations: self.evaluations,
    }
  }

  /// Polls `terminator` before every iteration.
  pub fn terminator<U: Terminator>(self, terminator: U) -> Swarm<'a, O, C, U> {
    Swarm {
      objective: self.objective,
      config: self.config,
      counter: self.counter,
      terminator,
      rng: self.rng,
      particles: self.particles,
      incumbent: self.incumbent,
      evaluations: self.evaluations,
    }
  }

  /// Configuration of the run.
  pub fn config(&self) -> &SwarmConfig {
    &self.config
  }

  /// Current particles.
  pub fn particles(&self) -> &[Particle] {
    &self.particles
  }
}

impl<O, C, T> IterativeOptimizer for Swarm<'_, O, C, T>
where
  O: Objective + ?Sized,
  C: OperationCounter,
  T: Terminator,
{
  fn name(&self) -> &'static str {
    "pso"
  }

  fn initialize(&mut self) -> Result<Convergence> {
    self.config.validate()?;
    self.counter.reset();
    let Self {
      config,
      rng,
      particles,
      ..
    } = self;
    *particles = (0..config.particle_count)
      .map(|_| Particle::random(&config.bounds, &config.velocity, rng))
      .collect();
    self.incumbent = Incumbent::default();
    self.evaluations = 0;
    debug!(
      "pso: {} particles, {} iterations",
      self.config.particle_count, self.config.max_iterations
    );
    Ok(self.config.convergence())
  }

  fn records_history(&self) -> bool {
    self.config.record_history
  }

  fn terminate(&mut self, iteration: usize) -> bool {
    self.terminator.terminate(iteration)
  }

  fn evaluate(&mut self, iteration: usize) -> Result<Option<f64>> {
    let mut step_best: Option<f64> = None;
    for particle in &mut self.particles {
      let value = particle.evaluate(self.objective)?;
      self.evaluations += 1;
      self.counter.record(self.objective.cost());
      if value.is_finite() {
        step_best = Some(step_best.map_or(value, |best| best.min(value)));
      }
      self.incumbent.offer(
        particle.position,
        value,
        iteration,
        self.evaluations,
        self.counter.count(),
      );
    }
    Ok(step_best)
  }

  fn advance(&mut self, iteration: usize) {
    let global_best = self.incumbent.position();
    let coefficients = self.config.coefficients();
    for particle in &mut self.particles {
      // without any finite value yet, the only pull is the particle's own
      let target = global_best.unwrap_or(particle.best_position);
      particle.update_velocity(
        &target,
        iteration,
        self.config.max_iterations,
        &coefficients,
        &mut self.rng,
        &mut self.counter,
      );
      particle.update_position(&self.config.bounds, self.config.walls);
    }
  }

  fn incumbent(&self) -> &Incumbent {
    &self.incumbent
  }

  fn evaluations(&self) -> u64 {
    self.evaluations
  }

  fn operations(&self) -> OperationCount {
    self.counter.count()
  }
}

#[cfg(test)]
mod tests {
  use std::{
    cell::{Cell, RefCell},
    sync::atomic::{AtomicBool, Ordering},
  };

  use rand::SeedableRng;
  use rand_distr::{Distribution, Normal};

  use super::*;
  use crate::{
    config::Walls,
    convergence::TerminationReason,
    error::Error,
    objective::{Counted, Fallible},
    optimizer::Optimizer,
    space::Bounds,
    termination::Flag,
  };

  fn sphere(x: f64, y: f64) -> f64 {
    x * x + y * y
  }

  fn seeded(seed: u64) -> SwarmConfig {
    SwarmConfig::builder().seed(seed).build()
  }

  #[test]
  fn test_sphere_scenario() {
    // 15 particles, 100 iterations, stall limit 50
    for seed in 0..3 {
      let report = Swarm::new(&sphere, seeded(seed)).optimize().unwrap();
      assert!(report.best_value() < 1.0, "seed {seed}: {report:?}");
      let [x, y] = report.best_position().unwrap();
      assert!(x.hypot(y) < 1.0);
      assert!(report.iterations <= 100);
    }
  }

  #[test]
  fn test_positions_stay_within_bounds() {
    for walls in [Walls::Absorbing, Walls::LowerAbsorbing] {
      let config = SwarmConfig::builder()
        .bounds(Bounds::square(-2.0, 2.0))
        .c1(3.0)
        .c2(3.0)
        .velocity(crate::space::Bound::new(-50.0, 50.0))
        .walls(walls)
        .seed(11)
        .build();
      let bounds = config.bounds;
      let objective = |x: f64, y: f64| -(x + y);
      let mut swarm = Swarm::new(&objective, config);
      swarm.initialize().unwrap();
      assert_eq!(swarm.particles().len(), swarm.config().particle_count);
      for iteration in 0..50 {
        assert!(swarm.particles().iter().all(|p| bounds.contains(&p.position)));
        swarm.evaluate(iteration).unwrap();
        swarm.advance(iteration);
      }
      assert!(swarm.particles().iter().all(|p| bounds.contains(&p.position)));
    }
  }

  #[test]
  fn test_best_so_far_is_non_increasing() {
    let report = Swarm::new(&crate::landscape::w4, seeded(5))
      .optimize()
      .unwrap();
    let history = report.history.as_ref().unwrap();
    assert_eq!(history.len(), report.iterations);
    assert!(history.best_so_far.windows(2).all(|w| w[1] <= w[0]));
    assert!(history
      .step_best
      .iter()
      .zip(&history.best_so_far)
      .all(|(step, best)| best <= step));
    assert_eq!(history.best_so_far.last(), Some(&report.best_value()));
  }

  #[test]
  fn test_same_seed_same_report() {
    let a = Swarm::new(&crate::landscape::w4, seeded(3)).optimize().unwrap();
    let b = Swarm::new(&crate::landscape::w4, seeded(3)).optimize().unwrap();
    assert_eq!(a, b);
    let c = Swarm::new(&crate::landscape::w4, seeded(4)).optimize().unwrap();
    assert_ne!(a.history, c.history);
  }

  #[test]
  fn test_infinite_tolerance_converges_after_two_iterations() {
    let config = SwarmConfig::builder()
      .tolerance(f64::INFINITY)
      .stall_limit(1)
      .seed(0)
      .build();
    let report = Swarm::new(&sphere, config).optimize().unwrap();
    assert_eq!(report.iterations, 2);
    assert_eq!(report.termination, TerminationReason::Converged);
    assert_eq!(report.evaluations, 30);
  }

  #[test]
  fn test_perpetual_improvement_exhausts_budget() {
    let calls = Cell::new(0.0);
    let objective = |_: f64, _: f64| {
      calls.set(calls.get() + 1.0);
      -calls.get()
    };
    let config = SwarmConfig::builder()
      .max_iterations(30)
      .stall_limit(31)
      .seed(0)
      .build();
    let report = Swarm::new(&objective, config).optimize().unwrap();
    assert_eq!(report.termination, TerminationReason::Exhausted);
    assert_eq!(report.iterations, 30);
    assert_eq!(report.best_value(), -450.0);
    assert_eq!(report.best_iteration, Some(29));
  }

  #[test]
  fn test_cancellation_before_iteration() {
    let cancelled = AtomicBool::new(false);
    let objective = |x: f64, y: f64| {
      cancelled.store(true, Ordering::Relaxed);
      sphere(x, y)
    };
    let report = Swarm::new(&objective, seeded(0))
      .terminator(Flag(&cancelled))
      .optimize()
      .unwrap();
    assert_eq!(report.termination, TerminationReason::Cancelled);
    assert_eq!(report.iterations, 1);
    assert_eq!(report.evaluations, 15);
  }

  #[test]
  fn test_operation_accounting() {
    let objective = Counted::new(sphere).with_cost(20, 5);
    let mut count = OperationCount::new(999, 999);
    let report = Swarm::new(&objective, seeded(0))
      .counter(&mut count)
      .terminator(|iteration: usize| iteration == 3)
      .optimize()
      .unwrap();
    assert_eq!(report.iterations, 3);
    assert_eq!(report.evaluations, 45);
    assert_eq!(objective.call_count(), 45);
    // 45 evaluations and 45 inertia weights
    assert_eq!(report.operations, OperationCount::new(945, 270));
    assert_eq!(count, report.operations);
    let at_best = report.operations_at_best;
    assert!(at_best.multiplications <= report.operations.multiplications);
    assert_eq!(
      at_best.divisions - report.evaluations_at_best * 5,
      (report.best_iteration.unwrap() * 15) as u64
    );
  }

  #[test]
  fn test_objective_error_stops_the_run() {
    let objective = Fallible(|x: f64, y: f64| {
      if x > 0.0 && y > 0.0 {
        Err("outside the domain")
      } else {
        Ok(sphere(x, y))
      }
    });
    let result = Swarm::new(&objective, seeded(0)).optimize();
    assert!(matches!(result, Err(Error::Objective { x, y, .. }) if x > 0.0 && y > 0.0));
  }

  #[test]
  fn test_invalid_config_evaluates_nothing() {
    let objective = Counted::new(sphere);
    let config = SwarmConfig::builder().max_iterations(0).build();
    let result = Swarm::new(&objective, config).optimize();
    assert!(matches!(result, Err(Error::ZeroCount { .. })));
    assert_eq!(objective.call_count(), 0);
  }

  #[test]
  fn test_overflowing_bounds_fail_without_panic() {
    let objective = Counted::new(sphere);
    let config = SwarmConfig::builder()
      .bounds(Bounds::square(-f64::MAX, f64::MAX))
      .seed(0)
      .build();
    let result = Swarm::new(&objective, config).optimize();
    assert!(matches!(result, Err(Error::InvalidBound { axis: 0, .. })));
    let config = SwarmConfig::builder()
      .velocity(crate::space::Bound::new(-f64::MAX, f64::MAX))
      .seed(0)
      .build();
    let result = Swarm::new(&objective, config).optimize();
    assert!(matches!(result, Err(Error::InvalidInterval { .. })));
    assert_eq!(objective.call_count(), 0);
  }

  #[test]
  fn test_non_finite_objective_is_never_best() {
    let config = SwarmConfig::builder()
      .max_iterations(10)
      .stall_limit(3)
      .seed(0)
      .build();
    let report = Swarm::new(&|_: f64, _: f64| f64::NAN, config)
      .optimize()
      .unwrap();
    assert_eq!(report.best, None);
    assert_eq!(report.best_value(), f64::INFINITY);
    assert_eq!(report.termination, TerminationReason::Exhausted);
    assert_eq!(report.iterations, 10);
    let history = report.history.unwrap();
    assert!(history.best_so_far.iter().all(|v| *v == f64::INFINITY));
  }

  #[test]
  fn test_noisy_objective() {
    let noise = RefCell::new(StdRng::seed_from_u64(9));
    let normal = Normal::new(0.0, 0.1).unwrap();
    let objective =
      |x: f64, y: f64| sphere(x, y) + normal.sample(&mut *noise.borrow_mut());
    let config = SwarmConfig::builder()
      .bounds(Bounds::square(-10.0, 10.0))
      .record_history(false)
      .seed(2)
      .build();
    let report = Swarm::new(&objective, config).optimize().unwrap();
    assert!(report.history.is_none());
    assert!(report.best_value() < 2.0);
  }
}
