//! The PSO search agent.

use rand::Rng;

use crate::{
  config::Walls,
  counter::OperationCounter,
  error::Result,
  objective::Objective,
  space::{Bound, Bounds, Point, DIMENSIONS},
};

/// Acceleration coefficients and the inertia weight schedule.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Coefficients {
  /// Pull towards the particle's own best.
  pub c1: f64,
  /// Pull towards the global best.
  pub c2: f64,
  /// Inertia weight at iteration 0.
  pub w_max: f64,
  /// Inertia weight approached at the end of the schedule.
  pub w_min: f64,
}

impl Coefficients {
  /// Linearly annealed inertia weight
  /// `w_max - iteration * (w_max - w_min) / total`.
  ///
  /// # Examples
  /// ```
  /// # use optibench::particle::Coefficients;
  /// let c = Coefficients { c1: 2.0, c2: 2.0, w_max: 0.9, w_min: 0.4 };
  /// assert_eq!(c.inertia(0, 100), 0.9);
  /// assert!((c.inertia(50, 100) - 0.65).abs() < 1e-12);
  /// ```
  pub fn inertia(&self, iteration: usize, total: usize) -> f64 {
    if total == 0 {
      return self.w_max;
    }
    self.w_max - iteration as f64 * (self.w_max - self.w_min) / total as f64
  }
}

/// A particle: current state plus memory of its own best position.
///
/// `best_value` is `f64::INFINITY` until the particle observes a finite
/// value; `best_position` starts at the initial position.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Particle {
  /// Current position. Always within bounds after an update.
  pub position: Point,
  /// Current velocity. Unbounded.
  pub velocity: Point,
  /// Best position visited so far.
  pub best_position: Point,
  /// Value at `best_position`.
  pub best_value: f64,
  /// Value at the current position, as of the last evaluation.
  pub value: f64,
}

impl Particle {
  /// Creates a particle at a uniformly random position within `bounds`, with
  /// every velocity component drawn uniformly from `velocity`.
  pub fn random<R: Rng + ?Sized>(
    bounds: &Bounds,
    velocity: &Bound,
    rng: &mut R,
  ) -> Self {
    let position = bounds.sample(rng);
    let velocity = [(); DIMENSIONS].map(|_| velocity.sample(rng));
    Self::new(position, velocity)
  }

  /// Creates a particle that has not been evaluated yet.
  pub fn new(position: Point, velocity: Point) -> Self {
    Self {
      position,
      velocity,
      best_position: position,
      best_value: f64::INFINITY,
      value: f64::INFINITY,
    }
  }

  /// Evaluates the current position and remembers it as the personal best
  /// if the value is finite and strictly lower.
  pub fn evaluate<O>(&mut self, objective: &O) -> Result<f64>
  where
    O: Objective + ?Sized,
  {
    let [x, y] = self.position;
    self.value = objective.evaluate(x, y)?;
    if self.value.is_finite() && self.value < self.best_value {
      self.best_value = self.value;
      self.best_position = self.position;
    }
    Ok(self.value)
  }

  /// Blends the previous velocity with cognitive and social pulls. Fresh
  /// `r1, r2 ∈ [0, 1)` are drawn for every dimension. The inertia weight
  /// computation is reported to `counter`.
  pub fn update_velocity<R, C>(
    &mut self,
    global_best: &Point,
    iteration: usize,
    total: usize,
    coefficients: &Coefficients,
    rng: &mut R,
    counter: &mut C,
  ) where
    R: Rng + ?Sized,
    C: OperationCounter + ?Sized,
  {
    let w = coefficients.inertia(iteration, total);
    counter.add_multiplications(1);
    counter.add_divisions(1);
    for d in 0..DIMENSIONS {
      let r1: f64 = rng.gen();
      let r2: f64 = rng.gen();
      let cognitive =
        coefficients.c1 * r1 * (self.best_position[d] - self.position[d]);
      let social = coefficients.c2 * r2 * (global_best[d] - self.position[d]);
      self.velocity[d] = w * self.velocity[d] + cognitive + social;
    }
  }

  /// Moves the particle and clamps it into `bounds`.
  pub fn update_position(&mut self, bounds: &Bounds, walls: Walls) {
    for (d, bound) in bounds.iter().enumerate() {
      let moved = self.position[d] + self.velocity[d];
      if moved > bound.max {
        self.position[d] = bound.max;
        if walls == Walls::Absorbing {
          self.velocity[d] = 0.0;
        }
      } else if moved < bound.min {
        self.position[d] = bound.min;
        self.velocity[d] = 0.0;
      } else {
        self.position[d] = moved;
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use rand::{rngs::StdRng, SeedableRng};

  use super::*;
  use crate::counter::OperationCount;

  const COEFFICIENTS: Coefficients = Coefficients {
    c1: 2.0,
    c2: 2.0,
    w_max: 0.9,
    w_min: 0.4,
  };

  #[test]
  fn test_inertia_schedule() {
    assert_eq!(COEFFICIENTS.inertia(0, 10), 0.9);
    assert!((COEFFICIENTS.inertia(10, 10) - 0.4).abs() < 1e-12);
    let ws = (0..10).map(|i| COEFFICIENTS.inertia(i, 10));
    assert!(ws.clone().zip(ws.skip(1)).all(|(a, b)| b < a));
  }

  #[test]
  fn test_random_particle_is_inside() {
    let mut rng = StdRng::seed_from_u64(1);
    let bounds = Bounds::square(-500.0, 500.0);
    let velocity = Bound::new(-1.0, 1.0);
    for _ in 0..100 {
      let p = Particle::random(&bounds, &velocity, &mut rng);
      assert!(bounds.contains(&p.position));
      assert!(p.velocity.iter().all(|v| velocity.contains(*v)));
      assert_eq!(p.best_value, f64::INFINITY);
      assert_eq!(p.best_position, p.position);
    }
  }

  #[test]
  fn test_personal_best_updates_on_strict_improvement() {
    let bowl = |x: f64, y: f64| x * x + y * y;
    let mut p = Particle::new([3.0, 4.0], [0.0, 0.0]);
    assert_eq!(p.evaluate(&bowl).unwrap(), 25.0);
    assert_eq!(p.best_value, 25.0);
    p.position = [4.0, 3.0];
    p.evaluate(&bowl).unwrap();
    assert_eq!(p.best_position, [3.0, 4.0]);
    p.position = [0.0, 1.0];
    p.evaluate(&bowl).unwrap();
    assert_eq!(p.best_position, [0.0, 1.0]);
    assert_eq!(p.best_value, 1.0);
  }

  #[test]
  fn test_non_finite_value_never_becomes_personal_best() {
    let mut p = Particle::new([1.0, 1.0], [0.0, 0.0]);
    p.evaluate(&|_: f64, _: f64| f64::NEG_INFINITY).unwrap();
    assert_eq!(p.best_value, f64::INFINITY);
    p.evaluate(&|_: f64, _: f64| f64::NAN).unwrap();
    assert_eq!(p.best_value, f64::INFINITY);
    assert!(p.value.is_nan());
  }

  #[test]
  fn test_velocity_without_pull_is_pure_inertia() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut count = OperationCount::default();
    let mut p = Particle::new([1.0, -1.0], [10.0, -4.0]);
    p.update_velocity(&[1.0, -1.0], 0, 100, &COEFFICIENTS, &mut rng, &mut count);
    assert_eq!(p.velocity, [9.0, -3.6]);
    assert_eq!(count, OperationCount::new(1, 1));
  }

  #[test]
  fn test_velocity_points_towards_bests() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut p = Particle::new([0.0, 0.0], [0.0, 0.0]);
    p.best_position = [1.0, 1.0];
    p.update_velocity(&[2.0, 2.0], 5, 100, &COEFFICIENTS, &mut rng, &mut ());
    assert!(p.velocity.iter().all(|v| (0.0..=6.0).contains(v)));
  }

  #[test]
  fn test_absorbing_walls_zero_velocity_on_both_sides() {
    let bounds = Bounds::square(-1.0, 1.0);
    let mut p = Particle::new([0.5, -0.5], [2.0, -2.0]);
    p.update_position(&bounds, Walls::Absorbing);
    assert_eq!(p.position, [1.0, -1.0]);
    assert_eq!(p.velocity, [0.0, 0.0]);
  }

  #[test]
  fn test_lower_absorbing_walls_keep_upper_velocity() {
    let bounds = Bounds::square(-1.0, 1.0);
    let mut p = Particle::new([0.5, -0.5], [2.0, -2.0]);
    p.update_position(&bounds, Walls::LowerAbsorbing);
    assert_eq!(p.position, [1.0, -1.0]);
    assert_eq!(p.velocity, [2.0, 0.0]);
  }

  #[test]
  fn test_move_inside_bounds() {
    let bounds = Bounds::square(-10.0, 10.0);
    let mut p = Particle::new([1.0, 2.0], [0.5, -3.0]);
    p.update_position(&bounds, Walls::Absorbing);
    assert_eq!(p.position, [1.5, -1.0]);
    assert_eq!(p.velocity, [0.5, -3.0]);
  }
}
