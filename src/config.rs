//! Typed run configurations.
//!
//! Both configurations are built with a compile-time checked builder from the
//! `typed-builder` crate. Every field has a default, so
//! `SwarmConfig::builder().build()` is a complete configuration. Validation
//! happens when a run starts, before the objective is evaluated even once.

use rand::{rngs::StdRng, SeedableRng};
use typed_builder::TypedBuilder;

use crate::{
  convergence::Convergence,
  error::{Error, Result},
  particle::Coefficients,
  selection::Selection,
  space::{Bound, Bounds},
};

/// What happens to a particle that moves past a bound.
///
/// In both cases its coordinate is clamped to the bound.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Walls {
  /// Both walls zero the velocity component that hit them.
  #[default]
  Absorbing,
  /// Only the lower wall zeroes the velocity component; the upper wall keeps
  /// it, so the particle keeps pushing against it.
  LowerAbsorbing,
}

/// Configuration of a [`Swarm`](crate::swarm::Swarm) run.
///
/// # Examples
/// ```
/// # use optibench::{config::*, space::Bounds};
/// let config = SwarmConfig::builder()
///   .bounds(Bounds::square(-5.0, 5.0))
///   .particle_count(30)
///   .seed(42)
///   .build();
/// assert!(config.validate().is_ok());
/// assert_eq!(config.max_iterations, 100);
/// ```
#[derive(TypedBuilder, Clone, PartialEq, Debug)]
pub struct SwarmConfig {
  /// Search space.
  #[builder(default)]
  pub bounds: Bounds,
  /// Number of particles.
  #[builder(default = 15)]
  pub particle_count: usize,
  /// Iteration budget; also the horizon of the inertia weight schedule.
  #[builder(default = 100)]
  pub max_iterations: usize,
  /// Minimal decrease of the global best that counts as an improvement.
  #[builder(default = 1e-6)]
  pub tolerance: f64,
  /// Consecutive non-improving iterations that end the run.
  #[builder(default = 50)]
  pub stall_limit: usize,
  /// Cognitive coefficient.
  #[builder(default = 2.0)]
  pub c1: f64,
  /// Social coefficient.
  #[builder(default = 2.0)]
  pub c2: f64,
  /// Inertia weight at the first iteration.
  #[builder(default = 0.9)]
  pub w_max: f64,
  /// Inertia weight approached at the last iteration.
  #[builder(default = 0.4)]
  pub w_min: f64,
  /// Interval of the initial velocity components.
  #[builder(default = Bound::new(-1.0, 1.0))]
  pub velocity: Bound,
  /// Wall behaviour.
  #[builder(default)]
  pub walls: Walls,
  /// Seed of the run's random source. Drawn from entropy when absent.
  #[builder(default, setter(strip_option))]
  pub seed: Option<u64>,
  /// Whether to keep the per-iteration convergence series.
  #[builder(default = true)]
  pub record_history: bool,
}

impl Default for SwarmConfig {
  fn default() -> Self {
    Self::builder().build()
  }
}

impl SwarmConfig {
  /// Rejects configurations that cannot produce a meaningful run.
  pub fn validate(&self) -> Result<()> {
    self.bounds.validate()?;
    positive("particle_count", self.particle_count)?;
    positive("max_iterations", self.max_iterations)?;
    positive("stall_limit", self.stall_limit)?;
    tolerance(self.tolerance)?;
    non_negative("c1", self.c1)?;
    non_negative("c2", self.c2)?;
    finite("w_max", self.w_max)?;
    finite("w_min", self.w_min)?;
    if !self.velocity.is_valid() {
      return Err(Error::InvalidInterval {
        name: "velocity",
        min: self.velocity.min,
        max: self.velocity.max,
      });
    }
    Ok(())
  }

  /// PSO coefficients of this configuration.
  pub fn coefficients(&self) -> Coefficients {
    Coefficients {
      c1: self.c1,
      c2: self.c2,
      w_max: self.w_max,
      w_min: self.w_min,
    }
  }

  pub(crate) fn convergence(&self) -> Convergence {
    Convergence::new(self.tolerance, self.stall_limit, self.max_iterations)
  }
}

/// Configuration of a
/// [`GeneticAlgorithm`](crate::genetic::GeneticAlgorithm) run.
///
/// # Examples
/// ```
/// # use optibench::{config::*, selection::Selection};
/// let config = GeneticConfig::builder()
///   .selection(Selection::Tournament { size: 3 })
///   .elitism(true)
///   .build();
/// assert!(config.validate().is_ok());
/// assert_eq!(config.population_size, 35);
/// ```
#[derive(TypedBuilder, Clone, PartialEq, Debug)]
pub struct GeneticConfig {
  /// Search space.
  #[builder(default)]
  pub bounds: Bounds,
  /// Number of individuals of every generation.
  #[builder(default = 35)]
  pub population_size: usize,
  /// Generation budget.
  #[builder(default = 200)]
  pub max_iterations: usize,
  /// Minimal decrease of the best value that counts as an improvement.
  #[builder(default = 1e-6)]
  pub tolerance: f64,
  /// Consecutive non-improving generations that end the run.
  #[builder(default = 50)]
  pub stall_limit: usize,
  /// Probability that a pair of parents is blended instead of copied.
  #[builder(default = 0.7)]
  pub crossover_rate: f64,
  /// Probability that an individual gets one gene resampled.
  #[builder(default = 0.01)]
  pub mutation_rate: f64,
  /// Extension factor of the BLX-α interval.
  #[builder(default = 0.5)]
  pub alpha: f64,
  /// Parent selection policy.
  #[builder(default)]
  pub selection: Selection,
  /// Carry the best solution over into the next generation unchanged.
  #[builder(default = false)]
  pub elitism: bool,
  /// Seed of the run's random source. Drawn from entropy when absent.
  #[builder(default, setter(strip_option))]
  pub seed: Option<u64>,
  /// Whether to keep the per-generation convergence series.
  #[builder(default = true)]
  pub record_history: bool,
}

impl Default for GeneticConfig {
  fn default() -> Self {
    Self::builder().build()
  }
}

impl GeneticConfig {
  /// Rejects configurations that cannot produce a meaningful run.
  pub fn validate(&self) -> Result<()> {
    self.bounds.validate()?;
    positive("population_size", self.population_size)?;
    positive("max_iterations", self.max_iterations)?;
    positive("stall_limit", self.stall_limit)?;
    tolerance(self.tolerance)?;
    probability("crossover_rate", self.crossover_rate)?;
    probability("mutation_rate", self.mutation_rate)?;
    non_negative("alpha", self.alpha)?;
    if let Selection::Tournament { size } = self.selection {
      if size == 0 || size > self.population_size {
        return Err(Error::InvalidTournament {
          size,
          population: self.population_size,
        });
      }
    }
    Ok(())
  }

  pub(crate) fn convergence(&self) -> Convergence {
    Convergence::new(self.tolerance, self.stall_limit, self.max_iterations)
  }
}

/// A seeded random source, or one drawn from entropy.
pub(crate) fn random_source(seed: Option<u64>) -> StdRng {
  seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
}

fn positive(name: &'static str, value: usize) -> Result<()> {
  if value == 0 {
    return Err(Error::ZeroCount { name });
  }
  Ok(())
}

fn probability(name: &'static str, value: f64) -> Result<()> {
  if !(0.0..=1.0).contains(&value) {
    return Err(Error::InvalidProbability { name, value });
  }
  Ok(())
}

fn non_negative(name: &'static str, value: f64) -> Result<()> {
  if !value.is_finite() || value < 0.0 {
    return Err(Error::InvalidParameter { name, value });
  }
  Ok(())
}

fn finite(name: &'static str, value: f64) -> Result<()> {
  if !value.is_finite() {
    return Err(Error::InvalidParameter { name, value });
  }
  Ok(())
}

// +inf disables improvement detection, NaN would never compare
fn tolerance(value: f64) -> Result<()> {
  if value.is_nan() || value < 0.0 {
    return Err(Error::InvalidParameter {
      name: "tolerance",
      value,
    });
  }
  Ok(())
}
