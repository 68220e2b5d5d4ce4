//! Parent selection for the genetic algorithm.
//!
//! Both policies minimize: lower fitness means a better chance to become a
//! parent. Non-finite fitness values are treated as the worst possible ones.
//! Selecting from an empty population yields `None`, and the caller skips the
//! slot it was filling.

use rand::{seq::SliceRandom, Rng};

use crate::space::Individual;

/// Added to every roulette weight, so that even the worst individual keeps a
/// positive chance.
pub const ROULETTE_EPSILON: f64 = 1e-6;

/// Parent selection policy.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Selection {
  /// Fitness proportionate selection adjusted for minimization.
  #[default]
  Roulette,
  /// Best of `size` distinct individuals drawn uniformly.
  Tournament {
    /// Number of contestants.
    size: usize,
  },
}

impl Selection {
  /// Selects one parent. `population` and `fitness` are parallel slices; any
  /// excess in the longer one is ignored.
  ///
  /// # Examples
  /// ```
  /// # use optibench::selection::Selection;
  /// # use rand::{rngs::StdRng, SeedableRng};
  /// let mut rng = StdRng::seed_from_u64(0);
  /// let population = [[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]];
  /// let fitness = [5.0, 1.0, 3.0];
  /// let best = Selection::Tournament { size: 3 }
  ///   .select(&population, &fitness, &mut rng);
  /// assert_eq!(best, Some(&[1.0, 1.0]));
  /// assert_eq!(Selection::Roulette.select(&[], &[], &mut rng), None);
  /// ```
  pub fn select<'p, R: Rng + ?Sized>(
    &self,
    population: &'p [Individual],
    fitness: &[f64],
    rng: &mut R,
  ) -> Option<&'p Individual> {
    match *self {
      Self::Roulette => roulette(population, fitness, rng),
      Self::Tournament { size } => tournament(population, fitness, size, rng),
    }
  }
}

/// Roulette wheel selection with weights `worst - f + ε`, where `worst` is
/// the highest finite fitness. Non-finite fitness values weigh nothing. If no
/// weight is positive the choice is uniform.
///
/// A single uniform draw `r` picks the first individual whose cumulative
/// probability satisfies `r <= cumulative`.
pub fn roulette<'p, R: Rng + ?Sized>(
  population: &'p [Individual],
  fitness: &[f64],
  rng: &mut R,
) -> Option<&'p Individual> {
  let n = population.len().min(fitness.len());
  let (population, fitness) = (&population[..n], &fitness[..n]);

  let worst = fitness
    .iter()
    .copied()
    .filter(|f| f.is_finite())
    .fold(f64::NEG_INFINITY, f64::max);
  let weights = fitness
    .iter()
    .map(|&f| {
      if f.is_finite() {
        worst - f + ROULETTE_EPSILON
      } else {
        0.0
      }
    })
    .collect::<Vec<_>>();
  let total = weights.iter().sum::<f64>();
  if !(total > 0.0 && total.is_finite()) {
    return population.choose(rng);
  }

  let r = rng.gen::<f64>();
  let mut cumulative = 0.0;
  for (individual, weight) in population.iter().zip(&weights) {
    cumulative += weight / total;
    if *weight > 0.0 && r <= cumulative {
      return Some(individual);
    }
  }
  // rounding kept the last cumulative probability below `r`
  weights
    .iter()
    .rposition(|w| *w > 0.0)
    .map(|i| &population[i])
}

/// Tournament selection: draws `size` distinct individuals uniformly, without
/// replacement, and returns the fittest of them. `size` is clamped to
/// `1..=population.len()`.
pub fn tournament<'p, R: Rng + ?Sized>(
  population: &'p [Individual],
  fitness: &[f64],
  size: usize,
  rng: &mut R,
) -> Option<&'p Individual> {
  let n = population.len().min(fitness.len());
  if n == 0 {
    return None;
  }
  let key = |i: usize| {
    let f = fitness[i];
    if f.is_finite() {
      f
    } else {
      f64::INFINITY
    }
  };
  rand::seq::index::sample(rng, n, size.clamp(1, n))
    .into_iter()
    .min_by(|&a, &b| key(a).total_cmp(&key(b)))
    .map(|i| &population[i])
}
