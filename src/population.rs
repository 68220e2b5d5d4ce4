//! Creation and evaluation of GA populations.

use rand::Rng;

use crate::{
  error::Result,
  objective::Objective,
  space::{Bounds, Individual},
};

/// Creates `size` individuals with every gene drawn uniformly within
/// `bounds`.
pub fn initialize_population<R: Rng + ?Sized>(
  size: usize,
  bounds: &Bounds,
  rng: &mut R,
) -> Vec<Individual> {
  (0..size).map(|_| bounds.sample(rng)).collect()
}

/// Evaluates every individual, in order. The first objective failure aborts
/// the evaluation.
///
/// # Examples
/// ```
/// # use optibench::population::evaluate_population;
/// let f = |x: f64, y: f64| x + y;
/// let fitness = evaluate_population(&[[1.0, 2.0], [3.0, 4.0]], &f).unwrap();
/// assert_eq!(fitness, vec![3.0, 7.0]);
/// ```
pub fn evaluate_population<O: Objective + ?Sized>(
  population: &[Individual],
  objective: &O,
) -> Result<Vec<f64>> {
  population
    .iter()
    .map(|&[x, y]| objective.evaluate(x, y))
    .collect()
}

#[cfg(test)]
mod tests {
  use rand::{rngs::StdRng, SeedableRng};

  use super::*;
  use crate::objective::Fallible;

  #[test]
  fn test_initial_population_within_bounds() {
    let mut rng = StdRng::seed_from_u64(0);
    let bounds = Bounds::square(-3.0, -1.0);
    let population = initialize_population(35, &bounds, &mut rng);
    assert_eq!(population.len(), 35);
    assert!(population.iter().all(|i| bounds.contains(i)));
  }

  #[test]
  fn test_empty_population() {
    let mut rng = StdRng::seed_from_u64(0);
    let population = initialize_population(0, &Bounds::default(), &mut rng);
    let f = |x: f64, _: f64| x;
    assert!(evaluate_population(&population, &f).unwrap().is_empty());
  }

  #[test]
  fn test_evaluation_stops_at_first_failure() {
    let calls = std::cell::Cell::new(0);
    let f = Fallible(|x: f64, _: f64| {
      calls.set(calls.get() + 1);
      if x < 0.0 {
        Err("negative")
      } else {
        Ok(x)
      }
    });
    let population = [[1.0, 0.0], [-1.0, 0.0], [2.0, 0.0]];
    assert!(evaluate_population(&population, &f).is_err());
    assert_eq!(calls.get(), 2);
  }
}
