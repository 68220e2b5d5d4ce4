//! Uniform single-gene mutation.

use rand::Rng;

use crate::space::{Bounds, Individual, DIMENSIONS};

/// Mutates each individual independently with probability `rate`: one gene,
/// chosen uniformly, is replaced with a uniform sample over its bound. At most
/// one gene per individual changes.
///
/// # Examples
/// ```
/// # use optibench::{mutation::mutate, space::Bounds};
/// # use rand::{rngs::StdRng, SeedableRng};
/// let mut rng = StdRng::seed_from_u64(0);
/// let mut population = vec![[0.0, 0.0]; 10];
/// mutate(&mut population, 1.0, &Bounds::square(1.0, 2.0), &mut rng);
/// assert!(population.iter().all(|i| i.iter().filter(|g| **g == 0.0).count() == 1));
/// ```
pub fn mutate<R: Rng + ?Sized>(
  population: &mut [Individual],
  rate: f64,
  bounds: &Bounds,
  rng: &mut R,
) {
  for individual in population {
    if rng.gen::<f64>() < rate {
      let gene = rng.gen_range(0..DIMENSIONS);
      individual[gene] = bounds.axis(gene).sample(rng);
    }
  }
}

#[cfg(test)]
mod tests {
  use rand::{rngs::StdRng, SeedableRng};

  use super::*;

  #[test]
  fn test_zero_rate_changes_nothing() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut population = vec![[1.0, 2.0]; 50];
    mutate(&mut population, 0.0, &Bounds::default(), &mut rng);
    assert!(population.iter().all(|i| *i == [1.0, 2.0]));
  }

  #[test]
  fn test_one_gene_per_mutated_individual() {
    let mut rng = StdRng::seed_from_u64(1);
    let bounds = Bounds::square(10.0, 20.0);
    let mut population = vec![[0.0, 0.0]; 200];
    mutate(&mut population, 1.0, &bounds, &mut rng);
    for individual in &population {
      let changed = individual.iter().filter(|g| **g != 0.0).collect::<Vec<_>>();
      assert_eq!(changed.len(), 1);
      assert!((10.0..20.0).contains(changed[0]));
    }
    // both genes get picked
    assert!(population.iter().any(|i| i[0] != 0.0));
    assert!(population.iter().any(|i| i[1] != 0.0));
  }

  #[test]
  fn test_rate_is_a_probability_per_individual() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut population = vec![[0.0, 0.0]; 10_000];
    mutate(&mut population, 0.1, &Bounds::square(1.0, 2.0), &mut rng);
    let mutated = population.iter().filter(|i| **i != [0.0, 0.0]).count();
    assert!((800..1200).contains(&mutated), "{mutated}");
  }
}
