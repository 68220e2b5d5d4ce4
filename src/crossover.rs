//! Blend crossover (BLX-α).

use rand::Rng;

use crate::{
  counter::OperationCounter,
  space::{Bounds, Individual, DIMENSIONS},
};

/// Creates two children from two parents.
///
/// With probability `rate`, each child gene is drawn uniformly from the
/// parents' interval `[min, max]` extended by `d = alpha * (max - min)` on
/// both sides and clamped to `bounds`. The multiplication of `d` is reported
/// to `counter`, once per gene. Otherwise the children are copies of the
/// parents.
///
/// # Examples
/// ```
/// # use optibench::{crossover::blend_crossover, space::Bounds};
/// # use rand::{rngs::StdRng, SeedableRng};
/// let mut rng = StdRng::seed_from_u64(0);
/// let bounds = Bounds::square(-1.0, 1.0);
/// let children = blend_crossover(
///   [&[-0.5, 0.5], &[0.5, 0.5]],
///   1.0,
///   0.5,
///   &bounds,
///   &mut rng,
///   &mut (),
/// );
/// assert!(children.iter().all(|c| bounds.contains(c)));
/// assert!(children.iter().all(|c| c[1] == 0.5));
/// ```
pub fn blend_crossover<R, C>(
  parents: [&Individual; 2],
  rate: f64,
  alpha: f64,
  bounds: &Bounds,
  rng: &mut R,
  counter: &mut C,
) -> [Individual; 2]
where
  R: Rng + ?Sized,
  C: OperationCounter + ?Sized,
{
  let [a, b] = parents;
  if rng.gen::<f64>() >= rate {
    return [*a, *b];
  }

  let mut children = [[0.0; DIMENSIONS]; 2];
  for (d, bound) in bounds.iter().enumerate() {
    let (low, high) = (a[d].min(b[d]), a[d].max(b[d]));
    let extent = alpha * (high - low);
    counter.add_multiplications(1);
    let low = bound.clamp(low - extent);
    let high = bound.clamp(high + extent);
    for child in &mut children {
      child[d] = if low < high {
        rng.gen_range(low..=high)
      } else {
        low
      };
    }
  }
  children
}
