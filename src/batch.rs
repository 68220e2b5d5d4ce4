//! Independent runs executed in parallel.
//!
//! Runs share nothing but the objective, which is only read. Each run gets its
//! own seed, derived from a base seed, so a batch is reproducible regardless
//! of how rayon schedules it.

use rayon::prelude::*;

/// Seed of the run with index `run` in a batch started from `base_seed`.
pub fn run_seed(base_seed: u64, run: usize) -> u64 {
  base_seed.wrapping_add(run as u64)
}

/// Calls `f` once per run with that run's seed, on the rayon thread pool.
/// Results are returned in run order.
///
/// # Examples
/// ```
/// # use optibench::{batch::run_batch, config::SwarmConfig, swarm::Swarm};
/// # use optibench::optimizer::Optimizer;
/// let bowl = |x: f64, y: f64| x * x + y * y;
/// let reports = run_batch(4, 100, |seed| {
///   let config = SwarmConfig::builder().seed(seed).build();
///   Swarm::new(&bowl, config).optimize()
/// });
/// assert_eq!(reports.len(), 4);
/// assert!(reports.iter().all(Result::is_ok));
/// ```
pub fn run_batch<T, F>(runs: usize, base_seed: u64, f: F) -> Vec<T>
where
  T: Send,
  F: Fn(u64) -> T + Sync,
{
  (0..runs)
    .into_par_iter()
    .map(|run| f(run_seed(base_seed, run)))
    .collect()
}
