//! **optibench** benchmarks two stochastic, population-based optimizers,
//! **Particle Swarm Optimization** and a real-coded **Genetic Algorithm**, on
//! bounded two-dimensional landscapes. It tracks how they converge and how
//! much arithmetic they spend doing so.
//!
//! Here's a [quick start example](#example) for the impatient.
//!
//! # Optimizers
//!
//! **Optimizer** is an abstraction represented in this crate with the
//! [`Optimizer`] trait. This crate features two implementations of it:
//! [`Swarm`] and [`GeneticAlgorithm`]. Both run the same loop, implemented
//! once for every [`IterativeOptimizer`]:
//! 1. Poll the [`Terminator`], cancelling the run if it says so
//! 2. **Evaluate** every particle or individual against the [`Objective`],
//!    updating the best solution found so far on strict improvement only
//! 3. Feed the best value before and after the step to the [`Convergence`]
//!    tracker, which stops the run once the best stalls for `stall_limit`
//!    consecutive steps or the iteration budget runs out
//! 4. **Move** the particles, or **breed** the next generation with selection,
//!    BLX-α crossover and mutation
//!
//! Whatever ends the run, the result is a [`Report`] with the best solution,
//! the termination reason, evaluation and operation counts and, optionally,
//! the convergence history.
//!
//! # Configuration
//!
//! Runs are configured with [`SwarmConfig`] and [`GeneticConfig`], built with
//! a compile-time checked builder from the `typed-builder` crate. Every field
//! has a default. A configuration is validated before the first objective
//! evaluation, so a bad one never wastes a single call.
//!
//! A run is deterministic for a given seed. Without a seed, the random source
//! is drawn from entropy.
//!
//! # Closures
//!
//! The [`Objective`] and [`Terminator`] traits are implemented by closures:
//! any `Fn(f64, f64) -> f64` is an objective, and any `FnMut(usize) -> bool`
//! is a terminator. Wrap a closure returning a `Result` in [`Fallible`] to
//! propagate its errors out of the run, and in [`Counted`] to count calls.
//!
//! # Operation counting
//!
//! Pass any [`OperationCounter`] to a run with `.counter(...)` to have it
//! receive the arithmetic of the run: the per-call cost declared by the
//! objective, the inertia weight computations of PSO and the interval widths
//! of BLX-α. Counting is instrumentation only; without a counter the run is
//! exactly the same.
//!
//! # Parallelization
//!
//! A single run is sequential. Independent runs are embarrassingly parallel:
//! [`run_batch`] executes them on the rayon thread pool, one seed per run.
//!
//! # Logging
//!
//! The engines log through the `log` facade: `debug` for every iteration,
//! `info` when a run ends and `warn` for a step without any finite objective
//! value. Install a logger such as `env_logger` to see them.
//!
//! # Example
//!
//! ```no_run
//! use optibench::{
//!   config::{GeneticConfig, SwarmConfig},
//!   counter::OperationCount,
//!   genetic::GeneticAlgorithm,
//!   landscape::{w4, W4_COST},
//!   objective::Counted,
//!   optimizer::Optimizer,
//!   swarm::Swarm,
//! };
//!
//! # fn main() -> optibench::error::Result<()> {
//! let objective = Counted::new(w4).with_cost(
//!   W4_COST.multiplications,
//!   W4_COST.divisions,
//! );
//!
//! let mut ops = OperationCount::default();
//! let pso = Swarm::new(&objective, SwarmConfig::builder().seed(1).build())
//!   .counter(&mut ops)
//!   .optimize()?;
//! println!("pso: {:?} after {} iterations", pso.best, pso.iterations);
//!
//! let ga = GeneticAlgorithm::new(
//!   &objective,
//!   GeneticConfig::builder().elitism(true).seed(1).build(),
//! )
//! .optimize()?;
//! println!("ga: {:?} ({})", ga.best, ga.termination);
//! # Ok(())
//! # }
//! ```
//!
//! [`Optimizer`]: crate::optimizer::Optimizer
//! [`IterativeOptimizer`]: crate::optimizer::IterativeOptimizer
//! [`Swarm`]: crate::swarm::Swarm
//! [`GeneticAlgorithm`]: crate::genetic::GeneticAlgorithm
//! [`Terminator`]: crate::termination::Terminator
//! [`Objective`]: crate::objective::Objective
//! [`Fallible`]: crate::objective::Fallible
//! [`Counted`]: crate::objective::Counted
//! [`Convergence`]: crate::convergence::Convergence
//! [`Report`]: crate::report::Report
//! [`SwarmConfig`]: crate::config::SwarmConfig
//! [`GeneticConfig`]: crate::config::GeneticConfig
//! [`OperationCounter`]: crate::counter::OperationCounter
//! [`run_batch`]: crate::batch::run_batch

#![warn(missing_docs)]

pub mod batch;
pub mod config;
pub mod convergence;
pub mod counter;
pub mod crossover;
pub mod error;
pub mod genetic;
pub mod landscape;
pub mod mutation;
pub mod objective;
pub mod optimizer;
pub mod particle;
pub mod population;
pub mod report;
pub mod selection;
pub mod space;
pub mod swarm;
pub mod termination;

pub use config::{GeneticConfig, SwarmConfig};
pub use error::{Error, Result};
pub use genetic::GeneticAlgorithm;
pub use optimizer::Optimizer;
pub use report::Report;
pub use swarm::Swarm;
