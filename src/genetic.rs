//! Real-coded genetic algorithm.

use log::debug;
use rand::rngs::StdRng;

use crate::{
  config::{random_source, GeneticConfig},
  convergence::Convergence,
  counter::{OperationCount, OperationCounter},
  crossover::blend_crossover,
  error::Result,
  mutation::mutate,
  objective::Objective,
  optimizer::IterativeOptimizer,
  population::{evaluate_population, initialize_population},
  report::Incumbent,
  space::Individual,
  termination::{Never, Terminator},
};

/// A genetic algorithm minimizing an [`Objective`].
///
/// Each generation is evaluated, then replaced wholesale by its offspring:
/// pairs of parents are selected, blended with BLX-α and the children are
/// mutated. With elitism the best solution found so far takes the first slot
/// of the next generation and is exempt from mutation. A generation without
/// any finite fitness value is not reproduced; the next step evaluates the
/// same individuals again.
///
/// # Examples
/// ```
/// # use optibench::{config::GeneticConfig, genetic::GeneticAlgorithm};
/// # use optibench::optimizer::Optimizer;
/// let bowl = |x: f64, y: f64| x * x + y * y;
/// let config = GeneticConfig::builder().elitism(true).seed(7).build();
/// let report = GeneticAlgorithm::new(&bowl, config).optimize().unwrap();
/// assert!(report.best_value() < 1.0);
/// ```
#[derive(Debug)]
pub struct GeneticAlgorithm<'a, O: ?Sized, C = (), T = Never> {
  objective: &'a O,
  config: GeneticConfig,
  counter: C,
  terminator: T,
  rng: StdRng,
  population: Vec<Individual>,
  fitness: Vec<f64>,
  incumbent: Incumbent,
  evaluations: u64,
}

impl<'a, O: Objective + ?Sized> GeneticAlgorithm<'a, O> {
  /// Creates a genetic algorithm with no operation counter and no
  /// terminator. The initial population is drawn when the run starts.
  pub fn new(objective: &'a O, config: GeneticConfig) -> Self {
    Self {
      objective,
      rng: random_source(config.seed),
      config,
      counter: (),
      terminator: Never,
      population: Vec::new(),
      fitness: Vec::new(),
      incumbent: Incumbent::default(),
      evaluations: 0,
    }
  }
}

impl<'a, O: ?Sized, C, T> GeneticAlgorithm<'a, O, C, T> {
  /// Reports the run's arithmetic to `counter`. Pass `&mut counter` to keep
  /// ownership of it.
  pub fn counter<D: OperationCounter>(
    self,
    counter: D,
  ) -> GeneticAlgorithm<'a, O, D, T> {
    GeneticAlgorithm {
      objective: self.objective,
      config: self.config,
      counter,
      terminator: self.terminator,
      rng: self.rng,
      population: self.population,
      fitness: self.fitness,
      incumbent: self.incumbent,
      evaluations: self.evaluations,
    }
  }

  /// Polls `terminator` before every generation.
  pub fn terminator<U: Terminator>(
    self,
    terminator: U,
  ) -> GeneticAlgorithm<'a, O, C, U> {
    GeneticAlgorithm {
      objective: self.objective,
      config: self.config,
      counter: self.counter,
      terminator,
      rng: self.rng,
      population: self.population,
      fitness: self.fitness,
      incumbent: self.incumbent,
      evaluations: self.evaluations,
    }
  }

  /// Configuration of the run.
  pub fn config(&self) -> &GeneticConfig {
    &self.config
  }

  /// Current generation.
  pub fn population(&self) -> &[Individual] {
    &self.population
  }

  /// Fitness of the current generation, once evaluated.
  pub fn fitness(&self) -> &[f64] {
    &self.fitness
  }
}

impl<O, C, T> IterativeOptimizer for GeneticAlgorithm<'_, O, C, T>
where
  O: Objective + ?Sized,
  C: OperationCounter,
  T: Terminator,
{
  fn name(&self) -> &'static str {
    "ga"
  }

  fn initialize(&mut self) -> Result<Convergence> {
    self.config.validate()?;
    self.counter.reset();
    self.population = initialize_population(
      self.config.population_size,
      &self.config.bounds,
      &mut self.rng,
    );
    self.fitness.clear();
    self.incumbent = Incumbent::default();
    self.evaluations = 0;
    debug!(
      "ga: {} individuals, {} generations, {:?} selection, elitism {}",
      self.config.population_size,
      self.config.max_iterations,
      self.config.selection,
      self.config.elitism
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
    self.fitness = evaluate_population(&self.population, self.objective)?;
    let cost = self.objective.cost();
    let mut step_best: Option<f64> = None;
    for (individual, &value) in self.population.iter().zip(&self.fitness) {
      self.evaluations += 1;
      self.counter.record(cost);
      if value.is_finite() {
        step_best = Some(step_best.map_or(value, |best| best.min(value)));
      }
      self.incumbent.offer(
        *individual,
        value,
        iteration,
        self.evaluations,
        self.counter.count(),
      );
    }
    Ok(step_best)
  }

  fn advance(&mut self, _: usize) {
    if self.fitness.iter().all(|f| !f.is_finite()) {
      return;
    }

    let size = self.config.population_size;
    let selection = self.config.selection;
    let mut next = Vec::with_capacity(size);
    if self.config.elitism {
      next.extend(self.incumbent.position());
    }
    let elites = next.len();
    let slots = size - elites;

    for _ in 0..slots / 2 {
      let a = selection.select(&self.population, &self.fitness, &mut self.rng);
      let b = selection.select(&self.population, &self.fitness, &mut self.rng);
      let (Some(a), Some(b)) = (a, b) else {
        continue;
      };
      next.extend(blend_crossover(
        [a, b],
        self.config.crossover_rate,
        self.config.alpha,
        &self.config.bounds,
        &mut self.rng,
        &mut self.counter,
      ));
    }
    if slots % 2 == 1 {
      next.extend(
        selection
          .select(&self.population, &self.fitness, &mut self.rng)
          .copied(),
      );
    }

    mutate(
      &mut next[elites..],
      self.config.mutation_rate,
      &self.config.bounds,
      &mut self.rng,
    );
    self.population = next;
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
