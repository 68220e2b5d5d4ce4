//! Command line front end: runs PSO or the GA on a reference landscape and
//! prints one line per run.

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use itertools::{Itertools, MinMaxResult};
use log::error;
use optibench::{
  batch::{run_batch, run_seed},
  config::{GeneticConfig, SwarmConfig, Walls},
  convergence::TerminationReason,
  counter::OperationCount,
  genetic::GeneticAlgorithm,
  landscape::{sphere, w4, W4_COST},
  objective::Counted,
  optimizer::Optimizer,
  report::Report,
  selection::Selection,
  space::{Bound, Bounds},
  swarm::Swarm,
};

#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "Benchmark particle swarm and genetic optimizers on 2-D landscapes"
)]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Particle swarm optimization
  Pso(PsoArgs),
  /// Genetic algorithm with BLX-α crossover
  Ga(GaArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Landscape {
  /// Multimodal W4 benchmark
  W4,
  /// Convex bowl x² + y²
  Sphere,
}

#[derive(Args, Debug)]
struct RunArgs {
  /// Objective function
  #[arg(long, value_enum, default_value_t = Landscape::W4)]
  objective: Landscape,

  /// Lower bound of both axes
  #[arg(long, default_value_t = -500.0, allow_negative_numbers = true)]
  min: f64,

  /// Upper bound of both axes
  #[arg(long, default_value_t = 500.0, allow_negative_numbers = true)]
  max: f64,

  /// Minimal improvement of the best value ("inf" disables detection)
  #[arg(long, default_value_t = 1e-6)]
  tolerance: f64,

  /// Consecutive steps without improvement that end a run
  #[arg(long, default_value_t = 50)]
  stall_limit: usize,

  /// Number of independent runs, executed in parallel
  #[arg(long, default_value_t = 1)]
  runs: usize,

  /// Seed of the first run; run i uses seed + i (random when absent)
  #[arg(long)]
  seed: Option<u64>,

  /// Print the convergence series of every run
  #[arg(long, default_value_t = false)]
  history: bool,
}

#[derive(Args, Debug)]
struct PsoArgs {
  #[command(flatten)]
  run: RunArgs,

  /// Number of particles
  #[arg(long, default_value_t = 15)]
  particles: usize,

  /// Iteration budget
  #[arg(long, default_value_t = 100)]
  max_iterations: usize,

  /// Cognitive coefficient
  #[arg(long, default_value_t = 2.0)]
  c1: f64,

  /// Social coefficient
  #[arg(long, default_value_t = 2.0)]
  c2: f64,

  /// Initial inertia weight
  #[arg(long, default_value_t = 0.9)]
  w_max: f64,

  /// Final inertia weight
  #[arg(long, default_value_t = 0.4)]
  w_min: f64,

  /// Lower end of the initial velocity components
  #[arg(long, default_value_t = -1.0, allow_negative_numbers = true)]
  velocity_min: f64,

  /// Upper end of the initial velocity components
  #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
  velocity_max: f64,

  /// Keep the velocity of particles hitting the upper wall
  #[arg(long, default_value_t = false)]
  lower_absorbing: bool,
}

#[derive(Args, Debug)]
struct GaArgs {
  #[command(flatten)]
  run: RunArgs,

  /// Individuals per generation
  #[arg(long, default_value_t = 35)]
  population: usize,

  /// Generation budget
  #[arg(long, default_value_t = 200)]
  max_iterations: usize,

  /// Probability of blending a pair of parents
  #[arg(long, default_value_t = 0.7)]
  crossover_rate: f64,

  /// Probability of resampling one gene of an individual
  #[arg(long, default_value_t = 0.01)]
  mutation_rate: f64,

  /// BLX-α extension factor
  #[arg(long, default_value_t = 0.5)]
  alpha: f64,

  /// Use tournaments of this size instead of the roulette wheel
  #[arg(long)]
  tournament: Option<usize>,

  /// Carry the best solution over into every generation
  #[arg(long, default_value_t = false)]
  elitism: bool,
}

fn main() -> ExitCode {
  env_logger::Builder::from_env(
    env_logger::Env::default().default_filter_or("warn"),
  )
  .init();

  match run(Cli::parse().command) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      error!("{e}");
      ExitCode::FAILURE
    }
  }
}

fn run(command: Command) -> optibench::Result<()> {
  let args = match &command {
    Command::Pso(args) => &args.run,
    Command::Ga(args) => &args.run,
  };
  let (function, cost) = match args.objective {
    Landscape::W4 => (w4 as fn(f64, f64) -> f64, W4_COST),
    Landscape::Sphere => (sphere as fn(f64, f64) -> f64, OperationCount::NONE),
  };
  let objective =
    Counted::new(function).with_cost(cost.multiplications, cost.divisions);
  let bounds = Bounds::square(args.min, args.max);
  let base_seed = args.seed.unwrap_or_else(rand::random);

  let reports = match &command {
    Command::Pso(pso) => run_batch(args.runs, base_seed, |seed| {
      let config = SwarmConfig::builder()
        .bounds(bounds)
        .particle_count(pso.particles)
        .max_iterations(pso.max_iterations)
        .tolerance(args.tolerance)
        .stall_limit(args.stall_limit)
        .c1(pso.c1)
        .c2(pso.c2)
        .w_max(pso.w_max)
        .w_min(pso.w_min)
        .velocity(Bound::new(pso.velocity_min, pso.velocity_max))
        .walls(if pso.lower_absorbing {
          Walls::LowerAbsorbing
        } else {
          Walls::Absorbing
        })
        .seed(seed)
        .record_history(args.history)
        .build();
      Swarm::new(&objective, config)
        .counter(OperationCount::default())
        .optimize()
    }),
    Command::Ga(ga) => run_batch(args.runs, base_seed, |seed| {
      let config = GeneticConfig::builder()
        .bounds(bounds)
        .population_size(ga.population)
        .max_iterations(ga.max_iterations)
        .tolerance(args.tolerance)
        .stall_limit(args.stall_limit)
        .crossover_rate(ga.crossover_rate)
        .mutation_rate(ga.mutation_rate)
        .alpha(ga.alpha)
        .selection(
          ga.tournament
            .map_or(Selection::Roulette, |size| Selection::Tournament { size }),
        )
        .elitism(ga.elitism)
        .seed(seed)
        .record_history(args.history)
        .build();
      GeneticAlgorithm::new(&objective, config)
        .counter(OperationCount::default())
        .optimize()
    }),
  };
  let reports = reports.into_iter().collect::<optibench::Result<Vec<_>>>()?;

  for (run, report) in reports.iter().enumerate() {
    print_report(run, run_seed(base_seed, run), report);
  }
  if reports.len() > 1 {
    print_summary(&reports);
  }
  Ok(())
}

fn print_report(run: usize, seed: u64, report: &Report) {
  let position = report
    .best_position()
    .map_or("-".to_owned(), |p| format!("({:.6}, {:.6})", p[0], p[1]));
  println!(
    "run {run} seed {seed}: best {:.6} at {position}, {} after {} \
     iterations, {} evaluations ({} at best), {} mult / {} div",
    report.best_value(),
    report.termination,
    report.iterations,
    report.evaluations,
    report.evaluations_at_best,
    report.operations.multiplications,
    report.operations.divisions,
  );
  if let Some(history) = &report.history {
    println!("  step best:   {}", history.step_best.iter().join(" "));
    println!("  best so far: {}", history.best_so_far.iter().join(" "));
  }
}

fn print_summary(reports: &[Report]) {
  let values = reports.iter().map(Report::best_value).collect::<Vec<_>>();
  let mean = values.iter().sum::<f64>() / values.len() as f64;
  let (min, max) = match values.iter().minmax_by(|a, b| a.total_cmp(b)) {
    MinMaxResult::NoElements => return,
    MinMaxResult::OneElement(v) => (*v, *v),
    MinMaxResult::MinMax(min, max) => (*min, *max),
  };
  let converged = reports
    .iter()
    .filter(|r| r.termination == TerminationReason::Converged)
    .count();
  println!(
    "{} runs: best {min:.6}, worst {max:.6}, mean {mean:.6}, {converged} \
     converged",
    reports.len()
  );
}
