use optibench::{
  landscape::w4,
  selection::Selection,
  GeneticAlgorithm,
  GeneticConfig,
  Optimizer,
};

fn main() -> optibench::Result<()> {
  env_logger::init();

  // same seed for every variant, so they start from the same population
  let variants = [
    ("roulette", Selection::Roulette, false),
    ("roulette + elitism", Selection::Roulette, true),
    ("tournament of 3", Selection::Tournament { size: 3 }, false),
    ("tournament of 3 + elitism", Selection::Tournament { size: 3 }, true),
  ];
  for (name, selection, elitism) in variants {
    let config = GeneticConfig::builder()
      .selection(selection)
      .elitism(elitism)
      .seed(7)
      .build();
    let report = GeneticAlgorithm::new(&w4, config).optimize()?;
    println!(
      "{name:>26}: best {:12.6} after {:3} generations ({})",
      report.best_value(),
      report.iterations,
      report.termination
    );
  }
  Ok(())
}
