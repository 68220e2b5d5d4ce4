use optibench::{
  counter::OperationCount,
  landscape::{w4, W4_COST},
  objective::Counted,
  Optimizer,
  Swarm,
  SwarmConfig,
};

fn main() -> optibench::Result<()> {
  env_logger::init();

  // the W4 landscape, accounted for 20 multiplications and 5 divisions a call
  let objective = Counted::new(w4)
    .with_cost(W4_COST.multiplications, W4_COST.divisions);

  // 15 particles, 100 iterations, inertia weight annealed from 0.9 to 0.4
  let config = SwarmConfig::builder().seed(2024).build();

  let mut ops = OperationCount::default();
  let report = Swarm::new(&objective, config).counter(&mut ops).optimize()?;

  let [x, y] = report.best_position().unwrap_or([f64::NAN; 2]);
  println!("best {:.6} at ({x:.4}, {y:.4})", report.best_value());
  println!(
    "{} after {} iterations, found after {} of {} evaluations",
    report.termination,
    report.iterations,
    report.evaluations_at_best,
    objective.call_count()
  );
  println!(
    "{} multiplications, {} divisions",
    ops.multiplications, ops.divisions
  );
  if let Some(history) = report.history {
    for (i, (step, best)) in
      history.step_best.iter().zip(&history.best_so_far).enumerate()
    {
      println!("{i:3} {step:14.6} {best:14.6}");
    }
  }
  Ok(())
}
