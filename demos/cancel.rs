use std::{
  sync::atomic::{AtomicBool, Ordering},
  thread,
  time::Duration,
};

use optibench::{
  landscape::w4,
  termination::Flag,
  Optimizer,
  Swarm,
  SwarmConfig,
};

fn main() -> optibench::Result<()> {
  env_logger::init();

  // a slow objective, so that the run is still going when we pull the plug
  let slow_w4 = |x: f64, y: f64| {
    thread::sleep(Duration::from_millis(1));
    w4(x, y)
  };
  let config = SwarmConfig::builder()
    .max_iterations(10_000)
    .stall_limit(10_000)
    .seed(1)
    .build();

  let cancelled = AtomicBool::new(false);
  let report = thread::scope(|s| {
    s.spawn(|| {
      thread::sleep(Duration::from_millis(300));
      cancelled.store(true, Ordering::Relaxed);
    });
    Swarm::new(&slow_w4, config)
      .terminator(Flag(&cancelled))
      .optimize()
  })?;

  println!(
    "{} after {} iterations, best {:.6}",
    report.termination,
    report.iterations,
    report.best_value()
  );
  Ok(())
}
