//! `intsort` — integer-vector sort demo binary (§11.2).
//!
//! Generates a random vector, sorts it via `PartitionedRunner` and via
//! `DirectRunner`, and reports that the two agree (S1).

use clap::Parser;
use rand::Rng;
use taskstorm::runner::{DirectRunner, PartitionedRunner};
use taskstorm::solvers::intsort::IntVecSortTask;

#[derive(Parser)]
#[command(name = "intsort")]
struct Cli {
    /// Number of random integers to sort.
    #[arg(default_value_t = 100)]
    size: usize,

    /// Maximum children per `split()` call handed to `PartitionedRunner`.
    #[arg(default_value_t = 2)]
    max_split: usize,
}

fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut rng = rand::rng();
    let data: Vec<i32> = (0..cli.size)
        .map(|_| rng.random_range(0..(cli.size as i32 * 10).max(1)))
        .collect();

    let mut direct_task = IntVecSortTask::new(data.clone());
    let mut direct_runner = DirectRunner::new();
    direct_runner.run(&mut direct_task);

    let mut partitioned_task = IntVecSortTask::new(data);
    let mut partitioned_runner = PartitionedRunner::new(cli.max_split);
    partitioned_runner.run(&mut partitioned_task);

    let agree = direct_task.result() == partitioned_task.result();
    tracing::info!(
        agree,
        direct_elapsed = ?direct_runner.duration(),
        partitioned_elapsed = ?partitioned_runner.duration(),
        "intsort comparison finished"
    );

    println!("direct:      {direct_task}");
    println!("partitioned: {partitioned_task}");
    println!("agree: {agree}");
}
