//! `tsp` — travelling-salesman demo binary (§6/§11.1).
//!
//! Loads a distance-matrix file, runs both `DirectRunner` and
//! `WorkStealingRunner` (mirroring the original `tsp.cpp`'s side-by-side
//! comparison), and prints the work-stealing result as a CSV-like line.

use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use taskstorm::error::SchedError;
use taskstorm::runner::{DirectRunner, WorkStealingRunner};
use taskstorm::solvers::tsp::{Graph, TSPTask, TspContext};
use taskstorm::task::Task;

/// Fixed per-worker deque capacity; the initial partitioner's own budget
/// clamp (`max_splitted_tasks`) already bounds how many leaves a worker can
/// ever be seeded with, so this is not exposed on the CLI.
const DEQUE_CAPACITY: usize = 4096;

/// Branch-and-bound travelling-salesman solver.
#[derive(Parser)]
#[command(name = "tsp")]
struct Cli {
    /// Whitespace-delimited distance-matrix file (node count, then the
    /// row-major matrix).
    file: String,

    /// Expected graph size; if given, must match the file's node count.
    graph_size: Option<usize>,

    /// Worker thread count.
    #[arg(default_value_t = 4)]
    nb_threads: usize,

    /// Upper bound on the number of leaves produced by initial partitioning.
    #[arg(default_value_t = 64)]
    max_splitted_tasks: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(line) => {
            println!("{line}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "tsp run failed");
            eprintln!("tsp: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String, SchedError> {
    let graph = Graph::load(&cli.file)?;
    let graph_size = graph.size();
    if let Some(expected) = cli.graph_size {
        if expected != graph_size {
            return Err(SchedError::Usage(format!(
                "graph file has {graph_size} nodes, expected {expected}"
            )));
        }
    }
    let ctx = TspContext::new(graph)?;

    let mut direct_task = TSPTask::new(Arc::clone(&ctx), 0);
    let mut direct_runner = DirectRunner::new();
    direct_runner.run(&mut direct_task);
    tracing::info!(
        distance = ?direct_task.result().map(|p| p.distance()),
        elapsed = ?direct_runner.duration(),
        "direct solver finished"
    );

    let root: Box<dyn Task> = Box::new(TSPTask::new(Arc::clone(&ctx), 0));
    let mut ws_runner =
        WorkStealingRunner::new(cli.nb_threads, cli.max_splitted_tasks, DEQUE_CAPACITY);
    let _leaves = ws_runner.run(root);

    let path = ctx
        .best()
        .map(|p| p.to_string())
        .unwrap_or_else(|| "[no tour found]".to_string());

    Ok(format!(
        "{};{};{};{};{:.6};{}",
        cli.file,
        graph_size,
        cli.nb_threads,
        cli.max_splitted_tasks,
        ws_runner.duration().as_secs_f64(),
        path
    ))
}
