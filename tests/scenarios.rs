//! Integration tests covering the executor's end-to-end scenarios and
//! cross-runner invariants.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use taskstorm::runner::{DirectRunner, PartitionedRunner, WorkStealingRunner};
use taskstorm::solvers::intsort::IntVecSortTask;
use taskstorm::solvers::tsp::{Graph, TSPTask, TspContext};
use taskstorm::task::Task;

fn five_city_graph() -> Graph {
    Graph::complete(vec![
        vec![0, 10, 15, 20, 25],
        vec![10, 0, 35, 25, 30],
        vec![15, 35, 0, 30, 20],
        vec![20, 25, 30, 0, 15],
        vec![25, 30, 20, 15, 0],
    ])
    .unwrap()
}

/// S1 at scale: a deterministic 100-element vector sorted identically by
/// `DirectRunner` and `PartitionedRunner`.
#[test]
fn intsort_direct_and_partitioned_agree_at_scale() {
    let mut rng = StdRng::seed_from_u64(42);
    let data: Vec<i32> = (0..100).map(|_| rng.random_range(0..1000)).collect();

    let mut direct_task = IntVecSortTask::new(data.clone());
    DirectRunner::new().run(&mut direct_task);

    let mut partitioned_task = IntVecSortTask::new(data);
    PartitionedRunner::new(2).run(&mut partitioned_task);

    assert_eq!(direct_task.result(), partitioned_task.result());

    let mut expected = direct_task.result().to_vec();
    expected.sort();
    assert_eq!(direct_task.result(), &expected[..]);
}

/// Invariant 1: `DirectRunner` and `WorkStealingRunner` agree on TSP tour
/// cost (the tour itself may differ among equal-cost tours).
#[test]
fn tsp_direct_and_work_stealing_agree_on_cost() {
    let ctx_direct = TspContext::new(five_city_graph()).unwrap();
    let mut direct_task = TSPTask::new(Arc::clone(&ctx_direct), 0);
    DirectRunner::new().run(&mut direct_task);
    let direct_cost = direct_task.result().unwrap().distance();

    let ctx_ws = TspContext::new(five_city_graph()).unwrap();
    let root: Box<dyn Task> = Box::new(TSPTask::new(Arc::clone(&ctx_ws), 0));
    let mut ws_runner = WorkStealingRunner::new(4, 12, 64);
    ws_runner.run(root);
    let ws_cost = ctx_ws.best().unwrap().distance();

    assert_eq!(direct_cost, ws_cost);
    assert_eq!(direct_cost, 85);
}

/// `Graph::load` round-trips a file in the documented format.
#[test]
fn graph_load_round_trips_a_file() {
    let mut path = std::env::temp_dir();
    path.push(format!("taskstorm-test-graph-{}.txt", std::process::id()));
    std::fs::write(&path, "3\n0 10 15\n10 0 35\n15 35 0\n").unwrap();

    let graph = Graph::load(&path).unwrap();
    assert_eq!(graph.size(), 3);
    assert_eq!(graph.distance(0, 1), 10);
    assert_eq!(graph.distance(2, 1), 35);

    std::fs::remove_file(&path).ok();
}

/// A malformed graph file is reported as a `SchedError`, not a panic.
#[test]
fn graph_load_rejects_malformed_file() {
    let mut path = std::env::temp_dir();
    path.push(format!("taskstorm-test-bad-graph-{}.txt", std::process::id()));
    std::fs::write(&path, "3\n0 10\n").unwrap();

    let result = Graph::load(&path);
    assert!(result.is_err());

    std::fs::remove_file(&path).ok();
}
