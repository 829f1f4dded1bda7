//! Benchmarks for the Chase-Lev deque, compared against `crossbeam-deque`
//! as an external baseline (the teacher crate's own benches used `bencher`
//! against its `Stack`; here the comparison point is a well-known deque of
//! the same family instead of this crate's own prior art).

use criterion::{criterion_group, criterion_main, Criterion};
use taskstorm::task::{Task, TaskCollection};
use taskstorm::Deque;

const N: usize = 1000;

struct NoopTask;
impl Task for NoopTask {
    fn split(&mut self, _c: &mut TaskCollection) -> usize {
        0
    }
    fn merge(&mut self, _c: &mut TaskCollection) {}
    fn solve(&mut self) {}
    fn write(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NoopTask")
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

fn bench_push_pop(c: &mut Criterion) {
    c.bench_function("deque_lifo_push_pop_1000", |b| {
        b.iter(|| {
            let deque = Deque::new(N);
            for _ in 0..N {
                deque.push_bottom(Box::new(NoopTask)).unwrap();
            }
            for _ in 0..N {
                deque.pop_bottom();
            }
        });
    });
}

fn bench_crossbeam_baseline(c: &mut Criterion) {
    c.bench_function("crossbeam_deque_lifo_push_pop_1000", |b| {
        b.iter(|| {
            let worker = crossbeam_deque::Worker::<u64>::new_lifo();
            for i in 0..N as u64 {
                worker.push(i);
            }
            for _ in 0..N {
                worker.pop();
            }
        });
    });
}

criterion_group!(benches, bench_push_pop, bench_crossbeam_baseline);
criterion_main!(benches);
