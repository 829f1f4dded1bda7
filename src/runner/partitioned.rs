//! PartitionedRunner (§4.4): sequential divide-conquer-merge reference.

use super::timer::Timer;
use crate::task::{Task, TaskCollection};
use std::time::Duration;

/// Recursively splits, recurses depth-first into each child, and merges —
/// or solves directly at a leaf. Single-threaded; used as the sequential
/// baseline the parallel runner's leaf-level results must agree with.
pub struct PartitionedRunner {
    max: usize,
    timer: Timer,
}

impl PartitionedRunner {
    /// `max` bounds how many children a single `split()` call may produce
    /// (mirrors the reference's fixed-size `partitions[]` array bound).
    pub fn new(max: usize) -> Self {
        PartitionedRunner {
            max: max.max(1),
            timer: Timer::new(),
        }
    }

    pub fn run(&mut self, root: &mut dyn Task) {
        self.timer.start();
        Self::recurse(root, self.max);
        self.timer.stop();
    }

    fn recurse(task: &mut dyn Task, max: usize) {
        let mut collection = TaskCollection::with_capacity(max);
        let n = task.split(&mut collection);
        if n == 0 {
            task.solve();
            return;
        }
        let mut children = collection.into_vec();
        for child in children.iter_mut() {
            Self::recurse(child.as_mut(), max);
        }
        let mut collection = TaskCollection::from_vec(children);
        task.merge(&mut collection);
    }

    pub fn duration(&self) -> Duration {
        self.timer.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solvers::intsort::IntVecSortTask;

    #[test]
    fn matches_std_sort() {
        let mut data: Vec<i32> = vec![52, 3, 99, 1, 42, 7, 0, -5, 1000, 8];
        let mut expected = data.clone();
        expected.sort();

        let mut task = IntVecSortTask::new(data.drain(..).collect());
        let mut runner = PartitionedRunner::new(2);
        runner.run(&mut task);

        assert_eq!(task.result(), &expected[..]);
    }
}
