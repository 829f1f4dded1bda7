//! Integer-vector quicksort-by-partition task (§5, "integer vector sort").
//!
//! Splits by a single pivot-partition step (the first element is the
//! pivot) into a `left` bucket (strictly less than pivot) and a `right`
//! bucket (greater-or-equal), with the pivot folded into whichever side is
//! non-empty. Each bucket sorts itself independently at its leaf, and
//! `merge` simply concatenates the two already-sorted buckets back
//! together in `left, right` order — no interleaving merge step is needed,
//! because partitioning already guarantees every element of `left` is no
//! greater than every element of `right`.

use crate::task::{Task, TaskCollection};
use std::any::Any;
use std::fmt;

pub struct IntVecSortTask {
    data: Vec<i32>,
}

impl IntVecSortTask {
    pub fn new(data: Vec<i32>) -> Self {
        IntVecSortTask { data }
    }

    /// The sorted (once `solve`/`merge` has run) contents.
    pub fn result(&self) -> &[i32] {
        &self.data
    }
}

impl Task for IntVecSortTask {
    fn split(&mut self, collection: &mut TaskCollection) -> usize {
        if self.data.len() < 3 {
            return 0;
        }

        let pivot = self.data[0];
        let mut left = Vec::with_capacity(self.data.len());
        let mut right = Vec::with_capacity(self.data.len());
        for &v in &self.data[1..] {
            if v < pivot {
                left.push(v);
            } else {
                right.push(v);
            }
        }
        if !right.is_empty() {
            left.push(pivot);
        } else {
            right.push(pivot);
        }

        collection.push(Box::new(IntVecSortTask::new(left)));
        collection.push(Box::new(IntVecSortTask::new(right)));
        2
    }

    fn merge(&mut self, collection: &mut TaskCollection) {
        self.data.clear();
        for child in collection.drain() {
            let child = child
                .as_any()
                .downcast_ref::<IntVecSortTask>()
                .expect("IntVecSortTask::merge given a non-IntVecSortTask child");
            self.data.extend_from_slice(&child.data);
        }
    }

    fn solve(&mut self) {
        self.data.sort_unstable();
    }

    fn write(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Display for IntVecSortTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Task::write(self, f)
    }
}
