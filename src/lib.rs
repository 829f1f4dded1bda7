//! A parallel branch-and-bound task executor built on a Chase-Lev
//! work-stealing scheduler.
//!
//! The core contract is [`Task`]: a unit of work that can either decompose
//! itself into children ([`Task::split`]/[`Task::merge`]) or solve itself
//! directly ([`Task::solve`]). Three runners execute a `Task` tree with
//! increasing sophistication:
//!
//! - [`DirectRunner`] solves the root in place — the correctness oracle.
//! - [`PartitionedRunner`] recurses sequentially, splitting, solving
//!   leaves, and merging back up — the reference implementation.
//! - [`WorkStealingRunner`] partitions the root breadth-first into an
//!   initial set of leaves, seeds them round-robin across per-thread
//!   [`Deque`]s, and runs a pool of worker threads that drain their own
//!   deque and steal from others until the run quiesces.
//!
//! Branch-and-bound domains that need cross-worker pruning (see the `tsp`
//! solver under [`solvers`]) coordinate through [`SharedBest`], a
//! lock-free cell holding the best solution found so far.

pub mod deque;
pub mod error;
pub mod runner;
pub mod shared_best;
pub mod solvers;
pub mod task;

pub use deque::{Deque, StealResult};
pub use error::{Result, SchedError};
pub use runner::{DirectRunner, PartitionedRunner, WorkStealingRunner};
pub use shared_best::{Scored, SharedBest};
pub use task::{Task, TaskCollection};
