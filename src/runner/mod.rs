//! The three task runners (§4.3-§4.5): `DirectRunner` (oracle),
//! `PartitionedRunner` (sequential divide-conquer-merge), and
//! `WorkStealingRunner` (the parallel executor).

mod direct;
mod partitioned;
mod timer;
mod workstealing;

pub use direct::DirectRunner;
pub use partitioned::PartitionedRunner;
pub use workstealing::WorkStealingRunner;
