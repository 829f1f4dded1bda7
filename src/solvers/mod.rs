//! Concrete [`crate::task::Task`] implementations (§5).

pub mod intsort;
pub mod tsp;
