//! Crate-wide error type.
//!
//! Follows the hand-written enum + manual `Display`/`Error` style rather than
//! reaching for a derive-macro crate: the set of non-panicking error cases is
//! small and fixed (see §7 of the design spec), so a macro buys nothing here.

use std::fmt;

/// Non-panicking failure modes exposed by this crate.
///
/// Scheduler-internal programming errors (deque overflow, budget
/// miscalculation) are *not* represented here: per the recovery policy they
/// are fatal conditions reported via `panic!`, not recoverable `Result`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedError {
    /// Graph has more nodes than `TSPPath::MAX_GRAPH`.
    GraphTooLarge { size: usize, max: usize },
    /// A node index fell outside `0..graph.size()`.
    NodeOutOfRange { node: usize, size: usize },
    /// The `.tsp` distance-matrix file could not be parsed.
    MalformedGraphFile(String),
    /// Bad CLI invocation.
    Usage(String),
}

impl fmt::Display for SchedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedError::GraphTooLarge { size, max } => {
                write!(f, "graph size {size} exceeds MAX_GRAPH ({max})")
            }
            SchedError::NodeOutOfRange { node, size } => {
                write!(f, "node {node} is outside graph of size {size}")
            }
            SchedError::MalformedGraphFile(msg) => write!(f, "malformed graph file: {msg}"),
            SchedError::Usage(msg) => write!(f, "usage error: {msg}"),
        }
    }
}

impl std::error::Error for SchedError {}

/// Result type for fallible crate operations.
pub type Result<T> = std::result::Result<T, SchedError>;
