//! Distance-matrix graph loader (§4.7/§11.3) for the travelling-salesman
//! solver.
//!
//! The original `tspgraph.hpp` was not present in the retrieved source; the
//! whitespace-delimited format parsed here (a leading node count followed
//! by `size * size` row-major distances) is the simplest one consistent
//! with `tsp.cpp`'s `TSPGraph graph(argv[1])` construction and with
//! `tsptask.hpp`'s `graph.size()`/`graph.distance(a, b)` usage.

use crate::error::{Result, SchedError};
use std::fs;
use std::path::Path;

use super::path::TSPPath;

pub struct Graph {
    size: usize,
    distances: Vec<i64>,
}

impl Graph {
    /// Build a graph directly from a square row-major distance matrix
    /// (used by tests that hard-code a small matrix rather than round-trip
    /// through a file).
    pub fn complete(matrix: Vec<Vec<i64>>) -> Result<Graph> {
        let size = matrix.len();
        if matrix.iter().any(|row| row.len() != size) {
            return Err(SchedError::MalformedGraphFile(
                "distance matrix is not square".to_string(),
            ));
        }
        if size > TSPPath::MAX_GRAPH {
            return Err(SchedError::GraphTooLarge {
                size,
                max: TSPPath::MAX_GRAPH,
            });
        }
        let mut distances = Vec::with_capacity(size * size);
        for row in matrix {
            distances.extend(row);
        }
        Ok(Graph { size, distances })
    }

    /// Parse the whitespace-delimited `<size> <d00> <d01> ... <d(n-1)(n-1)>`
    /// format described above.
    pub fn load(path: impl AsRef<Path>) -> Result<Graph> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            SchedError::MalformedGraphFile(format!("{}: {e}", path.display()))
        })?;

        let mut tokens = contents.split_ascii_whitespace();
        let size: usize = tokens
            .next()
            .ok_or_else(|| SchedError::MalformedGraphFile("empty graph file".to_string()))?
            .parse()
            .map_err(|_| SchedError::MalformedGraphFile("node count is not an integer".to_string()))?;

        if size > TSPPath::MAX_GRAPH {
            return Err(SchedError::GraphTooLarge {
                size,
                max: TSPPath::MAX_GRAPH,
            });
        }

        let expected = size * size;
        let mut distances = Vec::with_capacity(expected);
        for tok in tokens.by_ref().take(expected) {
            let d: i64 = tok.parse().map_err(|_| {
                SchedError::MalformedGraphFile(format!("non-integer distance token {tok:?}"))
            })?;
            distances.push(d);
        }

        if distances.len() != expected {
            return Err(SchedError::MalformedGraphFile(format!(
                "expected {expected} distances for a {size}x{size} graph, found {}",
                distances.len()
            )));
        }

        Ok(Graph { size, distances })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn distance(&self, a: usize, b: usize) -> i64 {
        self.distances[a * self.size + b]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_rejects_oversized_graph() {
        let matrix = vec![vec![0i64; TSPPath::MAX_GRAPH + 1]; TSPPath::MAX_GRAPH + 1];
        assert!(matches!(
            Graph::complete(matrix),
            Err(SchedError::GraphTooLarge { .. })
        ));
    }

    #[test]
    fn complete_rejects_non_square() {
        let matrix = vec![vec![0i64, 1], vec![1, 0, 2]];
        assert!(matches!(
            Graph::complete(matrix),
            Err(SchedError::MalformedGraphFile(_))
        ));
    }

    #[test]
    fn distance_lookup() {
        let graph = Graph::complete(vec![
            vec![0, 10, 15],
            vec![10, 0, 35],
            vec![15, 35, 0],
        ])
        .unwrap();
        assert_eq!(graph.size(), 3);
        assert_eq!(graph.distance(0, 1), 10);
        assert_eq!(graph.distance(1, 2), 35);
    }
}
