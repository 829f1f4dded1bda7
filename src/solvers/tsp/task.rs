//! Branch-and-bound TSP task (§4.7), grounded on `tsptask.hpp`'s `TSPTask`.

use super::graph::Graph;
use super::path::{TSPPath, FIRST_NODE};
use crate::error::{Result, SchedError};
use crate::shared_best::SharedBest;
use crate::task::{Task, TaskCollection};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Shared state every `TSPTask` in one run holds a handle to: the distance
/// matrix and the cross-worker best-tour cell. An `Arc` rather than the
/// original's file-scope `static` so two runs (e.g. two tests calling
/// `WorkStealingRunner::run` concurrently) stay isolated from each other.
pub struct TspContext {
    graph: Graph,
    best: SharedBest<TSPPath>,
}

impl TspContext {
    pub fn new(graph: Graph) -> Result<Arc<TspContext>> {
        if graph.size() > TSPPath::MAX_GRAPH {
            return Err(SchedError::GraphTooLarge {
                size: graph.size(),
                max: TSPPath::MAX_GRAPH,
            });
        }
        Ok(Arc::new(TspContext {
            graph,
            best: SharedBest::new(),
        }))
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Best tour found so far, if any `solve()` has completed a full tour.
    pub fn best(&self) -> Option<TSPPath> {
        self.best.get().cloned()
    }
}

pub struct TSPTask {
    path: TSPPath,
    cutoff_size: usize,
    ctx: Arc<TspContext>,
}

impl TSPTask {
    /// `cutoff` mirrors the reference constructor's parameter: splitting
    /// stops once the path holds `graph.size() - cutoff` nodes. `cutoff=0`
    /// (used by the direct-solve comparison) means splitting never pays off
    /// before `solve()`'s own recursion takes over; larger values let the
    /// initial partitioner carve more levels off before handing leaves to
    /// the runner.
    pub fn new(ctx: Arc<TspContext>, cutoff: usize) -> Self {
        let full = ctx.graph().size();
        TSPTask {
            path: TSPPath::new(),
            cutoff_size: full.saturating_sub(cutoff),
            ctx,
        }
    }

    /// The best completed tour found via this task's shared context.
    pub fn result(&self) -> Option<TSPPath> {
        self.ctx.best()
    }

    fn solve_recursive(&mut self) {
        let full = self.ctx.graph().size();

        if self.path.size() == full {
            self.path
                .push(FIRST_NODE, self.ctx.graph())
                .expect("FIRST_NODE is always within graph.size()");
            self.ctx.best.publish(self.path.clone());
            self.path.pop(self.ctx.graph());
            return;
        }

        // Candidate order matters for pruning quality, not correctness:
        // exploring the nearest unvisited city first tightens `best` sooner,
        // so later branches get cut off earlier.
        let base = self.path.distance();
        let mut candidates: Vec<(u32, i64)> = Vec::with_capacity(full);
        for i in 0..full as u32 {
            if !self.path.contains(i) {
                self.path
                    .push(i, self.ctx.graph())
                    .expect("i is bounded by graph.size() above");
                let extra = self.path.distance() - base;
                self.path.pop(self.ctx.graph());
                candidates.push((i, extra));
            }
        }
        candidates.sort_by_key(|&(_, extra)| extra);

        let mut best = self.ctx.best.current_cost();
        for (node, _) in candidates {
            self.path
                .push(node, self.ctx.graph())
                .expect("node came from the bounded candidate list above");
            if self.path.distance() < best {
                self.solve_recursive();
                best = self.ctx.best.current_cost();
            }
            self.path.pop(self.ctx.graph());
        }
    }
}

impl Task for TSPTask {
    fn split(&mut self, collection: &mut TaskCollection) -> usize {
        if self.path.size() >= self.cutoff_size {
            return 0;
        }

        let full = self.ctx.graph().size();
        let mut count = 0;
        for i in 0..full as u32 {
            if !self.path.contains(i) {
                let mut child_path = self.path.clone();
                child_path
                    .push(i, self.ctx.graph())
                    .expect("i is bounded by graph.size() above");
                collection.push(Box::new(TSPTask {
                    path: child_path,
                    cutoff_size: self.cutoff_size,
                    ctx: Arc::clone(&self.ctx),
                }));
                count += 1;
            }
        }
        count
    }

    fn merge(&mut self, collection: &mut TaskCollection) {
        // Aggregate state lives in the shared `TspContext::best` cell, not on
        // any individual task, so merging is just releasing the children.
        collection.drain();
    }

    fn solve(&mut self) {
        self.solve_recursive();
    }

    fn write(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.result() {
            Some(p) => write!(f, "{p}"),
            None => write!(f, "[no tour found]"),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
