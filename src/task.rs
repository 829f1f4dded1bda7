//! The Task contract (§4.1) and its transient child container.

use std::any::Any;
use std::fmt;

/// A unit of divisible work.
///
/// A `Task` may either decompose itself into children via [`Task::split`]
/// (to be solved and later folded back in via [`Task::merge`]), or solve
/// itself directly via [`Task::solve`]. Every task owned by a runner is
/// boxed as `Box<dyn Task>`, the Rust analogue of the original's virtual
/// dispatch table; `Drop` plays the role of the virtual destructor.
///
/// `split`/`merge`/`solve` all take `&mut self`: the runner never hands out
/// a `&mut` reference to the same task from more than one thread at a time
/// — ownership moves with the task as it is pushed, popped, or stolen.
pub trait Task: Send {
    /// Attempt to decompose into children, pushing them onto `collection`.
    ///
    /// Returns the number of children appended. Returning `0` designates
    /// this task as a leaf: no children were pushed, and the caller must
    /// invoke [`Task::solve`] on it directly rather than recursing.
    fn split(&mut self, collection: &mut TaskCollection) -> usize;

    /// Fold the solved children produced by a prior `split` back into this
    /// task's own state.
    ///
    /// Called at most once per surviving parent, with `collection` holding
    /// exactly the children `split` produced, in the same order, each
    /// already solved (directly or via further split/solve/merge of its own
    /// subtree). Must drain `collection`.
    fn merge(&mut self, collection: &mut TaskCollection);

    /// Execute the terminal computation for a leaf task.
    ///
    /// Must not call `split` or `merge`. Must be safe to run concurrently
    /// with `solve()` on sibling tasks: the only mutable state shared across
    /// tasks is whatever is reached through a documented atomic protocol
    /// (e.g. [`crate::shared_best::SharedBest`]).
    fn solve(&mut self);

    /// Render a human-readable form. Read-only; safe to call after `run()`
    /// completes.
    fn write(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    /// Escape hatch back to the concrete type, so a runner that hands back
    /// solved leaves as `Box<dyn Task>` (see
    /// [`crate::runner::WorkStealingRunner::run`]) lets callers recover their
    /// own result type via `downcast_ref`.
    fn as_any(&self) -> &dyn Any;
}

impl fmt::Display for dyn Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f)
    }
}

/// An ordered sequence of [`Task`]s used once per [`Task::split`] call to
/// publish children to the runner.
///
/// The collection owns whatever it holds: dropping it (or calling
/// [`TaskCollection::clear`]) frees any tasks it still contains, matching
/// the reference implementation's explicit `delete` of discarded children.
#[derive(Default)]
pub struct TaskCollection {
    tasks: Vec<Box<dyn Task>>,
}

impl TaskCollection {
    /// Create an empty collection, optionally reserving capacity.
    pub fn new() -> Self {
        TaskCollection { tasks: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        TaskCollection {
            tasks: Vec::with_capacity(capacity),
        }
    }

    /// Append a task to the end of the collection.
    pub fn push(&mut self, task: Box<dyn Task>) {
        self.tasks.push(task);
    }

    /// Remove and return the most recently pushed task (LIFO).
    pub fn pop(&mut self) -> Option<Box<dyn Task>> {
        self.tasks.pop()
    }

    /// Number of tasks currently held.
    pub fn size(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Drop every task currently held, leaving the collection empty.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Consume the collection, yielding its tasks in push order.
    pub fn into_vec(self) -> Vec<Box<dyn Task>> {
        self.tasks
    }

    /// Take every task out of the collection (in push order), leaving it
    /// empty. Used by `merge` implementations, which only ever borrow the
    /// collection `split` populated.
    pub fn drain(&mut self) -> Vec<Box<dyn Task>> {
        std::mem::take(&mut self.tasks)
    }

    /// Build a collection directly from a `Vec` (used by the runner when
    /// re-homing leaves produced during initial partitioning).
    pub fn from_vec(tasks: Vec<Box<dyn Task>>) -> Self {
        TaskCollection { tasks }
    }
}

impl std::ops::Index<usize> for TaskCollection {
    type Output = Box<dyn Task>;
    fn index(&self, i: usize) -> &Box<dyn Task> {
        &self.tasks[i]
    }
}

impl std::ops::IndexMut<usize> for TaskCollection {
    fn index_mut(&mut self, i: usize) -> &mut Box<dyn Task> {
        &mut self.tasks[i]
    }
}
