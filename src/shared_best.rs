//! SharedBest pattern (§4.6): atomic cross-worker pruning cell for
//! branch-and-bound tasks.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicPtr, Ordering};

/// Anything a [`SharedBest`] cell can hold must expose a total-order cost
/// so workers can decide whether a candidate improves on the current best.
pub trait Scored {
    fn cost(&self) -> i64;
}

/// A single atomic pointer to the best-known solution, plus a graveyard of
/// superseded pointers kept alive until the owning run ends.
///
/// Per §4.6/§9, reclamation is leak-then-sweep: every CAS attempt — win or
/// lose — hands its superseded pointer to the graveyard instead of freeing
/// it immediately, so no reader ever observes a freed pointer mid-run. The
/// graveyard (plus whatever is still live in `best`) is freed by `Drop`,
/// i.e. at run-end, exactly as the design note specifies.
pub struct SharedBest<T: Scored> {
    best: AtomicPtr<T>,
    graveyard: Mutex<Vec<*mut T>>,
}

// SAFETY: `T: Send` is required by `new`'s bound via `publish`/`get`; the
// pointer is only ever read after an acquire-load establishes
// happens-before with the release-equivalent `compare_exchange` that
// published it.
unsafe impl<T: Scored + Send> Sync for SharedBest<T> {}

impl<T: Scored> SharedBest<T> {
    pub fn new() -> Self {
        SharedBest {
            best: AtomicPtr::new(std::ptr::null_mut()),
            graveyard: Mutex::new(Vec::new()),
        }
    }

    /// Acquire-load the cost of the current best, or `i64::MAX` if none has
    /// been published yet.
    pub fn current_cost(&self) -> i64 {
        let p = self.best.load(Ordering::Acquire);
        if p.is_null() {
            i64::MAX
        } else {
            unsafe { (*p).cost() }
        }
    }

    /// Attempt to publish `candidate` as the new best, per the CAS loop of
    /// §4.6. No-ops (dropping `candidate`) if it does not improve on the
    /// current best by the time the race is resolved.
    pub fn publish(&self, candidate: T) {
        let mut candidate_ptr = Box::into_raw(Box::new(candidate));
        loop {
            let current = self.best.load(Ordering::Acquire);
            let current_cost = if current.is_null() {
                i64::MAX
            } else {
                unsafe { (*current).cost() }
            };

            let candidate_cost = unsafe { (*candidate_ptr).cost() };
            if candidate_cost >= current_cost {
                // Not an improvement: drop the candidate we allocated.
                drop(unsafe { Box::from_raw(candidate_ptr) });
                return;
            }

            match self.best.compare_exchange_weak(
                current,
                candidate_ptr,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => {
                    if !current.is_null() {
                        self.graveyard.lock().push(current);
                    }
                    return;
                }
                Err(_) => {
                    // Lost the race; loop and re-check against the winner.
                    // `candidate_ptr` is still ours to retry with.
                    continue;
                }
            }
        }
    }

    /// Snapshot of the current best, if any has been published.
    pub fn get(&self) -> Option<&T> {
        let p = self.best.load(Ordering::Acquire);
        if p.is_null() {
            None
        } else {
            Some(unsafe { &*p })
        }
    }
}

impl<T: Scored> Default for SharedBest<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scored> Drop for SharedBest<T> {
    fn drop(&mut self) {
        let p = *self.best.get_mut();
        if !p.is_null() {
            drop(unsafe { Box::from_raw(p) });
        }
        for p in self.graveyard.get_mut().drain(..) {
            drop(unsafe { Box::from_raw(p) });
        }
    }
}
