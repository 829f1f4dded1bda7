//! DirectRunner (§4.3): the correctness oracle.

use super::timer::Timer;
use crate::task::Task;
use std::time::Duration;

/// Solves the root task in place, once, with no concurrency.
#[derive(Default)]
pub struct DirectRunner {
    timer: Timer,
}

impl DirectRunner {
    pub fn new() -> Self {
        DirectRunner { timer: Timer::new() }
    }

    pub fn run(&mut self, root: &mut dyn Task) {
        self.timer.start();
        root.solve();
        self.timer.stop();
    }

    pub fn duration(&self) -> Duration {
        self.timer.elapsed()
    }
}
