//! Shared wall-clock timer used by every runner (§4.3-§4.5), mirroring the
//! reference `TaskRunner` base class's protected `startTimer`/`stopTimer`.

use std::time::{Duration, Instant};

#[derive(Default)]
pub(crate) struct Timer {
    start: Option<Instant>,
    elapsed: Duration,
}

impl Timer {
    pub(crate) fn new() -> Self {
        Timer::default()
    }

    pub(crate) fn start(&mut self) {
        self.start = Some(Instant::now());
    }

    pub(crate) fn stop(&mut self) {
        if let Some(start) = self.start.take() {
            self.elapsed = start.elapsed();
        }
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.elapsed
    }
}
