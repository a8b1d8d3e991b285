//! Monotonic millisecond clock seam
//!
//! The simulation never reads wall-clock time directly; the scheduler samples
//! a host-provided clock exactly once per frame and threads that sample
//! through every time-dependent computation of the tick.

use std::cell::Cell;
use std::time::Instant;

/// Monotonically non-decreasing time source, in milliseconds.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Real clock backed by `Instant`, measured from construction.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Scripted clock for tests and deterministic playback.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    /// Jump to an absolute time. Never moves backwards.
    pub fn set(&self, now_ms: f64) {
        if now_ms > self.now.get() {
            self.now.set(now_ms);
        }
    }

    pub fn advance(&self, delta_ms: f64) {
        if delta_ms > 0.0 {
            self.now.set(self.now.get() + delta_ms);
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

impl<C: Clock> Clock for &C {
    fn now_ms(&self) -> f64 {
        (*self).now_ms()
    }
}
