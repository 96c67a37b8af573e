//! Virtual timeline shared by the bank and the Clock capability.

use std::cell::Cell;
use std::rc::Rc;

/// A monotonically advancing virtual clock, in nanoseconds.
///
/// Cloning yields a handle onto the same timeline; the bank and the delay
/// provider share one so that busy-waits and bus operations move the same
/// notion of "now". Not `Send` — the tester is single-threaded by design.
#[derive(Clone, Default)]
pub struct Timeline {
    now_ns: Rc<Cell<u64>>,
}

impl Timeline {
    /// New timeline at t = 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in nanoseconds.
    pub fn now_ns(&self) -> u64 {
        self.now_ns.get()
    }

    /// Advance virtual time.
    pub fn advance_ns(&self, ns: u64) {
        self.now_ns.set(self.now_ns.get().saturating_add(ns));
    }
}

/// Blocking delay provider over a [`Timeline`].
///
/// Implements [`embedded_hal::delay::DelayNs`]: a "busy-wait" simply
/// advances the shared clock, so a 0.75 s recovery pause costs nothing in
/// wall time.
#[derive(Clone)]
pub struct SimDelay {
    timeline: Timeline,
}

impl SimDelay {
    /// Delay provider bound to `timeline`.
    pub fn new(timeline: Timeline) -> Self {
        Self { timeline }
    }
}

impl embedded_hal::delay::DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.timeline.advance_ns(u64::from(ns));
    }
}
