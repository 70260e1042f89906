//! Shared fixtures: a deterministic virtual clock driven by the targets that
//! share its state, so plans and samples can be asserted exactly.

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use microbench::Clock;

/// Clock whose reading only moves when a [`ClockHandle`] advances it.
pub struct VirtualClock {
    now: Rc<Cell<u64>>,
    resolution_ns: f64,
}

impl VirtualClock {
    pub fn new(resolution_ns: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(0)),
            resolution_ns,
        }
    }

    /// Handle for targets to advance virtual time from inside their calls.
    pub fn handle(&self) -> ClockHandle {
        ClockHandle {
            now: Rc::clone(&self.now),
        }
    }
}

impl Clock for VirtualClock {
    fn now_ns(&self) -> u64 {
        self.now.get()
    }

    fn resolution_ns(&self) -> f64 {
        self.resolution_ns
    }
}

#[derive(Clone)]
pub struct ClockHandle {
    now: Rc<Cell<u64>>,
}

impl ClockHandle {
    pub fn advance(&self, ns: u64) {
        self.now.set(self.now.get() + ns);
    }
}

/// Shared invocation counter for asserting exactly how often a target ran.
#[derive(Clone, Default)]
pub struct CallCounter {
    count: Rc<Cell<u64>>,
}

impl CallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bump(&self) {
        self.count.set(self.count.get() + 1);
    }

    pub fn get(&self) -> u64 {
        self.count.get()
    }
}
