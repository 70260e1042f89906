//! Monotonic clock abstraction and empirical resolution probing.
//!
//! All timing goes through the [`Clock`] trait so tests can substitute a
//! deterministic clock. The production implementation wraps
//! `std::time::Instant`, which is monotonic on every supported platform, and
//! measures its own resolution at construction by spinning until the reading
//! advances.

use std::time::Instant;

use crate::error::Error;

/// Source of monotonic timestamps.
///
/// `now_ns` is monotonically non-decreasing. `resolution_ns` is the smallest
/// observable delta between two readings; the calibrator uses it to size
/// rounds so quantization error stays negligible.
pub trait Clock {
    /// Nanoseconds since an arbitrary fixed origin.
    fn now_ns(&self) -> u64;

    /// Smallest observable time delta, in nanoseconds.
    fn resolution_ns(&self) -> f64;
}

/// Spins per probe before declaring the clock stuck.
const PROBE_SPIN_LIMIT: u32 = 10_000_000;

/// Probes taken when estimating resolution; the minimum positive delta wins.
const PROBE_ROUNDS: u32 = 100;

/// Production clock backed by `std::time::Instant`.
///
/// Readings are nanoseconds since construction. Resolution is probed once at
/// construction and cached.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    origin: Instant,
    resolution_ns: f64,
}

impl MonotonicClock {
    /// Construct and probe resolution.
    ///
    /// # Errors
    ///
    /// `Error::ClockUnavailable` if the clock never advances within the probe
    /// bound; no meaningful benchmarking is possible on such a platform.
    pub fn new() -> Result<Self, Error> {
        let origin = Instant::now();
        let resolution_ns = probe_resolution_ns(origin)?;
        Ok(Self {
            origin,
            resolution_ns,
        })
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now_ns(&self) -> u64 {
        // u64 nanoseconds cover ~584 years of process uptime.
        self.origin.elapsed().as_nanos() as u64
    }

    fn resolution_ns(&self) -> f64 {
        self.resolution_ns
    }
}

/// Find the minimum observable positive delta by sampling in a tight loop.
fn probe_resolution_ns(origin: Instant) -> Result<f64, Error> {
    let mut min_delta = u64::MAX;

    for _ in 0..PROBE_ROUNDS {
        let start = origin.elapsed().as_nanos() as u64;
        let mut spins = 0u32;
        loop {
            let now = origin.elapsed().as_nanos() as u64;
            if now > start {
                let delta = now - start;
                if delta < min_delta {
                    min_delta = delta;
                }
                break;
            }
            spins += 1;
            if spins >= PROBE_SPIN_LIMIT {
                return Err(Error::ClockUnavailable {
                    reason: format!(
                        "Instant did not advance within {PROBE_SPIN_LIMIT} consecutive reads"
                    ),
                });
            }
        }
    }

    Ok((min_delta as f64).max(1.0))
}
