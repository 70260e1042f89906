//! Sample collection: executing an iteration plan against a target.
//!
//! Rounds are timed as a whole, one clock read before and one after
//! `iterations_per_round` back-to-back invocations, so per-call clock-read
//! overhead never lands inside the measurement. The round duration divided by
//! the iteration count becomes one normalized per-call sample.

use crate::error::{Error, Phase};
use crate::measurement::calibrator::IterationPlan;
use crate::measurement::clock::Clock;
use crate::target::Target;

/// Raw output of one target's measured rounds, in execution order.
#[derive(Debug, Clone)]
pub struct RawSamples {
    /// One normalized per-call duration per round, nanoseconds.
    pub per_call_ns: Vec<f64>,
    /// Sum of all measured round durations, nanoseconds.
    pub total_measured_ns: f64,
}

/// Execute the plan: warm-up rounds (discarded), then measured rounds.
///
/// If any invocation fails, collection stops immediately and the partial
/// samples are dropped; a corrupted sample set is never returned. Setup and
/// teardown hooks are the runner's responsibility and happen outside this
/// function, so nothing here runs inside the caller's timed region twice.
///
/// # Errors
///
/// `Error::TargetExecution` with `Phase::Measurement` on any target failure,
/// during warm-up or measured rounds alike.
pub fn collect(
    clock: &dyn Clock,
    target: &mut dyn Target,
    plan: &IterationPlan,
) -> Result<RawSamples, Error> {
    let warmup_calls = plan.warmup_rounds * plan.iterations_per_round;
    for _ in 0..warmup_calls {
        target
            .call()
            .map_err(|source| Error::target(Phase::Measurement, source))?;
    }

    let mut per_call_ns = Vec::with_capacity(plan.rounds as usize);
    let mut total_measured_ns = 0.0;

    for _ in 0..plan.rounds {
        let start = clock.now_ns();
        for _ in 0..plan.iterations_per_round {
            target
                .call()
                .map_err(|source| Error::target(Phase::Measurement, source))?;
        }
        let elapsed = clock.now_ns().saturating_sub(start) as f64;
        total_measured_ns += elapsed;
        per_call_ns.push(elapsed / plan.iterations_per_round as f64);
    }

    Ok(RawSamples {
        per_call_ns,
        total_measured_ns,
    })
}
