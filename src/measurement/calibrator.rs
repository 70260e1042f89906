//! Calibration: estimating per-call cost and choosing iteration counts.
//!
//! A single invocation of a fast target is often shorter than the clock can
//! resolve. The calibrator times batches of back-to-back invocations, doubling
//! the batch size until the batch duration clears the resolution floor, then
//! sizes rounds so each measured round is long enough that timer quantization
//! and call-dispatch overhead contribute negligible relative error.

use crate::config::{Config, IterationsPerRound};
use crate::error::{Error, Phase};
use crate::measurement::clock::Clock;
use crate::target::Target;

/// The calibrator's output: how a target will be measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationPlan {
    /// Full rounds run and discarded before sampling starts.
    pub warmup_rounds: u64,
    /// Invocations per measured round, timed as one unit.
    pub iterations_per_round: u64,
    /// Measured rounds; each yields one per-call sample.
    pub rounds: u64,
    /// Per-call duration estimate from calibration, in nanoseconds.
    ///
    /// `None` when iterations were fixed by configuration and no calibration
    /// timing was taken.
    pub per_call_estimate_ns: Option<f64>,
    /// Batch size the doubling search ended on (1 when a single invocation
    /// already cleared the resolution floor, or when iterations were fixed).
    pub calibration_batch: u64,
}

impl IterationPlan {
    /// Total measured invocations the plan will perform (excluding warm-up).
    pub fn measured_invocations(&self) -> u64 {
        self.iterations_per_round * self.rounds
    }
}

/// Produce an [`IterationPlan`] for one target.
///
/// With `IterationsPerRound::Auto`, runs the doubling search described in the
/// module docs and derives `iterations_per_round` as
/// `ceil(min_round_duration / per_call_estimate)`, floored at 1. With
/// `Fixed(n)`, trusts the caller and performs no timing at all, which matters for
/// cold-start measurements where any extra invocation would warm the target.
///
/// # Errors
///
/// - `Error::TargetExecution` with `Phase::Calibration` if the target fails;
///   calibration failure aborts this target only.
/// - `Error::CalibrationTimeout` if the doubling search exhausts its bound
///   without clearing the resolution floor.
pub fn calibrate(
    clock: &dyn Clock,
    target: &mut dyn Target,
    config: &Config,
) -> Result<IterationPlan, Error> {
    if let IterationsPerRound::Fixed(n) = config.iterations_per_round {
        return Ok(IterationPlan {
            warmup_rounds: config.warmup_rounds,
            iterations_per_round: n,
            rounds: config.rounds,
            per_call_estimate_ns: None,
            calibration_batch: 1,
        });
    }

    let resolution_ns = clock.resolution_ns().max(1.0);
    let min_round_ns = config.min_round_ns(resolution_ns);

    let mut batch: u64 = 1;
    let mut attempts: u32 = 0;
    let per_call_ns = loop {
        let elapsed_ns = time_batch(clock, target, batch)?;
        if elapsed_ns as f64 >= resolution_ns {
            break elapsed_ns as f64 / batch as f64;
        }
        attempts += 1;
        if attempts >= config.max_calibration_doublings {
            return Err(Error::CalibrationTimeout { attempts, batch });
        }
        batch = batch.saturating_mul(2);
    };

    let iterations_per_round = ((min_round_ns / per_call_ns).ceil() as u64).max(1);

    Ok(IterationPlan {
        warmup_rounds: config.warmup_rounds,
        iterations_per_round,
        rounds: config.rounds,
        per_call_estimate_ns: Some(per_call_ns),
        calibration_batch: batch,
    })
}

/// Time `batch` back-to-back invocations as a single unit.
fn time_batch(clock: &dyn Clock, target: &mut dyn Target, batch: u64) -> Result<u64, Error> {
    let start = clock.now_ns();
    for _ in 0..batch {
        target
            .call()
            .map_err(|source| Error::target(Phase::Calibration, source))?;
    }
    Ok(clock.now_ns().saturating_sub(start))
}
