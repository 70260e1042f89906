//! Error taxonomy for the measurement engine.
//!
//! Per-target failures (`TargetExecution`, `CalibrationTimeout`) are caught at
//! the runner boundary and recorded in that target's result slot; they never
//! abort sibling targets. `ClockUnavailable` and `InvalidConfig` are raised at
//! construction, before any target runs. `InsufficientSamples` is an internal
//! invariant check and propagates as a defect.

use thiserror::Error;

/// Boxed error type for caller-supplied targets and hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Phase of a per-target measurement in which an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Phase {
    /// The setup hook, before any timing.
    Setup,
    /// The calibration doubling search.
    Calibration,
    /// Warm-up or measured rounds.
    Measurement,
    /// The teardown hook, after all timing.
    Teardown,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Setup => "setup",
            Phase::Calibration => "calibration",
            Phase::Measurement => "measurement",
            Phase::Teardown => "teardown",
        };
        f.write_str(name)
    }
}

/// Errors produced by the benchmark engine.
#[derive(Debug, Error)]
pub enum Error {
    /// No usable monotonic clock. Fatal: no timing is possible.
    #[error("monotonic clock unavailable: {reason}")]
    ClockUnavailable {
        /// Why the clock probe failed.
        reason: String,
    },

    /// A measured callable, setup hook, or teardown hook failed.
    #[error("target {phase} failed: {source}")]
    TargetExecution {
        /// Phase in which the failure occurred.
        phase: Phase,
        /// The caller's error, unmodified.
        #[source]
        source: BoxError,
    },

    /// The calibration doubling search never cleared the resolution floor.
    #[error(
        "calibration gave up after {attempts} doubling attempts (batch size {batch}): \
         target never cleared the timer resolution floor"
    )]
    CalibrationTimeout {
        /// Number of doubling attempts made.
        attempts: u32,
        /// Batch size reached when the search was abandoned.
        batch: u64,
    },

    /// Aggregation was asked to reduce an empty sample set.
    ///
    /// Unreachable when the calibrator and collector behave correctly; if it
    /// surfaces, it indicates a defect upstream rather than a user condition.
    #[error("statistics require at least one sample")]
    InsufficientSamples,

    /// Configuration rejected by eager validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Wrap a caller error as a target-execution failure in the given phase.
    pub fn target(phase: Phase, source: BoxError) -> Self {
        Error::TargetExecution { phase, source }
    }
}
