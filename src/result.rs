//! Result types handed to reporting layers.
//!
//! A suite run produces one [`BenchmarkResult`] per registered target, in
//! registration order, each carrying either a [`Summary`] or a recorded
//! [`Failure`], never neither, never both. Results are plain serde data;
//! rendering lives in [`crate::output`].

use serde::{Deserialize, Serialize};

use crate::error::{Error, Phase};
use crate::statistics::Summary;
use crate::system::EnvironmentTag;

/// How the measurement was taken; reported so callers can judge the numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementInfo {
    /// Detected clock resolution, nanoseconds.
    pub timer_resolution_ns: f64,
    /// Warm-up rounds discarded.
    pub warmup_rounds: u64,
    /// Invocations timed as one unit per round.
    pub iterations_per_round: u64,
    /// Measured rounds (= sample count).
    pub rounds: u64,
}

/// Category of a recorded per-target failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// The setup hook failed.
    Setup,
    /// The target failed while being calibrated.
    Calibration,
    /// The calibration doubling search never cleared the resolution floor.
    CalibrationTimeout,
    /// The target failed during warm-up or a measured round.
    Measurement,
    /// The teardown hook failed.
    Teardown,
    /// An engine invariant was violated; indicates a defect, not user error.
    Internal,
}

/// A per-target failure, recorded in the target's result slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    /// What went wrong.
    pub kind: FailureKind,
    /// Full error chain, rendered.
    pub message: String,
}

impl Failure {
    pub(crate) fn from_error(err: &Error) -> Self {
        let kind = match err {
            Error::TargetExecution { phase, .. } => match phase {
                Phase::Setup => FailureKind::Setup,
                Phase::Calibration => FailureKind::Calibration,
                Phase::Measurement => FailureKind::Measurement,
                Phase::Teardown => FailureKind::Teardown,
            },
            Error::CalibrationTimeout { .. } => FailureKind::CalibrationTimeout,
            Error::InsufficientSamples => FailureKind::Internal,
            // Construction-time errors never reach a result slot; if one
            // does, surface it as a defect rather than dropping it.
            Error::ClockUnavailable { .. } | Error::InvalidConfig(_) => FailureKind::Internal,
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

/// Outcome of measuring one named target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// The target's identifier.
    pub name: String,
    /// Reduced statistics; absent when the target failed.
    pub summary: Option<Summary>,
    /// Recorded failure; absent when measurement succeeded.
    pub failure: Option<Failure>,
    /// Plan and resolution details; absent when calibration never completed.
    pub measurement: Option<MeasurementInfo>,
    /// Environment tag supplied by the runner, identical across a suite.
    pub environment: EnvironmentTag,
}

impl BenchmarkResult {
    /// Whether this target produced statistics.
    pub fn is_success(&self) -> bool {
        self.summary.is_some()
    }
}

/// All results of one suite run, in registration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Environment tag shared by every result.
    pub environment: EnvironmentTag,
    /// One slot per registered target: statistics or a failure reason,
    /// never a silent omission.
    pub results: Vec<BenchmarkResult>,
}

impl SuiteReport {
    /// True when every target produced statistics. Suitable as an exit
    /// status: one failing target fails the suite without having aborted
    /// its siblings.
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(BenchmarkResult::is_success)
    }

    /// The results that recorded a failure.
    pub fn failures(&self) -> impl Iterator<Item = &BenchmarkResult> {
        self.results.iter().filter(|r| !r.is_success())
    }

    /// Look up a result by target name.
    pub fn get(&self, name: &str) -> Option<&BenchmarkResult> {
        self.results.iter().find(|r| r.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> Summary {
        Summary::from_samples(&[10.0, 12.0, 11.0], 33.0, 0.0).unwrap()
    }

    fn result(name: &str, ok: bool) -> BenchmarkResult {
        BenchmarkResult {
            name: name.into(),
            summary: ok.then(summary),
            failure: (!ok).then(|| Failure {
                kind: FailureKind::Measurement,
                message: "target measurement failed: boom".into(),
            }),
            measurement: None,
            environment: EnvironmentTag::custom("test"),
        }
    }

    #[test]
    fn all_passed_reflects_any_failure() {
        let ok = SuiteReport {
            environment: EnvironmentTag::custom("test"),
            results: vec![result("a", true), result("b", true)],
        };
        assert!(ok.all_passed());

        let mixed = SuiteReport {
            environment: EnvironmentTag::custom("test"),
            results: vec![result("a", true), result("b", false)],
        };
        assert!(!mixed.all_passed());
        assert_eq!(mixed.failures().count(), 1);
        assert_eq!(mixed.get("b").unwrap().failure.as_ref().unwrap().kind,
            FailureKind::Measurement);
    }

    #[test]
    fn failure_kind_maps_phases() {
        let err = Error::target(Phase::Setup, "no database".into());
        assert_eq!(Failure::from_error(&err).kind, FailureKind::Setup);

        let err = Error::CalibrationTimeout {
            attempts: 40,
            batch: 1 << 40,
        };
        assert_eq!(
            Failure::from_error(&err).kind,
            FailureKind::CalibrationTimeout
        );

        assert_eq!(
            Failure::from_error(&Error::InsufficientSamples).kind,
            FailureKind::Internal
        );
    }

    #[test]
    fn report_round_trips_through_json() {
        let report = SuiteReport {
            environment: EnvironmentTag::custom("test"),
            results: vec![result("a", true), result("b", false)],
        };
        let json = serde_json::to_string(&report).unwrap();
        let back: SuiteReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.results.len(), 2);
        assert!(!back.all_passed());
    }
}
