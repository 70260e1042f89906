//! Configuration for benchmark runs.

use std::time::Duration;

use crate::error::Error;

/// Configuration options for a [`Runner`](crate::Runner).
///
/// Defaults favor stable measurements over speed; use [`Config::quick`] for
/// iterating on a benchmark suite and [`Config::single_shot`] to observe
/// cold-start cost.
#[derive(Debug, Clone)]
pub struct Config {
    /// Full warm-up rounds discarded before measurement (default: 1).
    pub warmup_rounds: u64,

    /// Measured rounds per target (default: 5).
    pub rounds: u64,

    /// Minimum duration of one measured round.
    ///
    /// `None` (the default) derives the threshold from the detected clock
    /// resolution: `resolution × calibration_factor`.
    pub min_round_duration: Option<Duration>,

    /// Fraction of samples trimmed from each end before computing mean and
    /// standard deviation (default: 0.0, disabled). Must be in `[0, 0.5)`.
    /// Min, max, median, and percentiles always reflect the raw samples.
    pub trim_percent: f64,

    /// Multiplier applied to clock resolution to derive the default minimum
    /// round duration (default: 10,000).
    pub calibration_factor: f64,

    /// Bound on the calibration doubling search (default: 40). At 40
    /// doublings the batch exceeds 10^12 invocations; a target that still
    /// has not cleared the resolution floor is reported as a timeout.
    pub max_calibration_doublings: u32,

    /// Iterations per measured round (default: `Auto`).
    pub iterations_per_round: IterationsPerRound,
}

/// How many target invocations make up one measured round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationsPerRound {
    /// Calibrate against the clock resolution so each round's duration
    /// dilutes timer quantization and call-dispatch overhead.
    Auto,

    /// Use exactly N invocations per round, skipping the doubling search.
    ///
    /// The round duration is divided by N to produce per-call samples.
    Fixed(u64),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            warmup_rounds: 1,
            rounds: 5,
            min_round_duration: None,
            trim_percent: 0.0,
            calibration_factor: 10_000.0,
            max_calibration_doublings: 40,
            iterations_per_round: IterationsPerRound::Auto,
        }
    }
}

impl Config {
    /// Reduced settings for fast iteration on a suite.
    ///
    /// Three rounds and a 1,000x resolution floor trade some stability for
    /// runtime; results remain comparable across runs on a quiet machine.
    pub fn quick() -> Self {
        Self {
            rounds: 3,
            calibration_factor: 1_000.0,
            ..Self::default()
        }
    }

    /// One cold invocation: a single round of one iteration, no warm-up.
    ///
    /// Measures first-call cost (cache misses, lazy initialization) instead
    /// of steady-state cost. Statistics degenerate to that single sample.
    pub fn single_shot() -> Self {
        Self {
            warmup_rounds: 0,
            rounds: 1,
            iterations_per_round: IterationsPerRound::Fixed(1),
            ..Self::default()
        }
    }

    /// Validate field ranges. Called eagerly at runner construction.
    pub fn validate(&self) -> Result<(), Error> {
        if self.rounds == 0 {
            return Err(Error::InvalidConfig("rounds must be at least 1".into()));
        }
        if !(0.0..0.5).contains(&self.trim_percent) {
            return Err(Error::InvalidConfig(format!(
                "trim_percent must be in [0, 0.5), got {}",
                self.trim_percent
            )));
        }
        if !self.calibration_factor.is_finite() || self.calibration_factor <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "calibration_factor must be positive, got {}",
                self.calibration_factor
            )));
        }
        if self.max_calibration_doublings == 0 {
            return Err(Error::InvalidConfig(
                "max_calibration_doublings must be at least 1".into(),
            ));
        }
        if let IterationsPerRound::Fixed(0) = self.iterations_per_round {
            return Err(Error::InvalidConfig(
                "iterations_per_round must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Resolve the minimum round duration in nanoseconds for a clock with the
    /// given resolution.
    pub(crate) fn min_round_ns(&self, resolution_ns: f64) -> f64 {
        match self.min_round_duration {
            Some(d) => d.as_nanos() as f64,
            None => resolution_ns * self.calibration_factor,
        }
    }
}
