//! Reduction of raw timing samples into summary statistics.
//!
//! Standard deviation is the SAMPLE standard deviation (n−1 denominator),
//! reported as 0 for a single sample. Throughput is the reciprocal of the
//! mean per-call duration. Min, max, median, and percentiles always reflect
//! the raw samples; optional symmetric trimming applies only to the mean,
//! standard deviation, and the outlier count derived from them.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::statistics::quantile::{median_sorted, quantile_sorted};

/// Reduced statistics for one benchmark target. Immutable once produced.
///
/// All durations are nanoseconds per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of samples reduced (one per measured round).
    pub samples: usize,
    /// Total measured wall time across all rounds, nanoseconds.
    pub total_ns: f64,
    /// Arithmetic mean (after trimming, if enabled).
    pub mean_ns: f64,
    /// Sample standard deviation (after trimming, if enabled). 0 for n = 1.
    pub stddev_ns: f64,
    /// Fastest per-call sample, untrimmed.
    pub min_ns: f64,
    /// Slowest per-call sample, untrimmed.
    pub max_ns: f64,
    /// Median of the untrimmed samples.
    pub median_ns: f64,
    /// 5th percentile of the untrimmed samples.
    pub p05_ns: f64,
    /// 25th percentile of the untrimmed samples.
    pub p25_ns: f64,
    /// 75th percentile of the untrimmed samples.
    pub p75_ns: f64,
    /// 95th percentile of the untrimmed samples.
    pub p95_ns: f64,
    /// Operations per second derived from the mean (`1e9 / mean_ns`).
    ///
    /// NaN when the mean rounds to zero, which only happens when the clock
    /// could not resolve the workload at all.
    pub ops_per_sec: f64,
    /// Operations per second derived from the fastest sample (`1e9 / min_ns`).
    ///
    /// The minimum is the closest observable bound on how fast the machine
    /// can run the code; higher samples mostly reflect interference.
    pub peak_ops_per_sec: f64,
    /// Samples falling outside mean ± one standard deviation.
    pub std_outliers: usize,
    /// Samples discarded by trimming (0 when trimming is disabled).
    pub trimmed: usize,
}

impl Summary {
    /// Reduce per-call samples into a `Summary`.
    ///
    /// `trim_percent` is the fraction discarded from EACH end of the sorted
    /// samples before computing mean and standard deviation; validated by
    /// [`Config`](crate::Config) to stay below 0.5 so at least one sample
    /// always survives.
    ///
    /// # Errors
    ///
    /// `Error::InsufficientSamples` if `per_call_ns` is empty. The calibrator
    /// guarantees at least one round, so this indicates an upstream defect.
    pub fn from_samples(
        per_call_ns: &[f64],
        total_measured_ns: f64,
        trim_percent: f64,
    ) -> Result<Self, Error> {
        let n = per_call_ns.len();
        if n == 0 {
            return Err(Error::InsufficientSamples);
        }

        let mut sorted = per_call_ns.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let min_ns = sorted[0];
        let max_ns = sorted[n - 1];
        let median_ns = median_sorted(&sorted);
        let p05_ns = quantile_sorted(&sorted, 0.05);
        let p25_ns = quantile_sorted(&sorted, 0.25);
        let p75_ns = quantile_sorted(&sorted, 0.75);
        let p95_ns = quantile_sorted(&sorted, 0.95);

        let cut = (n as f64 * trim_percent).floor() as usize;
        let kept = &sorted[cut..n - cut];

        let mean_ns = kept.iter().sum::<f64>() / kept.len() as f64;
        let stddev_ns = sample_stddev(kept, mean_ns);
        let std_outliers = kept
            .iter()
            .filter(|&&t| t < mean_ns - stddev_ns || t > mean_ns + stddev_ns)
            .count();

        let ops_per_sec = if mean_ns > 0.0 { 1e9 / mean_ns } else { f64::NAN };
        let peak_ops_per_sec = if min_ns > 0.0 { 1e9 / min_ns } else { f64::NAN };

        Ok(Self {
            samples: n,
            total_ns: total_measured_ns,
            mean_ns,
            stddev_ns,
            min_ns,
            max_ns,
            median_ns,
            p05_ns,
            p25_ns,
            p75_ns,
            p95_ns,
            ops_per_sec,
            peak_ops_per_sec,
            std_outliers,
            trimmed: 2 * cut,
        })
    }
}

/// Sample standard deviation (n−1 denominator); 0 for fewer than two samples.
fn sample_stddev(samples: &[f64], mean: f64) -> f64 {
    let n = samples.len();
    if n < 2 {
        return 0.0;
    }
    let sum_sq: f64 = samples.iter().map(|t| (t - mean) * (t - mean)).sum();
    (sum_sq / (n - 1) as f64).sqrt()
}
