//! # microbench
//!
//! A micro-benchmark harness: run small code paths repeatedly under
//! controlled conditions, measure per-call cost with low overhead, and reduce
//! the raw timings into comparable summary statistics. A unit-test runner in
//! spirit, but for performance instead of correctness.
//!
//! The engine defends against the usual measurement hazards:
//!
//! - **Clock resolution**: per-call cost is never read directly. Rounds of
//!   back-to-back invocations are timed as a single unit and sized, via a
//!   doubling calibration search, so each round is thousands of times longer
//!   than the smallest delta the clock can observe.
//! - **Cold starts**: warm-up rounds run and are discarded before sampling.
//! - **Interference**: targets run strictly sequentially; min/max are always
//!   reported raw so outliers stay visible, with optional trimming for the
//!   mean and standard deviation.
//!
//! ## Quick Start
//!
//! ```no_run
//! use microbench::{Benchmark, Runner};
//!
//! let mut runner = Runner::new()?;
//! runner.bench("sum_1k", || (0..1_000u64).sum::<u64>())?;
//! runner.bench("sum_1m", || (0..1_000_000u64).sum::<u64>())?;
//!
//! let report = runner.run();
//! println!("{}", microbench::output::terminal::render(&report));
//! assert!(report.all_passed());
//! # Ok::<(), microbench::Error>(())
//! ```
//!
//! ## Single Target
//!
//! ```no_run
//! let result = microbench::benchmark("fib_20", || fibonacci(20))?;
//! let summary = result.summary.unwrap();
//! println!("mean: {:.0} ns, {} samples", summary.mean_ns, summary.samples);
//! # fn fibonacci(n: u64) -> u64 { n }
//! # Ok::<(), microbench::Error>(())
//! ```
//!
//! ## Failure Isolation
//!
//! A target that fails (setup, measurement, or teardown) gets a recorded
//! failure in its result slot; sibling targets still run. A suite report
//! always lists every registered target.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod error;
mod result;
mod runner;
mod system;
mod target;

pub mod measurement;
pub mod output;
pub mod statistics;

pub use config::{Config, IterationsPerRound};
pub use error::{BoxError, Error, Phase};
pub use measurement::{Clock, IterationPlan, MonotonicClock};
pub use result::{BenchmarkResult, Failure, FailureKind, MeasurementInfo, SuiteReport};
pub use runner::Runner;
pub use statistics::Summary;
pub use system::EnvironmentTag;
pub use target::{Benchmark, Target};

/// Measure a single closure with the default configuration.
///
/// Convenience wrapper over [`Runner`] for the one-target case. The result
/// slot carries either statistics or the recorded failure, exactly as it
/// would inside a suite.
///
/// # Errors
///
/// Only construction errors (`ClockUnavailable`); a failing target is
/// reported inside the returned [`BenchmarkResult`], not as an `Err`.
pub fn benchmark<T>(
    name: impl Into<String>,
    f: impl FnMut() -> T + 'static,
) -> Result<BenchmarkResult, Error> {
    benchmark_with_config(Config::default(), name, f)
}

/// Measure a single closure with an explicit configuration.
///
/// # Errors
///
/// `InvalidConfig` or `ClockUnavailable` at construction; target failures are
/// recorded inside the result.
pub fn benchmark_with_config<T>(
    config: Config,
    name: impl Into<String>,
    f: impl FnMut() -> T + 'static,
) -> Result<BenchmarkResult, Error> {
    let mut runner = Runner::with_config(config)?;
    runner.register(Benchmark::new(name, f))?;
    let mut report = runner.run();
    // Exactly one target was registered.
    Ok(report.results.remove(0))
}

/// Measure one cold invocation of a closure.
///
/// Uses [`Config::single_shot`]: no warm-up, no calibration probing, a single
/// round of a single iteration. The first-call cost, caches cold.
///
/// # Errors
///
/// Same as [`benchmark`].
pub fn single_shot<T>(
    name: impl Into<String>,
    f: impl FnMut() -> T + 'static,
) -> Result<BenchmarkResult, Error> {
    benchmark_with_config(Config::single_shot(), name, f)
}
