//! Suite orchestration: the public entry point tying the pipeline together.
//!
//! Targets run strictly sequentially, in registration order, with no
//! concurrency. Run-to-run interference is the threat model, not throughput.
//! Per-target failures land in that target's result slot; sibling targets
//! always proceed.

use crate::config::Config;
use crate::error::{Error, Phase};
use crate::measurement::{calibrate, collect, Clock, IterationPlan, MonotonicClock, RawSamples};
use crate::result::{BenchmarkResult, Failure, MeasurementInfo, SuiteReport};
use crate::statistics::Summary;
use crate::system::EnvironmentTag;
use crate::target::Benchmark;

/// Runs registered benchmarks through calibrate → collect → aggregate.
///
/// # Example
///
/// ```no_run
/// use microbench::{Benchmark, Runner};
///
/// let mut runner = Runner::new()?;
/// runner.register(Benchmark::new("sum_1k", || (0..1000u64).sum::<u64>()))?;
/// runner.register(Benchmark::new("sum_1m", || (0..1_000_000u64).sum::<u64>()))?;
///
/// let report = runner.run();
/// assert!(report.all_passed());
/// # Ok::<(), microbench::Error>(())
/// ```
pub struct Runner<C: Clock = MonotonicClock> {
    config: Config,
    clock: C,
    environment: EnvironmentTag,
    benchmarks: Vec<Benchmark>,
}

impl Runner<MonotonicClock> {
    /// Default configuration, probed monotonic clock, detected environment.
    ///
    /// # Errors
    ///
    /// `Error::ClockUnavailable` if the platform clock never advances. Fatal,
    /// since no timing is possible.
    pub fn new() -> Result<Self, Error> {
        Self::with_config(Config::default())
    }

    /// Custom configuration with the production clock.
    ///
    /// # Errors
    ///
    /// `Error::InvalidConfig` from eager validation, or
    /// `Error::ClockUnavailable` from the clock probe.
    pub fn with_config(config: Config) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            config,
            clock: MonotonicClock::new()?,
            environment: EnvironmentTag::detect(),
            benchmarks: Vec::new(),
        })
    }
}

impl<C: Clock> Runner<C> {
    /// Custom clock, primarily for deterministic tests.
    ///
    /// # Errors
    ///
    /// `Error::InvalidConfig` from eager validation.
    pub fn with_clock(config: Config, clock: C) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            config,
            clock,
            environment: EnvironmentTag::detect(),
            benchmarks: Vec::new(),
        })
    }

    /// Replace the environment tag attached to every result.
    ///
    /// Dependency-injection seam: callers with their own system-introspection
    /// layer (or tests needing a fixed value) supply the tag here.
    pub fn environment(mut self, tag: EnvironmentTag) -> Self {
        self.environment = tag;
        self
    }

    /// Register a benchmark. Targets run in registration order.
    ///
    /// # Errors
    ///
    /// `Error::InvalidConfig` if the name duplicates an earlier registration.
    pub fn register(&mut self, benchmark: Benchmark) -> Result<(), Error> {
        if self.benchmarks.iter().any(|b| b.name() == benchmark.name()) {
            return Err(Error::InvalidConfig(format!(
                "duplicate benchmark name: {}",
                benchmark.name()
            )));
        }
        self.benchmarks.push(benchmark);
        Ok(())
    }

    /// Shorthand for registering an infallible closure.
    ///
    /// # Errors
    ///
    /// Same as [`Runner::register`].
    pub fn bench<T>(
        &mut self,
        name: impl Into<String>,
        f: impl FnMut() -> T + 'static,
    ) -> Result<(), Error> {
        self.register(Benchmark::new(name, f))
    }

    /// Run every registered target and assemble the report.
    ///
    /// Never fails as a whole: per-target errors become recorded failures and
    /// the suite continues. Check [`SuiteReport::all_passed`] for exit status.
    pub fn run(self) -> SuiteReport {
        let Runner {
            config,
            clock,
            environment,
            benchmarks,
        } = self;

        let mut results = Vec::with_capacity(benchmarks.len());
        for mut benchmark in benchmarks {
            let name = benchmark.name().to_string();
            let (outcome, measurement) = run_target(&clock, &config, &mut benchmark);
            let (summary, failure) = match outcome {
                Ok(summary) => (Some(summary), None),
                Err(err) => (None, Some(Failure::from_error(&err))),
            };
            results.push(BenchmarkResult {
                name,
                summary,
                failure,
                measurement,
                environment: environment.clone(),
            });
        }

        SuiteReport {
            environment,
            results,
        }
    }
}

impl<C: Clock> std::fmt::Debug for Runner<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner")
            .field("config", &self.config)
            .field("environment", &self.environment.description)
            .field("benchmarks", &self.benchmarks.len())
            .finish()
    }
}

/// One target's full pipeline: setup → calibrate → collect → teardown → reduce.
///
/// Setup runs before calibration so calibration probes initialized state;
/// teardown is attempted whenever setup succeeded, even after a measurement
/// failure (the measurement error takes precedence in the slot).
fn run_target<C: Clock>(
    clock: &C,
    config: &Config,
    benchmark: &mut Benchmark,
) -> (Result<Summary, Error>, Option<MeasurementInfo>) {
    if let Err(source) = benchmark.run_setup() {
        return (Err(Error::target(Phase::Setup, source)), None);
    }

    let measured = measure(clock, config, benchmark);
    let teardown = benchmark
        .run_teardown()
        .map_err(|source| Error::target(Phase::Teardown, source));

    match (measured, teardown) {
        (Ok((plan, raw)), Ok(())) => {
            let info = MeasurementInfo {
                timer_resolution_ns: clock.resolution_ns(),
                warmup_rounds: plan.warmup_rounds,
                iterations_per_round: plan.iterations_per_round,
                rounds: plan.rounds,
            };
            let summary =
                Summary::from_samples(&raw.per_call_ns, raw.total_measured_ns, config.trim_percent);
            (summary, Some(info))
        }
        (Err(err), _) => (Err(err), None),
        (Ok(_), Err(err)) => (Err(err), None),
    }
}

fn measure<C: Clock>(
    clock: &C,
    config: &Config,
    benchmark: &mut Benchmark,
) -> Result<(IterationPlan, RawSamples), Error> {
    let plan = calibrate(clock, benchmark.target_mut(), config)?;
    let raw = collect(clock, benchmark.target_mut(), &plan)?;
    Ok((plan, raw))
}
