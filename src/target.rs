//! Benchmark targets: the units of work being measured.
//!
//! A target is anything invocable with zero arguments that may fail. Closures
//! returning a value are adapted into the [`Target`] trait with
//! `std::hint::black_box` applied to the result, so the compiler cannot
//! optimize the measured computation away.

use std::hint::black_box;

use crate::error::BoxError;

/// A unit of work the engine can invoke repeatedly.
///
/// The engine never introspects a target; it only calls it. Implementations
/// must be safe to invoke many times back to back; the calibrator and the
/// measured rounds both drive the same instance.
pub trait Target {
    /// Run the work once.
    fn call(&mut self) -> Result<(), BoxError>;
}

/// Adapter for infallible closures. The return value is black-boxed.
struct ClosureTarget<F> {
    f: F,
}

impl<F, T> Target for ClosureTarget<F>
where
    F: FnMut() -> T,
{
    #[inline]
    fn call(&mut self) -> Result<(), BoxError> {
        black_box((self.f)());
        Ok(())
    }
}

/// Adapter for fallible closures. `Ok` payloads are black-boxed, `Err` aborts
/// the target's measurement.
struct TryClosureTarget<F> {
    f: F,
}

impl<F, T> Target for TryClosureTarget<F>
where
    F: FnMut() -> Result<T, BoxError>,
{
    #[inline]
    fn call(&mut self) -> Result<(), BoxError> {
        black_box((self.f)()?);
        Ok(())
    }
}

type Hook = Box<dyn FnMut() -> Result<(), BoxError>>;

/// A named target plus optional setup/teardown hooks.
///
/// Hooks run exactly once per full measurement, outside any timed region:
/// setup before calibration (so calibration sees initialized state), teardown
/// after the last round. Names must be unique within a run; the runner
/// rejects duplicates at registration.
///
/// # Example
///
/// ```no_run
/// use microbench::Benchmark;
///
/// let bench = Benchmark::new("sum_1k", || (0..1000u64).sum::<u64>());
/// ```
pub struct Benchmark {
    name: String,
    target: Box<dyn Target>,
    setup: Option<Hook>,
    teardown: Option<Hook>,
}

impl Benchmark {
    /// Create a benchmark from an infallible closure.
    pub fn new<T>(name: impl Into<String>, f: impl FnMut() -> T + 'static) -> Self {
        Self::from_target(name, Box::new(ClosureTarget { f }))
    }

    /// Create a benchmark from a fallible closure.
    ///
    /// An `Err` during calibration or measurement aborts this target only;
    /// the rest of the suite proceeds.
    pub fn fallible<T>(
        name: impl Into<String>,
        f: impl FnMut() -> Result<T, BoxError> + 'static,
    ) -> Self {
        Self::from_target(name, Box::new(TryClosureTarget { f }))
    }

    /// Create a benchmark from a boxed [`Target`] implementation.
    pub fn from_target(name: impl Into<String>, target: Box<dyn Target>) -> Self {
        Self {
            name: name.into(),
            target,
            setup: None,
            teardown: None,
        }
    }

    /// Attach a setup hook, run once before calibration.
    pub fn with_setup(mut self, hook: impl FnMut() -> Result<(), BoxError> + 'static) -> Self {
        self.setup = Some(Box::new(hook));
        self
    }

    /// Attach a teardown hook, run once after the last measured round.
    pub fn with_teardown(mut self, hook: impl FnMut() -> Result<(), BoxError> + 'static) -> Self {
        self.teardown = Some(Box::new(hook));
        self
    }

    /// The target's identifier, unique within a run.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn target_mut(&mut self) -> &mut dyn Target {
        self.target.as_mut()
    }

    pub(crate) fn run_setup(&mut self) -> Result<(), BoxError> {
        match self.setup.as_mut() {
            Some(hook) => hook(),
            None => Ok(()),
        }
    }

    pub(crate) fn run_teardown(&mut self) -> Result<(), BoxError> {
        match self.teardown.as_mut() {
            Some(hook) => hook(),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for Benchmark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Benchmark")
            .field("name", &self.name)
            .field("setup", &self.setup.is_some())
            .field("teardown", &self.teardown.is_some())
            .finish()
    }
}
