//! Measurement infrastructure: clock, calibration, and sample collection.
//!
//! The pipeline per target is calibrate → collect: the calibrator turns the
//! clock's resolution and the target's estimated per-call cost into an
//! [`IterationPlan`], and the collector executes that plan with batched round
//! timing so clock reads never dominate the measurement.

mod calibrator;
mod clock;
mod collector;

pub use calibrator::{calibrate, IterationPlan};
pub use clock::{Clock, MonotonicClock};
pub use collector::{collect, RawSamples};
