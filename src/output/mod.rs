//! Rendering helpers for suite reports.
//!
//! The engine's output is the plain [`SuiteReport`](crate::SuiteReport) data
//! structure; these modules format it for humans (terminal, markdown) and
//! machines (JSON). Nothing here feeds back into measurement.

pub mod json;
pub mod markdown;
pub mod terminal;

/// Format a nanosecond duration with an auto-scaled unit.
pub fn format_ns(ns: f64) -> String {
    if !ns.is_finite() {
        return "n/a".to_string();
    }
    if ns < 1_000.0 {
        format!("{ns:.1} ns")
    } else if ns < 1_000_000.0 {
        format!("{:.2} µs", ns / 1_000.0)
    } else if ns < 1_000_000_000.0 {
        format!("{:.2} ms", ns / 1_000_000.0)
    } else {
        format!("{:.2} s", ns / 1_000_000_000.0)
    }
}

/// Format an operations-per-second rate with an auto-scaled unit.
pub fn format_ops(ops: f64) -> String {
    if !ops.is_finite() {
        return "n/a".to_string();
    }
    if ops >= 1e9 {
        format!("{:.2} Gop/s", ops / 1e9)
    } else if ops >= 1e6 {
        format!("{:.2} Mop/s", ops / 1e6)
    } else if ops >= 1e3 {
        format!("{:.2} Kop/s", ops / 1e3)
    } else {
        format!("{ops:.1} op/s")
    }
}
