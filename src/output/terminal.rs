//! Human-readable terminal output with colors.

use colored::Colorize;

use crate::output::{format_ns, format_ops};
use crate::result::{BenchmarkResult, SuiteReport};

/// Format a suite report as a colored table.
///
/// One row per target, failures rendered in red with their recorded reason.
/// The environment line lets output from different machines be told apart.
pub fn render(report: &SuiteReport) -> String {
    let mut out = String::new();
    let sep = "\u{2500}".repeat(78);

    out.push_str(&format!("{}\n", "microbench".bold()));
    out.push_str(&format!("  {}\n", report.environment.description.dimmed()));
    out.push_str(&sep);
    out.push('\n');

    let name_width = report
        .results
        .iter()
        .map(|r| r.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    out.push_str(&format!(
        "{:<name_width$}  {:>10}  {:>10}  {:>10}  {:>10}  {:>10}  {:>12}\n",
        "name".bold(),
        "mean".bold(),
        "stddev".bold(),
        "min".bold(),
        "median".bold(),
        "max".bold(),
        "throughput".bold(),
    ));

    for result in &report.results {
        out.push_str(&render_row(result, name_width));
    }

    out.push_str(&sep);
    out.push('\n');

    let failed = report.failures().count();
    if failed == 0 {
        out.push_str(&format!(
            "  {}\n",
            format!("{} target(s), all passed", report.results.len()).green()
        ));
    } else {
        out.push_str(&format!(
            "  {}\n",
            format!("{} target(s), {failed} failed", report.results.len()).red()
        ));
    }

    out
}

fn render_row(result: &BenchmarkResult, name_width: usize) -> String {
    match (&result.summary, &result.failure) {
        (Some(s), _) => format!(
            "{:<name_width$}  {:>10}  {:>10}  {:>10}  {:>10}  {:>10}  {:>12}\n",
            result.name,
            format_ns(s.mean_ns),
            format_ns(s.stddev_ns),
            format_ns(s.min_ns),
            format_ns(s.median_ns),
            format_ns(s.max_ns),
            format_ops(s.ops_per_sec),
        ),
        (None, Some(failure)) => format!(
            "{:<name_width$}  {}\n",
            result.name,
            format!("FAILED ({:?}): {}", failure.kind, failure.message).red()
        ),
        // A slot with neither summary nor failure violates the result
        // contract; make it visible rather than skipping the row.
        (None, None) => format!(
            "{:<name_width$}  {}\n",
            result.name,
            "MISSING RESULT".red().bold()
        ),
    }
}
