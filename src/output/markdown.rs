//! Markdown table export for suite reports.

use crate::output::{format_ns, format_ops};
use crate::result::SuiteReport;

/// Format a suite report as a markdown table, suitable for pasting into a
/// pull request or tracking issue.
pub fn to_markdown(report: &SuiteReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "**Environment:** {}\n\n",
        report.environment.description
    ));
    out.push_str("| Name | Samples | Mean | Stddev | Min | Median | Max | Throughput |\n");
    out.push_str("|------|--------:|-----:|-------:|----:|-------:|----:|-----------:|\n");

    for result in &report.results {
        match &result.summary {
            Some(s) => out.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} | {} |\n",
                result.name,
                s.samples,
                format_ns(s.mean_ns),
                format_ns(s.stddev_ns),
                format_ns(s.min_ns),
                format_ns(s.median_ns),
                format_ns(s.max_ns),
                format_ops(s.ops_per_sec),
            )),
            None => {
                let reason = result
                    .failure
                    .as_ref()
                    .map(|f| f.message.as_str())
                    .unwrap_or("missing result");
                out.push_str(&format!(
                    "| {} | - | failed: {} | | | | | |\n",
                    result.name, reason
                ));
            }
        }
    }

    out
}
