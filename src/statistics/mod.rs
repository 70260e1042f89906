//! Statistical reduction of timing samples.

mod quantile;
mod summary;

pub use quantile::{median_sorted, quantile_sorted};
pub use summary::Summary;
