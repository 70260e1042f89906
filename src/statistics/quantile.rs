//! Quantile computation on sorted samples.

/// Compute the quantile at probability `p` from an ascending-sorted slice.
///
/// Uses the R-7 definition (linear interpolation between closest ranks), the
/// same convention most statistics packages default to.
///
/// # Panics
///
/// Panics if `sorted` is empty or `p` is outside `[0, 1]`. Callers reduce
/// sample sets that were already checked non-empty.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    assert!(!sorted.is_empty(), "cannot compute quantile of empty slice");
    assert!((0.0..=1.0).contains(&p), "probability must be in [0, 1]");

    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let frac = h - h.floor();

    if lo >= n - 1 {
        return sorted[n - 1];
    }
    sorted[lo] + frac * (sorted[lo + 1] - sorted[lo])
}

/// Median: middle value, or the average of the two middles for even lengths.
pub fn median_sorted(sorted: &[f64]) -> f64 {
    assert!(!sorted.is_empty(), "cannot compute median of empty slice");
    let n = sorted.len();
    let mid = n / 2;
    if n % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
