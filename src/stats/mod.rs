//! Latency statistics for one server's samples
//!
//! The median and P95 definitions here are intentionally not the textbook ones:
//!
//! - `median` is the element at index `n / 2` of the ascending-sorted samples, so for an
//!   even count the upper-middle value is reported rather than the mean of the two
//!   middle values.
//! - `p95` is the maximum of the top `ceil(0.05 * n)` sorted samples. Since that slice
//!   always contains the largest sample, `p95` always equals `max`.

use crate::{
    error::{AppError, Result},
    models::LatencySummary,
};

/// Fraction of the sorted samples that form the P95 slice
const P95_TAIL_FRACTION: f64 = 0.05;

/// Reduce a non-empty list of latency samples (ms) to a rounded summary
pub fn summarize(samples: &[f64]) -> Result<LatencySummary> {
    if samples.is_empty() {
        return Err(AppError::statistics("Cannot summarize an empty sample list"));
    }

    if let Some(bad) = samples.iter().find(|s| !s.is_finite() || **s < 0.0) {
        return Err(AppError::statistics(format!("Invalid latency sample: {}", bad)));
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    // Summation error must not push the mean outside the observed range
    let avg = (sorted.iter().sum::<f64>() / n as f64).clamp(sorted[0], sorted[n - 1]);

    Ok(LatencySummary {
        avg_ms: round2(avg),
        median_ms: round2(median_upper(&sorted)),
        p95_ms: round2(p95_top_slice(&sorted)),
        min_ms: round2(sorted[0]),
        max_ms: round2(sorted[n - 1]),
    })
}

/// Element at index `n / 2` of an ascending-sorted, non-empty slice
fn median_upper(sorted: &[f64]) -> f64 {
    sorted[sorted.len() / 2]
}

/// Maximum of the last `ceil(5% of n)` elements of an ascending-sorted, non-empty slice
fn p95_top_slice(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    let tail = ((P95_TAIL_FRACTION * n as f64).ceil() as usize).clamp(1, n);
    sorted[n - tail..]
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Round to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// Property-based tests live in a separate module
#[cfg(test)]
mod comprehensive_tests;
