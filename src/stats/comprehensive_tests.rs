//! Property-based tests for the latency statistics
//!
//! These check the ordering and P95 properties across arbitrary sample lists.

use super::summarize;
use proptest::collection::vec;
use proptest::prelude::*;

/// Property-based test generators
mod generators {
    use super::*;

    /// Latencies in the range a real resolver produces (sub-ms to seconds)
    pub fn latency_samples() -> impl Strategy<Value = Vec<f64>> {
        vec(0.0f64..5000.0, 1..200)
    }
}

proptest! {
    #[test]
    fn prop_min_le_median_le_max(samples in generators::latency_samples()) {
        let summary = summarize(&samples).unwrap();
        prop_assert!(summary.min_ms <= summary.median_ms);
        prop_assert!(summary.median_ms <= summary.max_ms);
    }

    #[test]
    fn prop_min_le_avg_le_max(samples in generators::latency_samples()) {
        let summary = summarize(&samples).unwrap();
        prop_assert!(summary.min_ms <= summary.avg_ms);
        prop_assert!(summary.avg_ms <= summary.max_ms);
    }

    #[test]
    fn prop_p95_equals_max(samples in generators::latency_samples()) {
        let summary = summarize(&samples).unwrap();
        prop_assert_eq!(summary.p95_ms, summary.max_ms);
    }

    #[test]
    fn prop_summary_is_order_independent(mut samples in generators::latency_samples()) {
        let forward = summarize(&samples).unwrap();
        samples.reverse();
        let reversed = summarize(&samples).unwrap();
        prop_assert_eq!(forward.median_ms, reversed.median_ms);
        prop_assert_eq!(forward.min_ms, reversed.min_ms);
        prop_assert_eq!(forward.max_ms, reversed.max_ms);
    }

    #[test]
    fn prop_values_have_two_decimals(samples in generators::latency_samples()) {
        let summary = summarize(&samples).unwrap();
        for value in [summary.avg_ms, summary.median_ms, summary.p95_ms, summary.min_ms, summary.max_ms] {
            let scaled = value * 100.0;
            prop_assert!((scaled - scaled.round()).abs() < 1e-6);
        }
    }
}

#[test]
fn test_median_of_sorted_integers() {
    for n in 1usize..=12 {
        let samples: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let summary = summarize(&samples).unwrap();
        assert_eq!(summary.median_ms, (n / 2) as f64, "n = {}", n);
    }
}
