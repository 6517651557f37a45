//! Type definitions and aliases

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// Performance classification of a resolver's average latency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerformanceLevel {
    /// Good performance (< 50 ms)
    Good,
    /// Moderate performance (50-150 ms)
    Moderate,
    /// Poor performance (>= 150 ms)
    Poor,
}

impl PerformanceLevel {
    /// Classify performance based on latency in milliseconds
    pub fn from_latency_ms(latency_ms: f64) -> Self {
        if latency_ms < 50.0 {
            Self::Good
        } else if latency_ms < 150.0 {
            Self::Moderate
        } else {
            Self::Poor
        }
    }
}
