//! Data models and structures for the DNS latency benchmark

pub mod config;
pub mod metrics;

// Re-export main model types
pub use config::{Config, RunConfig};
pub use metrics::{
    BenchmarkReport, BenchmarkResult, ExceededEvent, LatencySummary, QueryOutcome, Server,
    EXCEEDED_REASON,
};
