//! Server, sample and result data models

use crate::types::PerformanceLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A DNS server under test
///
/// Identity is the `(name, address)` pair. Duplicates are benchmarked twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    #[serde(rename = "Name", alias = "name")]
    pub name: String,

    /// `ip` or `ip:port`
    #[serde(rename = "Address", alias = "address")]
    pub address: String,
}

impl Server {
    pub fn new<N: Into<String>, A: Into<String>>(name: N, address: A) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

/// Result of one query against one server
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QueryOutcome {
    /// Resolution completed; wall-clock latency in milliseconds
    Success { latency_ms: f64 },
    /// Resolution timed out or failed inside the timeout window
    Timeout,
}

impl QueryOutcome {
    pub fn success(latency_ms: f64) -> Self {
        Self::Success { latency_ms }
    }

    pub fn latency_ms(&self) -> Option<f64> {
        match self {
            Self::Success { latency_ms } => Some(*latency_ms),
            Self::Timeout => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}

/// Reduced statistics over one server's samples, rounded to 2 decimals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatencySummary {
    pub avg_ms: f64,
    pub median_ms: f64,
    pub p95_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

/// Latency statistics for one server that produced at least one sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Server")]
    pub server: String,
    #[serde(rename = "Samples")]
    pub samples: usize,
    #[serde(rename = "Avg_ms")]
    pub avg_ms: f64,
    #[serde(rename = "Median_ms")]
    pub median_ms: f64,
    #[serde(rename = "P95_ms")]
    pub p95_ms: f64,
    #[serde(rename = "Min_ms")]
    pub min_ms: f64,
    #[serde(rename = "Max_ms")]
    pub max_ms: f64,
}

impl BenchmarkResult {
    pub fn new(server: &Server, samples: usize, summary: LatencySummary) -> Self {
        Self {
            name: server.name.clone(),
            server: server.address.clone(),
            samples,
            avg_ms: summary.avg_ms,
            median_ms: summary.median_ms,
            p95_ms: summary.p95_ms,
            min_ms: summary.min_ms,
            max_ms: summary.max_ms,
        }
    }

    pub fn performance_level(&self) -> PerformanceLevel {
        PerformanceLevel::from_latency_ms(self.avg_ms)
    }
}

/// Reason recorded when a server exhausts its timeout budget
pub const EXCEEDED_REASON: &str = "Exceeded response limit";

/// Marks the query at which a server was abandoned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceededEvent {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Server")]
    pub server: String,
    #[serde(rename = "Domain")]
    pub domain: String,
    /// 1-based run number
    #[serde(rename = "Run")]
    pub run: u32,
    #[serde(rename = "ThresholdMs")]
    pub threshold_ms: u64,
    #[serde(rename = "Reason")]
    pub reason: String,
}

impl ExceededEvent {
    pub fn new(server: &Server, domain: &str, run: u32, threshold_ms: u64) -> Self {
        Self {
            name: server.name.clone(),
            server: server.address.clone(),
            domain: domain.to_string(),
            run,
            threshold_ms,
            reason: EXCEEDED_REASON.to_string(),
        }
    }
}

/// Ranked results plus the exceeded-event log of one invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// Sorted ascending by average latency
    pub results: Vec<BenchmarkResult>,
    pub exceeded: Vec<ExceededEvent>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl BenchmarkReport {
    /// The first `n` ranked results
    pub fn top(&self, n: usize) -> &[BenchmarkResult] {
        &self.results[..n.min(self.results.len())]
    }

    pub fn total_samples(&self) -> usize {
        self.results.iter().map(|r| r.samples).sum()
    }

    pub fn fastest(&self) -> Option<&BenchmarkResult> {
        self.results.first()
    }
}
