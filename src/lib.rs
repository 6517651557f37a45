//! DNS Latency Benchmark
//!
//! Measures name-resolution latency of a set of DNS servers against a set of
//! domains, reduces the samples to per-server statistics and ranks the servers
//! by average latency.
//!
//! The engine lives in [`dns`] (one timeout-bounded query), [`executor`]
//! (per-server sampling with the abort policy, and the sequential run over all
//! servers) and [`stats`] (aggregation). Everything else is input and output.

pub mod app;
pub mod cli;
pub mod config;
pub mod dns;
pub mod error;
pub mod executor;
pub mod loader;
pub mod logging;
pub mod models;
pub mod output;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use models::{BenchmarkReport, BenchmarkResult, Config, ExceededEvent, QueryOutcome, RunConfig, Server};
pub use dns::{DnsQueryExecutor, QueryExecutor};
pub use executor::{BenchmarkRunner, RunObserver, ServerOutcome, ServerSampler};
pub use stats::summarize;
pub use output::{OutputFormatter, ColoredFormatter, PlainFormatter, OutputCoordinator, OutputFormatterFactory, ResultWriter};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build metadata from build.rs
pub const BUILD_TIME: &str = env!("BUILD_TIME");
pub const TARGET_TRIPLE: &str = env!("TARGET_TRIPLE");
pub const GIT_COMMIT: Option<&str> = option_env!("GIT_COMMIT");

/// Version string shown by `--version` and in debug mode
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("TARGET_TRIPLE"),
    ", built ",
    env!("BUILD_TIME"),
    ")"
);

/// Default configuration values
pub mod defaults {
    pub const DEFAULT_SERVERS_FILE: &str = "servers.json";
    pub const DEFAULT_DOMAINS_FILE: &str = "domains.txt";
    pub const DEFAULT_OUTPUT_DIR: &str = ".";
    pub const DEFAULT_RUNS: u32 = 10;
    pub const DEFAULT_TIMEOUT_MS: u64 = 800;
    pub const DEFAULT_MAX_TIMEOUTS: u32 = 1;
    pub const DEFAULT_RUN_PAUSE_MS: u64 = 100;
    pub const DEFAULT_TOP_N: usize = 5;
    pub const DEFAULT_ENABLE_COLOR: bool = true;

    pub const MAX_RUNS: u32 = 1000;
    pub const MAX_TIMEOUT_MS: u64 = 60_000;
}
