//! Configuration data model and validation

use crate::types::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Parameters that drive one benchmark invocation
///
/// Immutable once the run starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of full passes over the domain list per server
    pub runs: u32,
    /// Upper bound for a single query, in milliseconds
    pub timeout_ms: u64,
    /// Number of timeouts after which a server is abandoned
    pub max_timeouts: u32,
    /// Pause between two runs against the same server, in milliseconds
    #[serde(default)]
    pub run_pause_ms: u64,
}

impl RunConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn run_pause(&self) -> Duration {
        Duration::from_millis(self.run_pause_ms)
    }

    /// Reject parameters the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.runs == 0 || self.runs > crate::defaults::MAX_RUNS {
            return Err(AppError::validation(format!(
                "Runs must be between 1 and {}, got {}",
                crate::defaults::MAX_RUNS,
                self.runs
            )));
        }

        if self.timeout_ms == 0 || self.timeout_ms > crate::defaults::MAX_TIMEOUT_MS {
            return Err(AppError::validation(format!(
                "Timeout must be between 1 and {} ms, got {}",
                crate::defaults::MAX_TIMEOUT_MS,
                self.timeout_ms
            )));
        }

        if self.max_timeouts == 0 {
            return Err(AppError::validation("Max timeouts must be greater than 0"));
        }

        Ok(())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            runs: crate::defaults::DEFAULT_RUNS,
            timeout_ms: crate::defaults::DEFAULT_TIMEOUT_MS,
            max_timeouts: crate::defaults::DEFAULT_MAX_TIMEOUTS,
            run_pause_ms: crate::defaults::DEFAULT_RUN_PAUSE_MS,
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// JSON file listing the servers to benchmark
    #[serde(default = "default_servers_file")]
    pub servers_file: PathBuf,

    /// Text file listing the domains to resolve
    #[serde(default = "default_domains_file")]
    pub domains_file: PathBuf,

    /// Directory the result artifacts are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_runs")]
    pub runs: u32,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_max_timeouts")]
    pub max_timeouts: u32,

    #[serde(default = "default_run_pause_ms")]
    pub run_pause_ms: u64,

    /// Size of the "top performers" table
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Write result artifacts to `output_dir`
    #[serde(default = "default_write_results")]
    pub write_results: bool,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            servers_file: default_servers_file(),
            domains_file: default_domains_file(),
            output_dir: default_output_dir(),
            runs: default_runs(),
            timeout_ms: default_timeout_ms(),
            max_timeouts: default_max_timeouts(),
            run_pause_ms: default_run_pause_ms(),
            top_n: default_top_n(),
            write_results: default_write_results(),
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// The immutable parameters handed to the benchmark engine
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            runs: self.runs,
            timeout_ms: self.timeout_ms,
            max_timeouts: self.max_timeouts,
            run_pause_ms: self.run_pause_ms,
        }
    }

    /// Validate the configuration and return the first problem found
    pub fn validate(&self) -> Result<()> {
        if self.servers_file.as_os_str().is_empty() {
            return Err(AppError::config("Servers file path cannot be empty"));
        }

        if self.domains_file.as_os_str().is_empty() {
            return Err(AppError::config("Domains file path cannot be empty"));
        }

        if self.runs == 0 {
            return Err(AppError::config("Runs must be greater than 0"));
        }

        if self.runs > crate::defaults::MAX_RUNS {
            return Err(AppError::config(format!(
                "Runs cannot exceed {}",
                crate::defaults::MAX_RUNS
            )));
        }

        if self.timeout_ms == 0 {
            return Err(AppError::config("Timeout must be greater than 0 ms"));
        }

        if self.timeout_ms > crate::defaults::MAX_TIMEOUT_MS {
            return Err(AppError::config(format!(
                "Timeout cannot exceed {} ms",
                crate::defaults::MAX_TIMEOUT_MS
            )));
        }

        if self.max_timeouts == 0 {
            return Err(AppError::config("Max timeouts must be greater than 0"));
        }

        if self.top_n == 0 {
            return Err(AppError::config("Top performer count must be greater than 0"));
        }

        Ok(())
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        if let Ok(path) = std::env::var("DNSBENCH_SERVERS_FILE") {
            self.servers_file = PathBuf::from(path.trim());
        }

        if let Ok(path) = std::env::var("DNSBENCH_DOMAINS_FILE") {
            self.domains_file = PathBuf::from(path.trim());
        }

        if let Ok(path) = std::env::var("DNSBENCH_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(path.trim());
        }

        if let Ok(runs) = std::env::var("DNSBENCH_RUNS") {
            self.runs = runs.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid DNSBENCH_RUNS value '{}': {}", runs, e)))?;
        }

        if let Ok(timeout) = std::env::var("DNSBENCH_TIMEOUT_MS") {
            self.timeout_ms = timeout.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid DNSBENCH_TIMEOUT_MS value '{}': {}", timeout, e)))?;
        }

        if let Ok(max_timeouts) = std::env::var("DNSBENCH_MAX_TIMEOUTS") {
            self.max_timeouts = max_timeouts.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid DNSBENCH_MAX_TIMEOUTS value '{}': {}", max_timeouts, e)))?;
        }

        if let Ok(pause) = std::env::var("DNSBENCH_RUN_PAUSE_MS") {
            self.run_pause_ms = pause.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid DNSBENCH_RUN_PAUSE_MS value '{}': {}", pause, e)))?;
        }

        if let Ok(top) = std::env::var("DNSBENCH_TOP") {
            self.top_n = top.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid DNSBENCH_TOP value '{}': {}", top, e)))?;
        }

        if let Ok(enable_color) = std::env::var("ENABLE_COLOR") {
            self.enable_color = enable_color.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", enable_color, e)))?;
        }

        Ok(())
    }
}

// Default value functions for serde
fn default_servers_file() -> PathBuf {
    PathBuf::from(crate::defaults::DEFAULT_SERVERS_FILE)
}

fn default_domains_file() -> PathBuf {
    PathBuf::from(crate::defaults::DEFAULT_DOMAINS_FILE)
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(crate::defaults::DEFAULT_OUTPUT_DIR)
}

fn default_runs() -> u32 {
    crate::defaults::DEFAULT_RUNS
}

fn default_timeout_ms() -> u64 {
    crate::defaults::DEFAULT_TIMEOUT_MS
}

fn default_max_timeouts() -> u32 {
    crate::defaults::DEFAULT_MAX_TIMEOUTS
}

fn default_run_pause_ms() -> u64 {
    crate::defaults::DEFAULT_RUN_PAUSE_MS
}

fn default_top_n() -> usize {
    crate::defaults::DEFAULT_TOP_N
}

fn default_write_results() -> bool {
    true
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}
