//! Benchmark execution engine
//!
//! This module contains:
//! - [`ServerSampler`], which queries one server across all runs and domains
//! - [`BenchmarkRunner`], which samples every server in order and ranks the results
//!
//! Execution is strictly sequential: one server at a time, one query at a time.

pub mod sampler;

#[cfg(test)]
pub(crate) mod testing;

pub use sampler::{ServerOutcome, ServerSampler};

use crate::{
    dns::QueryExecutor,
    error::{AppError, Result},
    logging::BenchLogger,
    models::{BenchmarkReport, BenchmarkResult, RunConfig, Server},
};
use chrono::Utc;
use std::cmp::Ordering;

/// Progress callbacks invoked by [`BenchmarkRunner`]
///
/// `index` is 0-based; `total` is the number of servers in the run.
pub trait RunObserver {
    fn on_server_start(&self, _index: usize, _total: usize, _server: &Server) {}

    fn on_server_finish(&self, _index: usize, _total: usize, _server: &Server, _outcome: &ServerOutcome) {}
}

/// Observer that ignores all progress
pub struct NoopObserver;

impl RunObserver for NoopObserver {}

/// Runs the benchmark over a list of servers
pub struct BenchmarkRunner<E: QueryExecutor> {
    executor: E,
    run_config: RunConfig,
    logger: BenchLogger,
}

impl<E: QueryExecutor> BenchmarkRunner<E> {
    pub fn new(executor: E, run_config: RunConfig) -> Self {
        Self::with_logger(executor, run_config, BenchLogger::quiet())
    }

    pub fn with_logger(executor: E, run_config: RunConfig, logger: BenchLogger) -> Self {
        Self {
            executor,
            run_config,
            logger,
        }
    }

    pub fn run_config(&self) -> &RunConfig {
        &self.run_config
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Benchmark every server and return the ranked results with the exceeded log
    pub async fn run(&self, servers: &[Server], domains: &[String]) -> Result<BenchmarkReport> {
        self.run_with_observer(servers, domains, &NoopObserver).await
    }

    /// Like [`run`](Self::run), reporting per-server progress to `observer`
    pub async fn run_with_observer(
        &self,
        servers: &[Server],
        domains: &[String],
        observer: &dyn RunObserver,
    ) -> Result<BenchmarkReport> {
        if servers.is_empty() {
            return Err(AppError::validation("No servers to benchmark"));
        }
        if domains.is_empty() {
            return Err(AppError::validation("No domains to resolve"));
        }
        self.run_config.validate()?;

        let started_at = Utc::now();
        let sampler = ServerSampler::new(&self.executor, self.run_config, &self.logger);
        let total = servers.len();

        let mut results = Vec::with_capacity(total);
        let mut exceeded = Vec::new();

        for (index, server) in servers.iter().enumerate() {
            observer.on_server_start(index, total, server);

            let outcome = sampler.sample(server, domains).await;
            observer.on_server_finish(index, total, server, &outcome);

            if let Some(result) = outcome.result {
                results.push(result);
            }
            if let Some(event) = outcome.exceeded {
                exceeded.push(event);
            }
        }

        rank_results(&mut results);

        Ok(BenchmarkReport {
            results,
            exceeded,
            started_at,
            finished_at: Utc::now(),
        })
    }
}

/// Sort ascending by average latency; ties keep their input order
pub fn rank_results(results: &mut [BenchmarkResult]) {
    results.sort_by(|a, b| a.avg_ms.partial_cmp(&b.avg_ms).unwrap_or(Ordering::Equal));
}
