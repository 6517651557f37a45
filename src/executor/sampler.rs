//! Per-server sampling with the abort-on-timeout policy

use crate::{
    dns::QueryExecutor,
    logging::BenchLogger,
    models::{BenchmarkResult, ExceededEvent, RunConfig, Server},
    stats,
};
use serde::{Deserialize, Serialize};

/// Upper bound on the up-front sample buffer
const MAX_RESERVED_SAMPLES: usize = 65_536;

/// Everything one server's sampling produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerOutcome {
    /// `None` when the server produced no samples
    pub result: Option<BenchmarkResult>,
    /// Set when the server was abandoned
    pub exceeded: Option<ExceededEvent>,
    /// Queries issued, successful or not
    pub attempted: usize,
}

impl ServerOutcome {
    pub fn aborted(&self) -> bool {
        self.exceeded.is_some()
    }
}

/// Drives a [`QueryExecutor`] over every (run, domain) pair for one server
pub struct ServerSampler<'a, E: QueryExecutor + ?Sized> {
    executor: &'a E,
    run_config: RunConfig,
    logger: &'a BenchLogger,
}

impl<'a, E: QueryExecutor + ?Sized> ServerSampler<'a, E> {
    pub fn new(executor: &'a E, run_config: RunConfig, logger: &'a BenchLogger) -> Self {
        Self {
            executor,
            run_config,
            logger,
        }
    }

    /// Sample one server sequentially: runs in order, domains in list order
    ///
    /// The timeout counter is cumulative for the server: successes do not reset it.
    /// When it reaches `max_timeouts` the server is abandoned immediately and an
    /// [`ExceededEvent`] for the offending query is returned alongside any partial
    /// result.
    pub async fn sample(&self, server: &Server, domains: &[String]) -> ServerOutcome {
        let timeout = self.run_config.timeout();
        let expected = (self.run_config.runs as usize).saturating_mul(domains.len());
        let mut samples: Vec<f64> = Vec::with_capacity(expected.min(MAX_RESERVED_SAMPLES));
        let mut timeouts: u32 = 0;
        let mut attempted = 0usize;
        let mut exceeded = None;

        'runs: for run in 1..=self.run_config.runs {
            for domain in domains {
                attempted += 1;
                match self.executor.execute(&server.address, domain, timeout).await.latency_ms() {
                    Some(latency_ms) => samples.push(latency_ms),
                    None => {
                        timeouts += 1;
                        if timeouts >= self.run_config.max_timeouts {
                            let event = ExceededEvent::new(server, domain, run, self.run_config.timeout_ms);
                            self.logger.log_exceeded(&event, timeouts).await;
                            exceeded = Some(event);
                            break 'runs;
                        }
                    }
                }
            }

            if run < self.run_config.runs && self.run_config.run_pause_ms > 0 {
                tokio::time::sleep(self.run_config.run_pause()).await;
            }
        }

        let result = match stats::summarize(&samples) {
            Ok(summary) => {
                let result = BenchmarkResult::new(server, samples.len(), summary);
                self.logger.log_server_complete(&result, attempted).await;
                Some(result)
            }
            Err(_) => {
                self.logger.log_server_dropped(server, attempted).await;
                None
            }
        };

        ServerOutcome {
            result,
            exceeded,
            attempted,
        }
    }
}
