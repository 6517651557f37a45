//! Timeout-bounded DNS query execution
//!
//! A query is one A-record lookup against one server. The lookup future is raced
//! against [`tokio::time::timeout`]; when the timer wins, the future is dropped,
//! which cancels the in-flight request and releases its socket. No task or thread
//! outlives a query, so hundreds of timed-out queries leave nothing behind.

use crate::{
    error::{AppError, Result},
    logging::BenchLogger,
    models::QueryOutcome,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use trust_dns_resolver::{
    config::{NameServerConfig, Protocol, ResolverConfig, ResolverOpts},
    TokioAsyncResolver,
};

/// Port used when a server address carries none
pub const DEFAULT_DNS_PORT: u16 = 53;

/// Performs a single name-resolution attempt
///
/// Implementations must return within `timeout` plus bounded cleanup, and must
/// report resolution errors as [`QueryOutcome::Timeout`]. No retries.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, server: &str, domain: &str, timeout: Duration) -> QueryOutcome;
}

/// [`QueryExecutor`] backed by trust-dns, DNS only
///
/// Resolvers are built lazily, one per server address and timeout, and reused for
/// the rest of the run. Hosts file lookups and the resolver cache are disabled so
/// every sample is a real round trip to the server.
pub struct DnsQueryExecutor {
    resolvers: RwLock<HashMap<String, TokioAsyncResolver>>,
    logger: BenchLogger,
}

impl DnsQueryExecutor {
    pub fn new() -> Self {
        Self::with_logger(BenchLogger::quiet())
    }

    pub fn with_logger(logger: BenchLogger) -> Self {
        Self {
            resolvers: RwLock::new(HashMap::new()),
            logger,
        }
    }

    /// Number of resolvers built so far
    pub async fn cached_resolvers(&self) -> usize {
        self.resolvers.read().await.len()
    }

    /// Get or create the resolver for a server address
    async fn resolver_for(&self, address: &str, timeout: Duration) -> Result<TokioAsyncResolver> {
        let cache_key = format!("{}@{}", address, timeout.as_millis());

        if let Some(resolver) = self.resolvers.read().await.get(&cache_key) {
            return Ok(resolver.clone());
        }

        let mut resolvers = self.resolvers.write().await;
        if let Some(resolver) = resolvers.get(&cache_key) {
            return Ok(resolver.clone());
        }

        let resolver = build_resolver(parse_server_address(address)?, timeout);
        resolvers.insert(cache_key, resolver.clone());
        Ok(resolver)
    }
}

impl Default for DnsQueryExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueryExecutor for DnsQueryExecutor {
    async fn execute(&self, server: &str, domain: &str, timeout: Duration) -> QueryOutcome {
        let resolver = match self.resolver_for(server, timeout).await {
            Ok(resolver) => resolver,
            Err(e) => {
                self.logger.log_query_failure(server, domain, &e.to_string()).await;
                return QueryOutcome::Timeout;
            }
        };

        let start = Instant::now();
        match tokio::time::timeout(timeout, resolver.ipv4_lookup(domain)).await {
            Ok(Ok(_)) => {
                let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
                self.logger.log_query(server, domain, latency_ms).await;
                QueryOutcome::success(latency_ms)
            }
            Ok(Err(e)) => {
                self.logger.log_query_failure(server, domain, &e.to_string()).await;
                QueryOutcome::Timeout
            }
            Err(_) => {
                let reason = format!("no answer within {}ms", timeout.as_millis());
                self.logger.log_query_failure(server, domain, &reason).await;
                QueryOutcome::Timeout
            }
        }
    }
}

/// Parse `ip`, `ip:port`, `[v6]` or `[v6]:port`; the port defaults to 53
pub fn parse_server_address(address: &str) -> Result<SocketAddr> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Server address cannot be empty"));
    }

    if let Ok(socket_addr) = trimmed.parse::<SocketAddr>() {
        return Ok(socket_addr);
    }

    let bare = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(trimmed);

    let ip = bare.parse::<IpAddr>()
        .map_err(|e| AppError::parse(format!("Invalid server address '{}': {}", address, e)))?;

    Ok(SocketAddr::new(ip, DEFAULT_DNS_PORT))
}

/// Build a single-server resolver: UDP with TCP fallback, no cache, no retries
fn build_resolver(socket_addr: SocketAddr, timeout: Duration) -> TokioAsyncResolver {
    let mut config = ResolverConfig::new();
    config.add_name_server(NameServerConfig::new(socket_addr, Protocol::Udp));
    config.add_name_server(NameServerConfig::new(socket_addr, Protocol::Tcp));

    TokioAsyncResolver::tokio(config, resolver_opts(timeout))
}

fn resolver_opts(timeout: Duration) -> ResolverOpts {
    let mut opts = ResolverOpts::default();
    opts.timeout = timeout;
    opts.attempts = 0;
    opts.cache_size = 0;
    opts.use_hosts_file = false;
    opts.num_concurrent_reqs = 1;
    opts.preserve_intermediates = false;
    opts
}
