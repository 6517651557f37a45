//! End-to-end benchmark flow through the public library API
//!
//! A deterministic executor replaces the network so the whole pipeline
//! (sampling, aggregation, ranking, persistence) can be checked exactly.

use async_trait::async_trait;
use dns_latency_bench::{
    dns::QueryExecutor,
    executor::BenchmarkRunner,
    loader,
    models::{QueryOutcome, RunConfig},
    output::{read_results_json, ResultWriter},
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::TempDir;

/// Answers each server with a fixed latency list, cycling; unknown servers time out
struct FixedLatencies {
    latencies: HashMap<String, Vec<f64>>,
    calls: AtomicUsize,
}

impl FixedLatencies {
    fn new(entries: &[(&str, &[f64])]) -> Self {
        Self {
            latencies: entries.iter().map(|(addr, l)| (addr.to_string(), l.to_vec())).collect(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl QueryExecutor for FixedLatencies {
    async fn execute(&self, server: &str, _domain: &str, _timeout: Duration) -> QueryOutcome {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        match self.latencies.get(server) {
            Some(values) => QueryOutcome::success(values[call % values.len()]),
            None => QueryOutcome::Timeout,
        }
    }
}

fn run_config(runs: u32) -> RunConfig {
    RunConfig { runs, timeout_ms: 800, max_timeouts: 1, run_pause_ms: 0 }
}

#[tokio::test]
async fn test_full_pipeline_from_files_to_artifacts() {
    let dir = TempDir::new().unwrap();
    let servers_path = dir.path().join("servers.json");
    let domains_path = dir.path().join("domains.txt");
    std::fs::write(&servers_path, r#"[
        {"Name": "Slow", "Address": "10.0.0.1"},
        {"Name": "Dead", "Address": "10.0.0.2"},
        {"Name": "Fast", "Address": "10.0.0.3"}
    ]"#).unwrap();
    std::fs::write(&domains_path, "a.com\nb.com\n").unwrap();

    let servers = loader::load_servers(&servers_path).unwrap();
    let domains = loader::load_domains(&domains_path).unwrap();

    let executor = FixedLatencies::new(&[("10.0.0.1", &[40.0]), ("10.0.0.3", &[4.0])]);
    let runner = BenchmarkRunner::new(executor, run_config(3));
    let report = runner.run(&servers, &domains).await.unwrap();

    let names: Vec<&str> = report.results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Fast", "Slow"]);
    assert!(report.results.iter().all(|r| r.samples == 6));
    assert_eq!(report.exceeded.len(), 1);
    assert_eq!(report.exceeded[0].name, "Dead");

    let out = dir.path().join("out");
    let paths = ResultWriter::new(&out).write_all(&report, run_config(3), 1).unwrap();
    assert_eq!(paths.len(), 2);

    let document = read_results_json(&paths[0]).unwrap();
    assert_eq!(document.results, report.results);
    assert_eq!(document.exceeded, report.exceeded);

    let top = std::fs::read_to_string(&paths[1]).unwrap();
    assert!(top.contains("Fast"));
    assert!(!top.contains("Slow"));
}

#[tokio::test]
async fn test_statistics_follow_upper_median_and_max_p95() {
    let executor = FixedLatencies::new(&[("10.0.0.1", &[1.0, 2.0, 3.0, 4.0])]);
    let runner = BenchmarkRunner::new(executor, run_config(1));
    let servers = vec![dns_latency_bench::Server::new("S", "10.0.0.1")];
    let domains: Vec<String> = ["a.com", "b.com", "c.com", "d.com"].iter().map(|s| s.to_string()).collect();

    let report = runner.run(&servers, &domains).await.unwrap();
    let result = &report.results[0];

    assert_eq!(result.samples, 4);
    assert_eq!(result.avg_ms, 2.5);
    assert_eq!(result.median_ms, 3.0);
    assert_eq!(result.p95_ms, 4.0);
    assert_eq!(result.min_ms, 1.0);
    assert_eq!(result.max_ms, 4.0);
}

#[tokio::test]
async fn test_equal_averages_keep_input_order() {
    let executor = FixedLatencies::new(&[("10.0.0.1", &[7.0]), ("10.0.0.2", &[7.0])]);
    let runner = BenchmarkRunner::new(executor, run_config(1));
    let servers = vec![
        dns_latency_bench::Server::new("First", "10.0.0.1"),
        dns_latency_bench::Server::new("Second", "10.0.0.2"),
    ];

    let report = runner.run(&servers, &["a.com".to_string()]).await.unwrap();

    assert_eq!(report.results[0].name, "First");
    assert_eq!(report.results[1].name, "Second");
}
