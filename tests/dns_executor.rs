//! Query executor tests against local UDP sockets
//!
//! A silent socket stands in for an unresponsive server; a minimal responder
//! answers every A question with a fixed address.

use dns_latency_bench::{
    dns::{DnsQueryExecutor, QueryExecutor},
    executor::BenchmarkRunner,
    models::{QueryOutcome, RunConfig, Server},
};
use std::net::{Ipv4Addr, SocketAddr};
use std::time::{Duration, Instant};
use tokio::net::UdpSocket;

/// Bind a socket that never answers; keep it alive for the duration of the test
async fn silent_server() -> (UdpSocket, SocketAddr) {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = socket.local_addr().unwrap();
    (socket, addr)
}

/// Spawn a responder that answers A queries with `answer`
async fn responding_server(answer: Ipv4Addr) -> SocketAddr {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = socket.local_addr().unwrap();

    tokio::spawn(async move {
        let mut buf = [0u8; 512];
        loop {
            let Ok((len, peer)) = socket.recv_from(&mut buf).await else {
                break;
            };
            if let Some(response) = build_a_response(&buf[..len], answer) {
                let _ = socket.send_to(&response, peer).await;
            }
        }
    });

    addr
}

/// Build a response echoing the query's id and question with one A record
fn build_a_response(query: &[u8], answer: Ipv4Addr) -> Option<Vec<u8>> {
    if query.len() < 12 {
        return None;
    }

    // QNAME labels, then QTYPE and QCLASS
    let mut pos = 12;
    loop {
        let label_len = *query.get(pos)? as usize;
        pos += 1;
        if label_len == 0 {
            break;
        }
        pos += label_len;
    }
    let question_end = pos + 4;
    if question_end > query.len() {
        return None;
    }

    let mut response = Vec::with_capacity(question_end + 16);
    response.extend_from_slice(&query[0..2]);
    response.push(0x80 | (query[2] & 0x01));
    response.push(0x80);
    response.extend_from_slice(&[0, 1, 0, 1, 0, 0, 0, 0]);
    response.extend_from_slice(&query[12..question_end]);
    response.extend_from_slice(&[0xc0, 0x0c, 0, 1, 0, 1, 0, 0, 0, 60, 0, 4]);
    response.extend_from_slice(&answer.octets());
    Some(response)
}

#[tokio::test]
async fn test_silent_server_times_out_within_bound() {
    let (_socket, addr) = silent_server().await;
    let executor = DnsQueryExecutor::new();
    let timeout = Duration::from_millis(200);

    let start = Instant::now();
    let outcome = executor.execute(&addr.to_string(), "example.com", timeout).await;
    let elapsed = start.elapsed();

    assert_eq!(outcome, QueryOutcome::Timeout);
    assert!(elapsed >= Duration::from_millis(150), "returned too early: {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(1500), "returned too late: {:?}", elapsed);
}

#[tokio::test]
async fn test_responding_server_yields_latency() {
    let addr = responding_server(Ipv4Addr::new(93, 184, 216, 34)).await;
    let executor = DnsQueryExecutor::new();

    let outcome = executor.execute(&addr.to_string(), "example.com", Duration::from_millis(2000)).await;

    let latency = outcome.latency_ms().expect("query should succeed");
    assert!(latency >= 0.0);
    assert!(latency < 2000.0);
}

#[tokio::test]
async fn test_repeated_timeouts_do_not_accumulate() {
    let (_socket, addr) = silent_server().await;
    let executor = DnsQueryExecutor::new();
    let timeout = Duration::from_millis(50);

    let start = Instant::now();
    for i in 0..20 {
        let domain = format!("host{}.example.com", i);
        assert!(executor.execute(&addr.to_string(), &domain, timeout).await.is_timeout());
    }

    assert!(start.elapsed() < Duration::from_secs(10));
    assert_eq!(executor.cached_resolvers().await, 1);
}

#[tokio::test]
async fn test_benchmark_ranks_live_server_and_abandons_silent_one() {
    let (_socket, silent) = silent_server().await;
    let live = responding_server(Ipv4Addr::new(10, 1, 2, 3)).await;

    let run_config = RunConfig { runs: 2, timeout_ms: 300, max_timeouts: 1, run_pause_ms: 0 };
    let runner = BenchmarkRunner::new(DnsQueryExecutor::new(), run_config);
    let servers = vec![
        Server::new("Silent", silent.to_string()),
        Server::new("Live", live.to_string()),
    ];
    let domains = vec!["a.example".to_string(), "b.example".to_string()];

    let report = runner.run(&servers, &domains).await.unwrap();

    assert_eq!(report.results.len(), 1);
    let live_result = &report.results[0];
    assert_eq!(live_result.name, "Live");
    assert_eq!(live_result.samples, 4);
    assert_eq!(live_result.p95_ms, live_result.max_ms);

    assert_eq!(report.exceeded.len(), 1);
    assert_eq!(report.exceeded[0].name, "Silent");
    assert_eq!(report.exceeded[0].run, 1);
    assert_eq!(report.exceeded[0].domain, "a.example");
    assert_eq!(report.exceeded[0].threshold_ms, 300);
}
