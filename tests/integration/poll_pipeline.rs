//! End-to-end tests of the poll loop: fake router → parser → store

use bgp_exporter::{SessionState, parse_neighbors};
use pretty_assertions::assert_eq;
use std::net::IpAddr;

use crate::helpers::*;

fn ip(address: &str) -> IpAddr {
    address.parse().unwrap()
}

#[test]
fn test_fixture_parses_into_three_neighbors() {
    let records = parse_neighbors(FIXTURE);

    let summary: Vec<_> = records
        .iter()
        .map(|record| {
            (
                record.address.to_string(),
                record.session_state.map(SessionState::ordinal),
                record.accepted_prefixes,
                record.connections_established,
                record.connections_dropped,
            )
        })
        .collect();

    // the unnumbered `BGP neighbor on swp1: ...` block has no address header
    assert_eq!(
        summary,
        vec![
            ("10.0.0.1".to_string(), Some(6), 120, 4, 3),
            ("10.0.0.2".to_string(), Some(3), 0, 0, 0),
            ("2001:db8::3".to_string(), Some(4), 1, 1, 1),
        ]
    );
}

#[tokio::test]
async fn test_poll_stores_fixture_neighbors() {
    let exporter = spawn_exporter(FakeRouter::serving(FIXTURE));

    let report = exporter.poller.poll_now().await.unwrap();

    assert_eq!(report.committed, 3);
    assert_eq!(report.known, 3);
    let established = exporter.store.get(&ip("10.0.0.1")).await.unwrap();
    assert_eq!(established.session_state, Some(SessionState::Established));
    assert_eq!(established.accepted_prefixes, 120);

    exporter.poller.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_second_poll_replaces_record_entirely() {
    let router = FakeRouter::serving(&neighbor_block("10.0.0.1", "Established", 50, 3, 2));
    let exporter = spawn_exporter(router.clone());
    exporter.poller.poll_now().await.unwrap();

    router.set(Some(&neighbor_block("10.0.0.1", "Idle", 0, 4, 3)));
    exporter.poller.poll_now().await.unwrap();

    let snapshot = exporter.store.snapshot().await;
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].session_state, Some(SessionState::Idle));
    assert_eq!(snapshot[0].accepted_prefixes, 0);
    assert_eq!(snapshot[0].connections_established, 4);
    assert_eq!(snapshot[0].connections_dropped, 3);

    exporter.poller.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_vanished_neighbor_keeps_last_value() {
    let both = [
        neighbor_block("10.0.0.1", "Established", 10, 1, 0),
        neighbor_block("10.0.0.2", "Established", 20, 1, 0),
    ]
    .concat();
    let router = FakeRouter::serving(&both);
    let exporter = spawn_exporter(router.clone());
    exporter.poller.poll_now().await.unwrap();

    router.set(Some(&neighbor_block("10.0.0.1", "Active", 0, 1, 1)));
    let report = exporter.poller.poll_now().await.unwrap();

    assert_eq!(report.committed, 1);
    assert_eq!(report.known, 2);
    let stale = exporter.store.get(&ip("10.0.0.2")).await.unwrap();
    assert_eq!(stale.accepted_prefixes, 20);

    exporter.poller.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_duplicate_block_last_commit_wins() {
    let text = [
        neighbor_block("10.0.0.1", "Connect", 0, 1, 0),
        neighbor_block("10.0.0.1", "Established", 9, 2, 1),
    ]
    .concat();
    let exporter = spawn_exporter(FakeRouter::serving(&text));

    let report = exporter.poller.poll_now().await.unwrap();

    assert_eq!(report.committed, 2);
    assert_eq!(report.known, 1);
    let record = exporter.store.get(&ip("10.0.0.1")).await.unwrap();
    assert_eq!(record.session_state, Some(SessionState::Established));
    assert_eq!(record.accepted_prefixes, 9);

    exporter.poller.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_poll_updates_exporter_metrics() {
    let exporter = spawn_exporter(FakeRouter::serving(FIXTURE));

    exporter.poller.poll_now().await.unwrap();

    assert!(exporter.metrics.polls_total.get() >= 1);
    assert_eq!(exporter.metrics.poll_failures_total.get(), 0);
    assert_eq!(exporter.metrics.neighbors.get(), 3);

    let status = exporter.poller.status().unwrap();
    assert!(status.last_success.is_some());
    assert!(status.last_error.is_none());

    exporter.poller.shutdown().await.unwrap();
}
