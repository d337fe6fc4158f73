//! Failure tests: the poller must survive bad input and failing sources
//! without clearing stored samples

use std::sync::Arc;

use bgp_exporter::source::FileSource;

use crate::helpers::*;

#[tokio::test]
async fn test_failing_source_reports_error_and_stores_nothing() {
    let router = FakeRouter::failing();
    let exporter = spawn_exporter(router.clone());

    let result = exporter.poller.poll_now().await;

    assert!(result.is_err(), "Poll should fail when the router shell fails");
    assert!(exporter.store.is_empty().await);
    assert!(router.fetches() >= 1);

    exporter.poller.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_failure_after_success_keeps_samples() {
    let router = FakeRouter::serving(FIXTURE);
    let exporter = spawn_exporter(router.clone());
    exporter.poller.poll_now().await.unwrap();
    let before = exporter.store.snapshot().await;

    router.set(None);
    assert!(exporter.poller.poll_now().await.is_err());

    assert_eq!(exporter.store.snapshot().await, before);
    let status = exporter.poller.status().unwrap();
    assert!(status.failures >= 1);
    assert!(status.last_error.is_some());

    exporter.poller.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_poller_recovers_after_failure() {
    let router = FakeRouter::failing();
    let exporter = spawn_exporter(router.clone());
    assert!(exporter.poller.poll_now().await.is_err());

    router.set(Some(FIXTURE));
    let report = exporter.poller.poll_now().await.unwrap();

    assert_eq!(report.known, 3);
    let status = exporter.poller.status().unwrap();
    assert!(status.last_error.is_none());

    exporter.poller.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_garbage_output_commits_nothing() {
    let garbage = "% Unknown command: show ip bgp neighbors\n\n\u{1f600} ###\n";
    let exporter = spawn_exporter(FakeRouter::serving(garbage));

    let report = exporter.poller.poll_now().await.unwrap();

    assert_eq!(report.committed, 0);
    assert!(exporter.store.is_empty().await);

    exporter.poller.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_truncated_output_drops_last_block() {
    let truncated = format!(
        "{}BGP neighbor is 10.0.0.9, remote AS 65009, local AS 65000\n  BGP state = Established, up for 1d\n  12 accepted prefixes\n",
        neighbor_block("10.0.0.1", "Established", 1, 1, 0)
    );
    let exporter = spawn_exporter(FakeRouter::serving(&truncated));

    let report = exporter.poller.poll_now().await.unwrap();

    assert_eq!(report.committed, 1);
    assert!(
        exporter
            .store
            .get(&"10.0.0.9".parse().unwrap())
            .await
            .is_none()
    );

    exporter.poller.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_missing_file_source_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = spawn_exporter(Arc::new(FileSource::new(dir.path().join("missing.txt"))));

    assert!(exporter.poller.poll_now().await.is_err());

    std::fs::write(dir.path().join("missing.txt"), FIXTURE).unwrap();
    let report = exporter.poller.poll_now().await.unwrap();
    assert_eq!(report.known, 3);

    exporter.poller.shutdown().await.unwrap();
}

#[cfg(unix)]
#[tokio::test]
async fn test_hanging_command_times_out() {
    use bgp_exporter::source::CommandSource;
    use std::time::Duration;

    let source = CommandSource::new(
        "sh",
        vec!["-c".to_string(), "sleep 10".to_string()],
        Duration::from_millis(200),
    );
    let exporter = spawn_exporter(Arc::new(source));

    let result = tokio::time::timeout(Duration::from_secs(5), exporter.poller.poll_now())
        .await
        .expect("poll must not hang past the command timeout");

    assert!(result.is_err());
    let status = exporter.poller.status().unwrap();
    assert!(status.last_error.unwrap().contains("did not finish"));

    exporter.poller.shutdown().await.unwrap();
}
