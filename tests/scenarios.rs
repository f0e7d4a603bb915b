//! End-to-end runs: load, probe, rank, persist.

use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use endpoint_prober::candidates::Endpoint;
use endpoint_prober::config::{Collection, PersistMode, ProberConfig};
use endpoint_prober::persist::staging_path;
use endpoint_prober::probe::{HttpProber, ProbeOutcome};
use endpoint_prober::resilience::{retry_probe, Backoff, RetryPolicy};
use endpoint_prober::{ProberError, Runner, Shutdown};

mod common;

async fn run(config: ProberConfig) -> endpoint_prober::RunReport {
    let shutdown = Shutdown::new();
    run_until(config, &shutdown).await
}

async fn run_until(config: ProberConfig, shutdown: &Shutdown) -> endpoint_prober::RunReport {
    let prober = Arc::new(HttpProber::with_client(common::direct_client(), &config.probe));
    Runner::new(config)
        .run_with(prober, shutdown.subscribe())
        .await
        .unwrap()
}

/// Backend answering after `delay`, counting requests.
async fn delayed_backend(delay: Duration, hits: Arc<AtomicU32>) -> String {
    let addr = common::start_programmable_backend(move |_| {
        hits.fetch_add(1, Ordering::SeqCst);
        async move {
            tokio::time::sleep(delay).await;
            (200, r#"{"data":"你好，世界"}"#.to_string())
        }
    })
    .await;
    common::endpoint_for(addr)
}

#[tokio::test]
async fn test_duplicates_probed_once_and_ranked_by_latency() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::test_config(dir.path());

    let a_hits = Arc::new(AtomicU32::new(0));
    let b_hits = Arc::new(AtomicU32::new(0));
    let a = delayed_backend(Duration::from_millis(50), a_hits.clone()).await;
    let b = delayed_backend(Duration::from_millis(400), b_hits.clone()).await;
    std::fs::write(&config.files.input_path, format!("{b}\n{a}\n{a}\n{b}\n")).unwrap();

    let report = run(config.clone()).await;

    assert_eq!(report.candidates, 2);
    assert_eq!(report.survivors, 2);
    assert_eq!(common::read_lines(&config.files.output_path), vec![a.clone(), b.clone()]);
    assert_eq!(a_hits.load(Ordering::SeqCst), 1);
    assert_eq!(b_hits.load(Ordering::SeqCst), 1);

    let flattened = std::fs::read_to_string(config.files.flatten_path.as_ref().unwrap()).unwrap();
    assert_eq!(flattened, format!("{a},{b}"));
}

#[tokio::test]
async fn test_always_failing_endpoint_is_dropped_after_budget() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::test_config(dir.path());

    let hits = Arc::new(AtomicU32::new(0));
    let counter = hits.clone();
    let addr = common::start_programmable_backend(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        async { (500, r#"{"error":"down"}"#.to_string()) }
    })
    .await;
    std::fs::write(&config.files.input_path, common::endpoint_for(addr)).unwrap();

    let report = run(config.clone()).await;

    assert_eq!(report.survivors, 0);
    assert_eq!(report.failed, 1);
    assert_eq!(hits.load(Ordering::SeqCst), 3);
    assert_eq!(std::fs::read_to_string(&config.files.output_path).unwrap(), "");
}

#[tokio::test]
async fn test_latency_is_from_the_winning_attempt() {
    let hits = Arc::new(AtomicU32::new(0));
    let counter = hits.clone();
    let addr = common::start_programmable_backend(move |_| {
        let call = counter.fetch_add(1, Ordering::SeqCst) + 1;
        async move {
            if call <= 2 {
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
            (200, r#"{"data":"ok"}"#.to_string())
        }
    })
    .await;

    let config = ProberConfig::default();
    let prober = HttpProber::with_client(common::direct_client(), &config.probe)
        .with_timeout(Duration::from_millis(300));
    let policy = RetryPolicy::new(3, Backoff::Fixed(Duration::from_millis(100)));
    let endpoint = Endpoint::from(common::endpoint_for(addr));

    let outcome = retry_probe(&prober, &endpoint, &policy).await;

    assert_eq!(hits.load(Ordering::SeqCst), 3);
    match outcome {
        ProbeOutcome::Success { latency, .. } => {
            // Two timed-out attempts plus backoff would exceed 600ms.
            assert!(latency < Duration::from_millis(300), "latency {latency:?}");
        }
        other => panic!("expected success, got {other:?}"),
    }
}

#[tokio::test]
async fn test_merge_reprobes_prior_results() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = common::test_config(dir.path());
    config.persist.mode = PersistMode::Merge;
    config.persist.batch_size = 2;

    let fresh = common::endpoint_for(common::start_healthy_backend().await);
    let kept = common::endpoint_for(common::start_healthy_backend().await);
    let dead = common::endpoint_for(common::closed_addr().await);

    std::fs::write(&config.files.input_path, format!("{fresh}\n")).unwrap();
    std::fs::write(&config.files.output_path, format!("{kept}\n{dead}\n")).unwrap();

    let report = run(config.clone()).await;

    assert_eq!(report.candidates, 3);
    let mut lines = common::read_lines(&config.files.output_path);
    lines.sort();
    let mut expected = vec![fresh, kept];
    expected.sort();
    assert_eq!(lines, expected);
}

#[tokio::test]
async fn test_streaming_merge_ends_ranked() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = common::test_config(dir.path());
    config.persist.mode = PersistMode::Merge;
    config.persist.batch_size = 1;
    config.scheduler.collection = Collection::StreamAsCompleted;
    config.scheduler.max_concurrency = Some(2);

    let slow = delayed_backend(Duration::from_millis(300), Arc::new(AtomicU32::new(0))).await;
    let fast = delayed_backend(Duration::from_millis(10), Arc::new(AtomicU32::new(0))).await;
    let mid = delayed_backend(Duration::from_millis(120), Arc::new(AtomicU32::new(0))).await;
    let dead = common::endpoint_for(common::closed_addr().await);
    std::fs::write(
        &config.files.input_path,
        format!("{slow}\n{dead}\n{fast}\n{mid}\n"),
    )
    .unwrap();

    let report = run(config.clone()).await;

    assert_eq!(report.survivors, 3);
    assert_eq!(common::read_lines(&config.files.output_path), vec![fast, mid, slow]);
}

#[tokio::test]
async fn test_streamed_survivors_visible_before_fan_in_completes() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = common::test_config(dir.path());
    config.persist.mode = PersistMode::Merge;
    config.persist.batch_size = 1;
    config.scheduler.collection = Collection::StreamAsCompleted;

    let fast = delayed_backend(Duration::from_millis(10), Arc::new(AtomicU32::new(0))).await;
    let slow = delayed_backend(Duration::from_secs(1), Arc::new(AtomicU32::new(0))).await;
    std::fs::write(&config.files.input_path, format!("{fast}\n")).unwrap();
    std::fs::write(&config.files.output_path, format!("{slow}\n")).unwrap();

    let output = config.files.output_path.clone();
    let staging = staging_path(Path::new(&output));
    let mid_run = async {
        tokio::time::sleep(Duration::from_millis(500)).await;
        let staged = common::read_lines(&staging);
        let target = common::read_lines(&output);
        (staged, target)
    };

    let shutdown = Shutdown::new();
    let (report, (staged, target)) = tokio::join!(run_until(config.clone(), &shutdown), mid_run);

    assert_eq!(staged, vec![fast.clone()]);
    assert_eq!(target, vec![slow.clone()]);
    assert_eq!(report.survivors, 2);
    assert_eq!(common::read_lines(&output), vec![fast, slow]);
    assert!(!staging.exists());
}

#[tokio::test]
async fn test_interrupted_run_keeps_unfinished_candidates() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = common::test_config(dir.path());
    config.files.output_path = config.files.input_path.clone();

    let slow = delayed_backend(Duration::from_secs(3), Arc::new(AtomicU32::new(0))).await;
    let fast = common::endpoint_for(common::start_healthy_backend().await);
    std::fs::write(&config.files.input_path, format!("{slow}\n{fast}\n")).unwrap();

    let shutdown = Shutdown::new();
    let interrupt = async {
        tokio::time::sleep(Duration::from_millis(500)).await;
        shutdown.trigger();
    };
    let (report, ()) = tokio::join!(run_until(config.clone(), &shutdown), interrupt);

    assert_eq!(report.candidates, 2);
    assert_eq!(report.survivors, 1);
    assert_eq!(report.cancelled, 1);
    assert_eq!(common::read_lines(&config.files.input_path), vec![fast, slow]);
}

#[tokio::test]
async fn test_missing_input_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::test_config(dir.path());
    let prober = Arc::new(HttpProber::with_client(common::direct_client(), &config.probe));
    let shutdown = Shutdown::new();

    let err = Runner::new(config)
        .run_with(prober, shutdown.subscribe())
        .await
        .unwrap_err();
    assert!(matches!(err, ProberError::Io { .. }));
}

#[tokio::test]
async fn test_empty_input_writes_empty_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::test_config(dir.path());
    std::fs::write(&config.files.input_path, "\n\n").unwrap();

    let report = run(config.clone()).await;

    assert_eq!(report.candidates, 0);
    assert_eq!(std::fs::read_to_string(&config.files.output_path).unwrap(), "");
}
