// Collector: one tick against a live in-process API, failure paths, schedule and overlap

mod common;

use common::{sample, stored, timestamps};
use pistats::collector::{self, CollectorConfig, CollectorDeps, StoreClient, TickOutcome};
use pistats::error::CollectorError;
use pistats::history::HistoryStore;
use pistats::models::SystemSample;
use pistats::routes;
use pistats::telemetry::TelemetryProvider;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant};

/// Hands out samples t1, t2, ... in call order.
#[derive(Default)]
struct CountingProvider {
    calls: AtomicUsize,
}

impl TelemetryProvider for CountingProvider {
    async fn gather(&self) -> Result<SystemSample, CollectorError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(sample(&format!("t{n}")))
    }
}

struct FailingProvider;

impl TelemetryProvider for FailingProvider {
    async fn gather(&self) -> Result<SystemSample, CollectorError> {
        Err(CollectorError::Gather("sensor unavailable".into()))
    }
}

struct FixedProvider(SystemSample);

impl TelemetryProvider for FixedProvider {
    async fn gather(&self) -> Result<SystemSample, CollectorError> {
        Ok(self.0.clone())
    }
}

/// Gathering takes `delay`; tracks how many gathers run at once.
struct SlowProvider {
    delay: Duration,
    active: AtomicUsize,
    max_active: AtomicUsize,
    started: AtomicUsize,
    finished: AtomicUsize,
}

impl SlowProvider {
    fn new(delay: Duration) -> Self {
        Self {
            delay,
            active: AtomicUsize::new(0),
            max_active: AtomicUsize::new(0),
            started: AtomicUsize::new(0),
            finished: AtomicUsize::new(0),
        }
    }
}

impl TelemetryProvider for SlowProvider {
    async fn gather(&self) -> Result<SystemSample, CollectorError> {
        let n = self.started.fetch_add(1, Ordering::SeqCst) + 1;
        let now_active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now_active, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.active.fetch_sub(1, Ordering::SeqCst);
        self.finished.fetch_add(1, Ordering::SeqCst);
        Ok(sample(&format!("t{n}")))
    }
}

/// Serves the API on an ephemeral local port; returns the ingest URL and the store behind it.
async fn spawn_api() -> (String, HistoryStore) {
    let history = HistoryStore::new(60);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = routes::app(history.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}/stats", addr), history)
}

fn client(endpoint: &str) -> StoreClient {
    StoreClient::new(endpoint, Duration::from_secs(2)).unwrap()
}

fn spawn_collector<P: TelemetryProvider>(
    provider: Arc<P>,
    endpoint: &str,
    send_interval_ms: u64,
) -> (JoinHandle<()>, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let handle = collector::spawn(
        CollectorDeps {
            provider,
            client: Arc::new(client(endpoint)),
            shutdown_rx,
        },
        CollectorConfig { send_interval_ms },
    );
    (handle, shutdown_tx)
}

/// Polls `cond` every 10ms until it holds or `limit` elapses.
async fn wait_until(limit: Duration, cond: impl Fn() -> bool) -> bool {
    let deadline = Instant::now() + limit;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    cond()
}

#[tokio::test]
async fn tick_delivers_sample_to_api() {
    let (endpoint, history) = spawn_api().await;
    let provider = CountingProvider::default();

    let outcome = collector::collect_and_send(&provider, &client(&endpoint)).await;

    assert_eq!(outcome, TickOutcome::Sent(reqwest::StatusCode::CREATED));
    assert_eq!(history.latest().unwrap(), stored("t1"));
}

#[tokio::test]
async fn gather_failure_skips_tick() {
    let (endpoint, history) = spawn_api().await;

    let outcome = collector::collect_and_send(&FailingProvider, &client(&endpoint)).await;

    assert_eq!(outcome, TickOutcome::GatherFailed);
    assert!(history.is_empty());
}

#[tokio::test]
async fn unreachable_api_drops_sample() {
    let provider = CountingProvider::default();
    let outcome =
        collector::collect_and_send(&provider, &client("http://127.0.0.1:1/stats")).await;
    assert_eq!(outcome, TickOutcome::DeliveryFailed);
}

#[tokio::test]
async fn rejected_sample_is_a_delivery_failure() {
    let (endpoint, history) = spawn_api().await;
    let provider = FixedProvider(SystemSample::empty(""));

    let err = client(&endpoint)
        .send(&provider.gather().await.unwrap())
        .await
        .unwrap_err();
    match err {
        CollectorError::Rejected { status, body } => {
            assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
            assert!(body.contains("Timestamp is required"));
        }
        other => panic!("expected Rejected, got {other:?}"),
    }

    let outcome = collector::collect_and_send(&provider, &client(&endpoint)).await;
    assert_eq!(outcome, TickOutcome::DeliveryFailed);
    assert!(history.is_empty());
}

#[tokio::test]
async fn spawned_collector_sends_immediately_before_first_period() {
    let (endpoint, history) = spawn_api().await;
    let provider = Arc::new(CountingProvider::default());
    let (handle, shutdown_tx) = spawn_collector(provider.clone(), &endpoint, 60_000);

    assert!(
        wait_until(Duration::from_secs(5), || !history.is_empty()).await,
        "initial attempt never arrived"
    );
    let _ = shutdown_tx.send(());
    handle.await.unwrap();

    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    assert_eq!(timestamps(&history.all()), vec!["t1"]);
}

#[tokio::test]
async fn spawned_collector_keeps_sending_on_schedule() {
    let (endpoint, history) = spawn_api().await;
    let provider = Arc::new(CountingProvider::default());
    let (handle, shutdown_tx) = spawn_collector(provider.clone(), &endpoint, 50);

    assert!(
        wait_until(Duration::from_secs(5), || history.len() >= 3).await,
        "expected immediate + periodic sends, got {}",
        history.len()
    );
    let _ = shutdown_tx.send(());
    handle.await.unwrap();

    let sent = provider.calls.load(Ordering::SeqCst);
    assert_eq!(history.len(), sent);
    assert_eq!(history.all().last().unwrap().timestamp(), Some("t1"));
}

#[tokio::test]
async fn slow_ticks_overlap_and_shutdown_waits_for_them() {
    let (endpoint, history) = spawn_api().await;
    let provider = Arc::new(SlowProvider::new(Duration::from_millis(150)));
    let (handle, shutdown_tx) = spawn_collector(provider.clone(), &endpoint, 50);

    let overlapped = wait_until(Duration::from_secs(5), || {
        provider.max_active.load(Ordering::SeqCst) >= 2
    })
    .await;
    assert!(overlapped, "a tick slower than the interval should overlap the next one");

    let _ = shutdown_tx.send(());
    handle.await.unwrap();

    let started = provider.started.load(Ordering::SeqCst);
    assert_eq!(provider.active.load(Ordering::SeqCst), 0);
    assert_eq!(provider.finished.load(Ordering::SeqCst), started);
    assert_eq!(history.len(), started.min(60));
}
