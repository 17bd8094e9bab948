// Periodic sender: gather one sample per tick and POST it to the stats API.
// Delivery is best-effort: failures are logged and the sample is dropped, never retried.

use crate::error::CollectorError;
use crate::models::SystemSample;
use crate::telemetry::TelemetryProvider;
use reqwest::StatusCode;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinSet;
use tokio::time::{Duration, Instant, interval_at};
use tracing::{Instrument, instrument};

/// HTTP client for the stats API's ingest endpoint. One request per call, no retry.
pub struct StoreClient {
    client: reqwest::Client,
    endpoint: String,
}

impl StoreClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(crate::version::user_agent())
            .build()
            .map_err(|e| anyhow::anyhow!("failed to create HTTP client: {}", e))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[instrument(skip(self, sample), fields(operation = "send_sample", timestamp = %sample.timestamp))]
    pub async fn send(&self, sample: &SystemSample) -> Result<StatusCode, CollectorError> {
        let response = self.client.post(&self.endpoint).json(sample).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CollectorError::Rejected { status, body });
        }
        Ok(status)
    }
}

/// Result of one tick; only used for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Sent(StatusCode),
    GatherFailed,
    DeliveryFailed,
}

/// One tick: gather, then send. Every failure ends here.
pub async fn collect_and_send<P: TelemetryProvider>(
    provider: &P,
    client: &StoreClient,
) -> TickOutcome {
    let sample = match provider.gather().await {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %e, operation = "gather", "Error gathering system stats");
            return TickOutcome::GatherFailed;
        }
    };

    if tracing::enabled!(tracing::Level::DEBUG) {
        let json = serde_json::to_string(&sample).unwrap_or_default();
        tracing::debug!(endpoint = client.endpoint(), sample = %json, "Sending data to API");
    }

    match client.send(&sample).await {
        Ok(status) => {
            tracing::info!(
                status = status.as_u16(),
                timestamp = %sample.timestamp,
                "Data sent successfully"
            );
            TickOutcome::Sent(status)
        }
        Err(e) => {
            tracing::warn!(error = %e, operation = "send_sample", "Error sending data to API");
            TickOutcome::DeliveryFailed
        }
    }
}

pub struct CollectorDeps<P> {
    pub provider: Arc<P>,
    pub client: Arc<StoreClient>,
    pub shutdown_rx: oneshot::Receiver<()>,
}

pub struct CollectorConfig {
    pub send_interval_ms: u64,
}

/// Spawns the collector. One attempt fires immediately; the periodic schedule starts one
/// interval later. Each tick runs as its own task, so a tick slower than the interval
/// overlaps with the next one. On shutdown, in-flight ticks are awaited.
pub fn spawn<P: TelemetryProvider>(
    deps: CollectorDeps<P>,
    config: CollectorConfig,
) -> tokio::task::JoinHandle<()> {
    let CollectorDeps {
        provider,
        client,
        mut shutdown_rx,
    } = deps;
    let period = Duration::from_millis(config.send_interval_ms);

    let collector_span = tracing::span!(
        tracing::Level::DEBUG,
        "collector",
        send_interval_ms = config.send_interval_ms
    );

    let task = async move {
        let mut ticks: JoinSet<TickOutcome> = JoinSet::new();
        let spawn_tick = |ticks: &mut JoinSet<TickOutcome>| {
            let provider = provider.clone();
            let client = client.clone();
            ticks.spawn(async move { collect_and_send(provider.as_ref(), client.as_ref()).await });
        };

        spawn_tick(&mut ticks);

        let mut tick = interval_at(Instant::now() + period, period);
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    while ticks.try_join_next().is_some() {}
                    spawn_tick(&mut ticks);
                }
                _ = &mut shutdown_rx => {
                    tracing::debug!("Collector shutting down");
                    break;
                }
            }
        }

        while ticks.join_next().await.is_some() {}
    };

    tokio::spawn(task.instrument(collector_span))
}
