// Stats sender: gathers host telemetry on an interval and POSTs it to the stats API.

use anyhow::Result;
use pistats::collector::{CollectorConfig, CollectorDeps, StoreClient};
use pistats::telemetry::SysinfoProvider;
use pistats::*;
use std::sync::Arc;
use tokio::time::Duration;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let app_config = config::AppConfig::load()?;
    let sender = &app_config.sender;
    let client = Arc::new(StoreClient::new(
        sender.endpoint.clone(),
        Duration::from_millis(sender.request_timeout_ms),
    )?);
    let provider = Arc::new(SysinfoProvider::new());

    tracing::info!(
        endpoint = %sender.endpoint,
        send_interval_ms = sender.send_interval_ms,
        "Starting system stats monitor"
    );

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    let collector_handle = collector::spawn(
        CollectorDeps {
            provider,
            client,
            shutdown_rx,
        },
        CollectorConfig {
            send_interval_ms: sender.send_interval_ms,
        },
    );

    signal::shutdown_signal().await;
    tracing::info!("Received shutdown signal");
    let _ = shutdown_tx.send(());
    collector_handle.await?;

    Ok(())
}
