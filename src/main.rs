// Stats API: receives samples over HTTP and serves the bounded history.

use anyhow::Result;
use pistats::*;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let app_config = config::AppConfig::load()?;
    let history = history::HistoryStore::new(app_config.history.max_length);
    let app = routes::app(history);

    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        max_history_length = app_config.history.max_length,
        "Listening on http://{}",
        addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            signal::shutdown_signal().await;
            tracing::info!("Received shutdown signal");
        })
        .await?;

    Ok(())
}
