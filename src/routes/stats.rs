// /stats handlers: ingest, latest, history

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::Value;

use super::AppState;
use crate::error::StoreError;
use crate::models::{IngestAck, StoredSample};

/// POST /stats — the body must be a JSON object with a non-empty string `timestamp`.
/// Everything else in it is stored as received.
pub(super) async fn ingest_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<IngestAck>), StoreError> {
    let sample = payload
        .map_err(|e| {
            tracing::warn!(error = %e, operation = "ingest", "Rejected stats body");
            StoreError::MalformedIngest
        })
        .and_then(|Json(body)| StoredSample::from_value(body).ok_or(StoreError::MalformedIngest))?;
    let timestamp = sample.timestamp().unwrap_or_default().to_string();
    let stored = state.history.ingest(sample).inspect_err(|_| {
        tracing::warn!(operation = "ingest", "Rejected stats without timestamp");
    })?;
    tracing::info!(
        timestamp = %timestamp,
        history_len = stored,
        "Received new stats"
    );
    Ok((StatusCode::CREATED, Json(IngestAck::new(stored))))
}

/// GET /stats/latest — 404 until the first sample arrives.
pub(super) async fn latest_handler(
    State(state): State<AppState>,
) -> Result<Json<StoredSample>, StoreError> {
    let latest = state.history.latest()?;
    tracing::debug!(
        operation = "latest",
        timestamp = latest.timestamp().unwrap_or_default(),
        "Serving latest stats"
    );
    Ok(Json(latest))
}

/// GET /stats/history — newest first, possibly empty.
pub(super) async fn history_handler(State(state): State<AppState>) -> Json<Vec<StoredSample>> {
    let history = state.history.all();
    tracing::debug!(operation = "history", history_len = history.len(), "Serving stats history");
    Json(history)
}
