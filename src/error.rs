// Error taxonomy for the API (StoreError) and the sender (CollectorError)

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::models::MessageResponse;

/// Failures surfaced to API clients. Neither is fatal to the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid data format. Timestamp is required.")]
    MalformedIngest,
    #[error("No stats available yet.")]
    EmptyHistory,
}

impl StoreError {
    pub fn status(&self) -> StatusCode {
        match self {
            StoreError::MalformedIngest => StatusCode::BAD_REQUEST,
            StoreError::EmptyHistory => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        (self.status(), Json(MessageResponse::new(self.to_string()))).into_response()
    }
}

/// Failures inside one collector tick. Logged and dropped by the caller, never retried.
#[derive(Debug, thiserror::Error)]
pub enum CollectorError {
    #[error("gathering system stats failed: {0}")]
    Gather(String),
    #[error("sending stats failed: {0}")]
    Delivery(#[from] reqwest::Error),
    #[error("stats API rejected sample with status {status}: {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },
}
