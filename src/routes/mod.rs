// HTTP routes

mod http;
mod stats;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

use crate::history::HistoryStore;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) history: HistoryStore,
}

pub fn app(history: HistoryStore) -> Router {
    let state = AppState { history };
    Router::new()
        .route("/stats", post(stats::ingest_handler)) // POST /stats
        .route("/stats/latest", get(stats::latest_handler)) // GET /stats/latest
        .route("/stats/history", get(stats::history_handler)) // GET /stats/history
        .route("/version", get(http::version_handler)) // GET /version
        .route("/ips", get(http::ips_handler)) // GET /ips
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
