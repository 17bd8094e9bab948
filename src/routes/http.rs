// GET handlers: version, ips

use axum::{Json, response::IntoResponse};

use crate::models::IpList;
use crate::telemetry;
use crate::version::{NAME, VERSION};

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET /ips — IPv4 addresses of every local interface.
pub(super) async fn ips_handler() -> Json<IpList> {
    let ips = telemetry::local_ipv4_addresses().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, operation = "local_ipv4_addresses", "Listing IPs failed");
        Vec::new()
    });
    Json(IpList { ips })
}
