// Build-time identity from Cargo.toml (GET /version, sender User-Agent)

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const NAME: &str = env!("CARGO_PKG_NAME");

/// `pistats/<version>`, sent by the collector on every POST.
pub fn user_agent() -> String {
    format!("{}/{}", NAME, VERSION)
}
