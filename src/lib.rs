// Library for tests and both binaries to access modules

pub mod collector;
pub mod config;
pub mod error;
pub mod history;
pub mod logging;
pub mod models;
pub mod routes;
pub mod signal;
pub mod telemetry;
pub mod version;
