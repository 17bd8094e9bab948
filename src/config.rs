use serde::Deserialize;
use std::path::Path;

use crate::history::DEFAULT_MAX_HISTORY_LENGTH;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub history: HistoryConfig,
    pub sender: SenderConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 1337,
            host: "0.0.0.0".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Max number of samples kept in memory; older ones are dropped.
    pub max_length: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_HISTORY_LENGTH,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SenderConfig {
    /// POST target for collected samples.
    pub endpoint: String,
    pub send_interval_ms: u64,
    pub request_timeout_ms: u64,
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:1337/stats".into(),
            send_interval_ms: 5000,
            request_timeout_ms: 5000,
        }
    }
}

impl AppConfig {
    /// Loads `CONFIG_FILE` (or `config.toml` when present, else defaults), then applies
    /// `PORT` and `STATS_ENDPOINT` from the environment.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = match std::env::var("CONFIG_FILE") {
            Ok(path) => Self::load_from_str(&std::fs::read_to_string(&path)?)?,
            Err(_) if Path::new("config.toml").exists() => {
                Self::load_from_str(&std::fs::read_to_string("config.toml")?)?
            }
            Err(_) => Self::default(),
        };
        config.apply_env_overrides(
            std::env::var("PORT").ok().as_deref(),
            std::env::var("STATS_ENDPOINT").ok().as_deref(),
        )?;
        Ok(config)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env_overrides(
        &mut self,
        port: Option<&str>,
        endpoint: Option<&str>,
    ) -> anyhow::Result<()> {
        if let Some(port) = port {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("PORT must be a valid port number, got {:?}: {}", port, e))?;
        }
        if let Some(endpoint) = endpoint {
            self.sender.endpoint = endpoint.trim().to_string();
        }
        self.validate()
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(!self.server.host.is_empty(), "server.host must be non-empty");
        anyhow::ensure!(
            self.history.max_length > 0,
            "history.max_length must be > 0, got {}",
            self.history.max_length
        );
        anyhow::ensure!(
            self.sender.endpoint.starts_with("http://")
                || self.sender.endpoint.starts_with("https://"),
            "sender.endpoint must be an http(s) URL, got {:?}",
            self.sender.endpoint
        );
        anyhow::ensure!(
            self.sender.send_interval_ms > 0,
            "sender.send_interval_ms must be > 0, got {}",
            self.sender.send_interval_ms
        );
        anyhow::ensure!(
            self.sender.request_timeout_ms > 0,
            "sender.request_timeout_ms must be > 0, got {}",
            self.sender.request_timeout_ms
        );
        Ok(())
    }
}
