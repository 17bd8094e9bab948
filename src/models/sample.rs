// Telemetry sample models (wire format shared by the sender and the API)

use serde::{Deserialize, Serialize};

/// CPU load and temperature. `None` means the provider could not measure it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CpuStats {
    pub usage: Option<f64>,
    pub temperature: Option<f64>,
}

/// GPU load and temperature. Often unavailable; serialized as `null` then.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GpuStats {
    pub usage: Option<f64>,
    pub temperature: Option<f64>,
}

/// Memory totals in bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryStats {
    pub total: u64,
    pub used: u64,
    pub free: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiskIo {
    pub read: u64,
    pub write: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiskStats {
    pub io: DiskIo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkIo {
    pub received: u64,
    pub sent: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkStats {
    pub io: NetworkIo,
}

/// One telemetry snapshot as the sender produces it. The API stores posted bodies
/// as [`StoredSample`](super::StoredSample) and does not parse them into this type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemSample {
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub cpu: CpuStats,
    #[serde(default)]
    pub gpu: GpuStats,
    #[serde(default)]
    pub memory: MemoryStats,
    #[serde(default)]
    pub disk: DiskStats,
    #[serde(default)]
    pub network: NetworkStats,
}

impl SystemSample {
    /// Sample with the given timestamp and every metric unknown or zero.
    pub fn empty(timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            ..Self::default()
        }
    }
}
