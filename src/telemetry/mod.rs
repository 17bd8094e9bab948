// Host telemetry via sysinfo

mod linux;

use crate::error::CollectorError;
use crate::models::*;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use sysinfo::{Components, Disks, Networks, System};
use tracing::instrument;

/// Source of one best-effort sample per call. Unmeasurable metrics come back as
/// `None` (cpu/gpu) or `0` (memory, disk, network) instead of failing the sample.
pub trait TelemetryProvider: Send + Sync + 'static {
    fn gather(&self) -> impl Future<Output = Result<SystemSample, CollectorError>> + Send;
}

/// Component labels that identify a CPU/package sensor.
const CPU_SENSOR_LABELS: &[&str] = &["cpu", "package", "tctl", "coretemp", "k10temp"];

struct Probe {
    sys: System,
    disks: Disks,
    networks: Networks,
    components: Components,
    last_cpu_refresh: Instant,
}

pub struct SysinfoProvider {
    probe: Arc<Mutex<Probe>>,
}

impl Default for SysinfoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoProvider {
    pub fn new() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();
        Self {
            probe: Arc::new(Mutex::new(Probe {
                sys,
                disks: Disks::new_with_refreshed_list(),
                networks: Networks::new_with_refreshed_list(),
                components: Components::new_with_refreshed_list(),
                last_cpu_refresh: Instant::now(),
            })),
        }
    }
}

impl TelemetryProvider for SysinfoProvider {
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "gather"))]
    async fn gather(&self) -> Result<SystemSample, CollectorError> {
        let probe = self.probe.clone();
        tokio::task::spawn_blocking(move || {
            let mut probe = probe
                .lock()
                .map_err(|e| CollectorError::Gather(format!("sysinfo lock poisoned: {}", e)))?;
            Ok(probe.sample())
        })
        .await
        .map_err(|e| CollectorError::Gather(format!("sysinfo task join: {}", e)))?
    }
}

impl Probe {
    fn sample(&mut self) -> SystemSample {
        let timestamp =
            chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        SystemSample {
            timestamp,
            cpu: CpuStats {
                usage: self.cpu_usage(),
                temperature: self.cpu_temperature(),
            },
            gpu: GpuStats {
                usage: linux::read_gpu_usage(),
                temperature: linux::read_gpu_temperature(),
            },
            memory: self.memory(),
            disk: self.disk(),
            network: self.network(),
        }
    }

    fn cpu_usage(&mut self) -> Option<f64> {
        // sysinfo needs a minimum gap between refreshes to compute a meaningful load.
        let elapsed = self.last_cpu_refresh.elapsed();
        if elapsed < sysinfo::MINIMUM_CPU_UPDATE_INTERVAL {
            std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL - elapsed);
        }
        self.sys.refresh_cpu_usage();
        self.last_cpu_refresh = Instant::now();
        let usage = self.sys.global_cpu_usage() as f64;
        usage.is_finite().then(|| usage.clamp(0.0, 100.0))
    }

    fn cpu_temperature(&mut self) -> Option<f64> {
        self.components.refresh(false);
        self.components
            .list()
            .iter()
            .filter(|c| {
                let label = c.label().to_lowercase();
                CPU_SENSOR_LABELS.iter().any(|l| label.contains(l))
            })
            .find_map(|c| c.temperature())
            .map(f64::from)
            .filter(|t| t.is_finite())
            .or_else(linux::read_thermal_zone_temperature)
    }

    fn memory(&mut self) -> MemoryStats {
        self.sys.refresh_memory();
        MemoryStats {
            total: self.sys.total_memory(),
            used: self.sys.used_memory(),
            free: self.sys.free_memory(),
        }
    }

    fn disk(&mut self) -> DiskStats {
        self.disks.refresh(false);
        let (read, write) = self
            .disks
            .list()
            .iter()
            .map(|d| d.usage())
            .fold((0u64, 0u64), |(r, w), u| {
                (
                    r.saturating_add(u.total_read_bytes),
                    w.saturating_add(u.total_written_bytes),
                )
            });
        DiskStats {
            io: DiskIo { read, write },
        }
    }

    fn network(&mut self) -> NetworkStats {
        self.networks.refresh(true);
        let (received, sent) = self
            .networks
            .list()
            .values()
            .fold((0u64, 0u64), |(rx, tx), data| {
                (
                    rx.saturating_add(data.total_received()),
                    tx.saturating_add(data.total_transmitted()),
                )
            });
        NetworkStats {
            io: NetworkIo { received, sent },
        }
    }
}

/// IPv4 addresses across all interfaces, sorted and deduplicated.
#[instrument(fields(repo = "sysinfo", operation = "local_ipv4_addresses"))]
pub async fn local_ipv4_addresses() -> anyhow::Result<Vec<String>> {
    tokio::task::spawn_blocking(|| {
        let networks = Networks::new_with_refreshed_list();
        let mut ips: Vec<String> = networks
            .list()
            .values()
            .flat_map(|data| data.ip_networks().iter())
            .filter(|n| n.addr.is_ipv4())
            .map(|n| n.addr.to_string())
            .collect();
        ips.sort();
        ips.dedup();
        ips
    })
    .await
    .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))
}
