// Shared test helpers

#![allow(dead_code)]

use pistats::models::*;

/// Sample with plausible values for every metric.
pub fn sample(timestamp: &str) -> SystemSample {
    SystemSample {
        timestamp: timestamp.into(),
        cpu: CpuStats {
            usage: Some(12.5),
            temperature: Some(48.0),
        },
        gpu: GpuStats {
            usage: None,
            temperature: None,
        },
        memory: MemoryStats {
            total: 8 * 1024 * 1024 * 1024,
            used: 3 * 1024 * 1024 * 1024,
            free: 5 * 1024 * 1024 * 1024,
        },
        disk: DiskStats {
            io: DiskIo {
                read: 1_000,
                write: 2_000,
            },
        },
        network: NetworkStats {
            io: NetworkIo {
                received: 10_000,
                sent: 5_000,
            },
        },
    }
}

/// `sample(timestamp)` in the form the API stores it.
pub fn stored(timestamp: &str) -> StoredSample {
    sample(timestamp).into()
}

pub fn timestamps(samples: &[StoredSample]) -> Vec<String> {
    samples
        .iter()
        .map(|s| s.timestamp().unwrap_or_default().to_string())
        .collect()
}
