// Domain models

mod response;
mod sample;
mod stored;

pub use response::{IngestAck, IpList, MessageResponse};
pub use sample::{
    CpuStats, DiskIo, DiskStats, GpuStats, MemoryStats, NetworkIo, NetworkStats, SystemSample,
};
pub use stored::StoredSample;
