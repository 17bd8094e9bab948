use std::collections::VecDeque;

use crate::error::StoreError;
use crate::models::StoredSample;

/// Arrival-ordered sample log, newest at the front, at most `capacity` entries.
///
/// Position is decided by arrival, not by the value of `timestamp`: backdated or
/// duplicate timestamps are kept and placed at the front like any other sample.
/// Storage grows with use, so a large capacity costs nothing up front.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    samples: VecDeque<StoredSample>,
    capacity: usize,
}

impl HistoryBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::new(),
            capacity,
        }
    }

    /// Inserts at the front and drops tail entries beyond capacity.
    /// A sample without a timestamp is rejected and leaves the buffer untouched.
    pub fn ingest(&mut self, sample: StoredSample) -> Result<usize, StoreError> {
        if !sample.has_timestamp() {
            return Err(StoreError::MalformedIngest);
        }
        self.samples.push_front(sample);
        self.samples.truncate(self.capacity);
        Ok(self.samples.len())
    }

    pub fn latest(&self) -> Result<&StoredSample, StoreError> {
        self.samples.front().ok_or(StoreError::EmptyHistory)
    }

    pub fn all(&self) -> impl Iterator<Item = &StoredSample> {
        self.samples.iter()
    }

    pub fn to_vec(&self) -> Vec<StoredSample> {
        self.samples.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
