// Bounded in-memory history: newest sample first, oldest evicted past capacity.

mod buffer;

pub use buffer::HistoryBuffer;

use crate::error::StoreError;
use crate::models::StoredSample;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::instrument;

/// Default `MAX_HISTORY_LENGTH`.
pub const DEFAULT_MAX_HISTORY_LENGTH: usize = 60;

/// Shared handle to the service's single history buffer.
///
/// Every operation takes the lock exactly once, so an ingest (prepend + truncate)
/// is atomic with respect to other ingests and reads. Nothing inside the critical
/// section awaits or does I/O.
#[derive(Clone)]
pub struct HistoryStore {
    inner: Arc<Mutex<HistoryBuffer>>,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY_LENGTH)
    }
}

impl HistoryStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HistoryBuffer::new(capacity))),
        }
    }

    // Buffer operations cannot panic half-way, so a poisoned lock still guards a valid buffer.
    fn lock(&self) -> MutexGuard<'_, HistoryBuffer> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Admits a sample at the front; returns the history length afterwards.
    #[instrument(skip(self, sample), fields(repo = "history", operation = "ingest", timestamp = sample.timestamp().unwrap_or_default()))]
    pub fn ingest(&self, sample: StoredSample) -> Result<usize, StoreError> {
        self.lock().ingest(sample)
    }

    pub fn latest(&self) -> Result<StoredSample, StoreError> {
        self.lock().latest().cloned()
    }

    /// Snapshot of the whole history, newest first.
    pub fn all(&self) -> Vec<StoredSample> {
        self.lock().to_vec()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }
}
