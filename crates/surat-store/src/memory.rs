//! # In-Memory Record Store
//!
//! Thread-safe, cloneable store backed by a `HashMap` under a
//! `parking_lot::RwLock`. Clones share the same underlying map.
//!
//! The lock is never held across an `.await` point, and `parking_lot`
//! locks are non-poisoning: a panicking writer does not corrupt the store.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use surat_core::ContentDigest;

use crate::error::{StoreError, StoreResult};
use crate::record::ProofRecord;
use crate::traits::RecordStore;

/// In-memory [`RecordStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    records: Arc<RwLock<HashMap<ContentDigest, ProofRecord>>>,
}

impl MemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl RecordStore for MemoryRecordStore {
    fn write(&self, record: ProofRecord) -> StoreResult<()> {
        // Check-and-insert under one write lock.
        match self.records.write().entry(record.digest) {
            Entry::Occupied(_) => Err(StoreError::Duplicate(record.digest)),
            Entry::Vacant(slot) => {
                tracing::debug!(digest = %record.digest, request_id = %record.request_id, "proof record stored");
                slot.insert(record);
                Ok(())
            }
        }
    }

    fn find_by_digest(&self, digest: &ContentDigest) -> StoreResult<Option<ProofRecord>> {
        Ok(self.records.read().get(digest).cloned())
    }

    fn contains(&self, digest: &ContentDigest) -> StoreResult<bool> {
        Ok(self.records.read().contains_key(digest))
    }
}
