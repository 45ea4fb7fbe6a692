use std::sync::Arc;

use surat_core::ContentDigest;

use crate::error::StoreResult;
use crate::record::ProofRecord;

/// Keyed store of issued proof records.
///
/// All implementations must satisfy these invariants:
/// - Records are keyed uniquely by digest and written exactly once; a
///   second write for the same digest fails with `StoreError::Duplicate`.
/// - Single-record writes and reads are atomic.
/// - Records are never mutated after the write.
/// - I/O errors are propagated, never silently ignored.
pub trait RecordStore: Send + Sync {
    /// Persist a newly issued proof record.
    fn write(&self, record: ProofRecord) -> StoreResult<()>;

    /// Look up a record by digest.
    ///
    /// Returns `Ok(None)` if no record exists for the digest.
    /// Returns `Err` if the store could not be read or the record is corrupt.
    fn find_by_digest(&self, digest: &ContentDigest) -> StoreResult<Option<ProofRecord>>;

    /// Check whether a record exists for the digest.
    fn contains(&self, digest: &ContentDigest) -> StoreResult<bool> {
        Ok(self.find_by_digest(digest)?.is_some())
    }
}

impl<S: RecordStore + ?Sized> RecordStore for Arc<S> {
    fn write(&self, record: ProofRecord) -> StoreResult<()> {
        (**self).write(record)
    }

    fn find_by_digest(&self, digest: &ContentDigest) -> StoreResult<Option<ProofRecord>> {
        (**self).find_by_digest(digest)
    }

    fn contains(&self, digest: &ContentDigest) -> StoreResult<bool> {
        (**self).contains(digest)
    }
}
