//! # surat-store: Record Store for Issued Proofs
//!
//! Every proof handed out on a letter is backed by a [`ProofRecord`] written
//! here at issuance time. Verification treats presence in the store, not
//! hash correctness alone, as the authority check: anyone can compute a
//! self-consistent payload and digest, but only issued proofs are recorded.
//!
//! - [`RecordStore`]: the collaborator trait injected into issuance and
//!   verification.
//! - [`MemoryRecordStore`]: thread-safe in-memory store for tests and
//!   embedded use.
//! - [`FileRecordStore`]: one JSON file per record, keyed by digest, with
//!   integrity re-verification on read.

pub mod error;
pub mod file;
pub mod memory;
pub mod record;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use file::FileRecordStore;
pub use memory::MemoryRecordStore;
pub use record::ProofRecord;
pub use traits::RecordStore;
