//! # Proof Record
//!
//! The persisted half of an issued proof: the digest, the request it
//! attests, the official who authorized it, and the exact canonical payload
//! string that was hashed.

use serde::{Deserialize, Serialize};
use surat_core::{sha256_digest, CanonicalBytes, ContentDigest, IssuerId, RequestId};

use crate::error::{StoreError, StoreResult};

/// A persisted proof record, keyed by its digest.
///
/// Created exactly once at issuance and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProofRecord {
    /// SHA-256 digest of `canonical_payload`; the primary lookup key.
    pub digest: ContentDigest,
    /// The letter request this proof attests.
    pub request_id: RequestId,
    /// The authorizing official.
    pub issuer_id: IssuerId,
    /// The exact canonical string that was hashed.
    pub canonical_payload: String,
}

impl ProofRecord {
    /// Assemble a record from its parts.
    pub fn new(
        digest: ContentDigest,
        request_id: RequestId,
        issuer_id: IssuerId,
        canonical_payload: impl Into<String>,
    ) -> Self {
        Self {
            digest,
            request_id,
            issuer_id,
            canonical_payload: canonical_payload.into(),
        }
    }

    /// Recompute the digest of the stored canonical payload.
    ///
    /// The payload is parsed back to JSON and re-canonicalized before
    /// hashing; for a payload that was canonical when written this yields
    /// the identical byte sequence.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Integrity`] if the stored payload is not JSON
    /// or cannot be re-canonicalized.
    pub fn recompute_digest(&self) -> StoreResult<ContentDigest> {
        let value: serde_json::Value = serde_json::from_str(&self.canonical_payload)
            .map_err(|e| StoreError::Integrity(format!("canonical payload is not JSON: {e}")))?;
        let recanon = CanonicalBytes::new(&value).map_err(|e| {
            StoreError::Integrity(format!("canonical payload failed re-canonicalization: {e}"))
        })?;
        if recanon.as_str() != self.canonical_payload {
            return Err(StoreError::Integrity(
                "stored payload is not in canonical form".into(),
            ));
        }
        Ok(sha256_digest(&recanon))
    }
}
