//! # Proof Issuance
//!
//! Issuance runs once per released letter:
//!
//! 1. Validate the request and build the [`ProofPayload`].
//! 2. Seal it: canonical bytes and SHA-256 digest.
//! 3. Compose the proof string.
//! 4. Persist the [`ProofRecord`].
//! 5. Encode the proof string.
//!
//! Step 4 happens-before step 5. If the write fails nothing is encoded, so
//! an artifact for an unrecorded digest can never leave this module.

use surat_core::{ContentDigest, EpochMillis, IssuerId};
use surat_store::{ProofRecord, RecordStore};

use crate::encoder::{ProofEncoder, ScannableArtifact};
use crate::error::ProofError;
use crate::payload::{LetterRequest, ProofPayload};
use crate::wire;

/// Everything produced by a successful issuance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedProof {
    /// Digest under which the record was stored.
    pub digest: ContentDigest,
    /// The raw proof string handed to the encoder.
    pub proof_string: String,
    /// The encoder's output, returned untouched.
    pub artifact: ScannableArtifact,
}

/// Issues proofs against an injected record store and encoder.
#[derive(Debug, Clone)]
pub struct ProofIssuer<S, E> {
    store: S,
    encoder: E,
}

impl<S: RecordStore, E: ProofEncoder> ProofIssuer<S, E> {
    /// Create an issuer.
    pub fn new(store: S, encoder: E) -> Self {
        Self { store, encoder }
    }

    /// The record store this issuer writes to.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Issue a proof timestamped with the current wall clock.
    ///
    /// # Errors
    ///
    /// - [`ProofError::InvalidInput`] if the request or its resident data is
    ///   missing or incomplete.
    /// - [`ProofError::StoreWrite`] if the record could not be persisted.
    pub fn issue_proof(
        &self,
        request: &LetterRequest,
        issuer_id: IssuerId,
    ) -> Result<IssuedProof, ProofError> {
        self.issue_proof_at(request, issuer_id, EpochMillis::now())
    }

    /// Issue a proof with an explicit issuance timestamp.
    ///
    /// # Errors
    ///
    /// Same as [`issue_proof`](Self::issue_proof).
    pub fn issue_proof_at(
        &self,
        request: &LetterRequest,
        issuer_id: IssuerId,
        issued_at: EpochMillis,
    ) -> Result<IssuedProof, ProofError> {
        let payload = ProofPayload::from_request(request, issued_at)?;
        let sealed = payload.seal()?;
        let proof_string = wire::compose(&payload, &sealed.digest)?;

        let record = ProofRecord::new(
            sealed.digest,
            payload.request_id(),
            issuer_id,
            sealed.canonical.into_string(),
        );
        if let Err(err) = self.store.write(record) {
            tracing::error!(
                request_id = %payload.request_id(),
                issuer_id = %issuer_id,
                digest = %sealed.digest,
                error = %err,
                "failed to persist proof record; no artifact issued"
            );
            return Err(ProofError::StoreWrite(err));
        }

        let artifact = self.encoder.encode(&proof_string);

        tracing::info!(
            request_id = %payload.request_id(),
            issuer_id = %issuer_id,
            digest = %sealed.digest,
            letter_number = %payload.letter_number(),
            "letter proof issued"
        );

        Ok(IssuedProof {
            digest: sealed.digest,
            proof_string,
            artifact,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use surat_core::{CalendarDate, RequestId};
    use surat_store::{MemoryRecordStore, StoreError};

    use crate::encoder::DataUriEncoder;
    use crate::payload::Resident;

    fn request() -> LetterRequest {
        LetterRequest {
            id: RequestId::new(42),
            letter_number: "001/DS/2024".into(),
            resident: Some(Resident {
                name: "Sri".into(),
                national_id: "3201010101000001".into(),
                date_of_birth: Some(CalendarDate::from_ymd(2000, 5, 1).unwrap()),
            }),
        }
    }

    #[test]
    fn issuance_persists_record_keyed_by_digest() {
        let store = MemoryRecordStore::new();
        let issuer = ProofIssuer::new(store.clone(), DataUriEncoder);
        let issued = issuer
            .issue_proof_at(&request(), IssuerId::new(7), EpochMillis::from_millis(1_714_521_600_000))
            .unwrap();

        assert_eq!(
            issued.digest.to_hex(),
            "43100002fc355978ca3206191bc4053bf539d473838e523573788d29fd386eb9"
        );
        let record = store.find_by_digest(&issued.digest).unwrap().unwrap();
        assert_eq!(record.request_id, RequestId::new(42));
        assert_eq!(record.issuer_id, IssuerId::new(7));
        assert_eq!(record.recompute_digest().unwrap(), issued.digest);
        assert_eq!(
            DataUriEncoder::decode(issued.artifact.as_str()).as_deref(),
            Some(issued.proof_string.as_str())
        );
    }

    #[test]
    fn invalid_request_writes_nothing() {
        let store = MemoryRecordStore::new();
        let issuer = ProofIssuer::new(store.clone(), DataUriEncoder);
        let mut req = request();
        req.resident = None;

        let err = issuer.issue_proof(&req, IssuerId::new(7)).unwrap_err();
        assert!(matches!(err, ProofError::InvalidInput(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn duplicate_issuance_is_store_write_error() {
        let store = MemoryRecordStore::new();
        let issuer = ProofIssuer::new(store, DataUriEncoder);
        let ts = EpochMillis::from_millis(1_714_521_600_000);
        issuer.issue_proof_at(&request(), IssuerId::new(7), ts).unwrap();

        let err = issuer
            .issue_proof_at(&request(), IssuerId::new(7), ts)
            .unwrap_err();
        assert!(matches!(err, ProofError::StoreWrite(StoreError::Duplicate(_))));
    }

    #[test]
    fn encoder_not_called_when_write_fails() {
        struct Refusing;
        impl RecordStore for Refusing {
            fn write(&self, _: ProofRecord) -> surat_store::StoreResult<()> {
                Err(StoreError::Unavailable("disk full".into()))
            }
            fn find_by_digest(
                &self,
                _: &ContentDigest,
            ) -> surat_store::StoreResult<Option<ProofRecord>> {
                Ok(None)
            }
        }

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let encoder = move |s: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
            ScannableArtifact::new(s)
        };

        let issuer = ProofIssuer::new(Refusing, encoder);
        let err = issuer.issue_proof(&request(), IssuerId::new(7)).unwrap_err();
        assert!(matches!(err, ProofError::StoreWrite(StoreError::Unavailable(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
