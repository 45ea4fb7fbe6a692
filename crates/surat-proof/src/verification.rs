//! # Proof Verification
//!
//! Verification answers one question for a scanned proof string: was this
//! exact set of facts issued by the village office?
//!
//! ## Fail-Closed Contract
//!
//! [`ProofVerifier::verify`] returns `isValid=true` only when all of these
//! hold:
//!
//! 1. the string parses into a well-formed payload and digest;
//! 2. the payload recomputes to the embedded digest;
//! 3. the record store holds a record for that digest;
//! 4. the stored canonical payload equals the recomputed one.
//!
//! Everything else, including a store that cannot be read, yields the same
//! `{ isValid: false }` with no data. The rejection reason is logged and
//! available through [`ProofVerifier::inspect`], never through the result.

use serde::Serialize;
use subtle::ConstantTimeEq;
use surat_core::{CalendarDate, ContentDigest, EpochMillis, RequestId};
use surat_store::RecordStore;

use crate::error::ProofError;
use crate::payload::ProofPayload;
use crate::wire::ScannedProof;

/// Facts reconstructed from an accepted proof string.
///
/// Taken from the scanned fields, not from the store record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconstructedFacts {
    pub request_id: RequestId,
    pub letter_number: String,
    pub resident_name: String,
    pub resident_national_id: String,
    pub resident_date_of_birth: CalendarDate,
    pub issued_at_epoch_millis: EpochMillis,
}

impl From<&ProofPayload> for ReconstructedFacts {
    fn from(payload: &ProofPayload) -> Self {
        Self {
            request_id: payload.request_id(),
            letter_number: payload.letter_number().to_string(),
            resident_name: payload.resident().name().to_string(),
            resident_national_id: payload.resident().national_id().to_string(),
            resident_date_of_birth: payload.resident().date_of_birth(),
            issued_at_epoch_millis: payload.issued_at(),
        }
    }
}

/// The public verification result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ReconstructedFacts>,
}

impl VerificationResult {
    /// The single negative result shared by every failure path.
    pub fn invalid() -> Self {
        Self {
            is_valid: false,
            data: None,
        }
    }
}

/// Why a proof was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionReason {
    /// Not a proof string of the expected shape.
    Malformed,
    /// Right shape, but a field is empty, padded or not a valid date.
    InvalidFields,
    /// The payload does not hash to the embedded digest.
    DigestMismatch,
    /// Self-consistent, but never issued.
    UnknownDigest,
    /// A record exists but its canonical payload differs.
    RecordMismatch,
    /// The record store could not be consulted.
    StoreUnavailable,
}

impl RejectionReason {
    /// Stable snake_case label used in log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionReason::Malformed => "malformed",
            RejectionReason::InvalidFields => "invalid_fields",
            RejectionReason::DigestMismatch => "digest_mismatch",
            RejectionReason::UnknownDigest => "unknown_digest",
            RejectionReason::RecordMismatch => "record_mismatch",
            RejectionReason::StoreUnavailable => "store_unavailable",
        }
    }
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostic outcome of a verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    Accepted(ReconstructedFacts),
    Rejected(RejectionReason),
}

impl VerificationOutcome {
    /// Whether the proof was accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, VerificationOutcome::Accepted(_))
    }

    /// The rejection reason, if rejected.
    pub fn rejection(&self) -> Option<RejectionReason> {
        match self {
            VerificationOutcome::Accepted(_) => None,
            VerificationOutcome::Rejected(reason) => Some(*reason),
        }
    }
}

impl From<VerificationOutcome> for VerificationResult {
    fn from(outcome: VerificationOutcome) -> Self {
        match outcome {
            VerificationOutcome::Accepted(facts) => VerificationResult {
                is_valid: true,
                data: Some(facts),
            },
            VerificationOutcome::Rejected(_) => VerificationResult::invalid(),
        }
    }
}

/// Verifies scanned proof strings against an injected record store.
#[derive(Debug, Clone)]
pub struct ProofVerifier<S> {
    store: S,
}

impl<S: RecordStore> ProofVerifier<S> {
    /// Create a verifier.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Verify a scanned proof string. Never fails.
    pub fn verify(&self, scanned: &str) -> VerificationResult {
        self.inspect(scanned).into()
    }

    /// Verify and report why a proof was rejected.
    pub fn inspect(&self, scanned: &str) -> VerificationOutcome {
        let proof = match ScannedProof::parse(scanned) {
            Ok(proof) => proof,
            Err(err) => {
                let reason = match err {
                    ProofError::InvalidInput(_) => RejectionReason::InvalidFields,
                    _ => RejectionReason::Malformed,
                };
                tracing::debug!(reason = %reason, error = %err, "proof string rejected");
                return VerificationOutcome::Rejected(reason);
            }
        };
        let (payload, embedded) = proof.into_parts();

        let sealed = match payload.seal() {
            Ok(sealed) => sealed,
            Err(err) => {
                tracing::debug!(
                    reason = %RejectionReason::InvalidFields,
                    error = %err,
                    "scanned payload could not be canonicalized"
                );
                return VerificationOutcome::Rejected(RejectionReason::InvalidFields);
            }
        };

        if !digests_match(&sealed.digest, &embedded) {
            return reject(RejectionReason::DigestMismatch, &embedded);
        }

        let record = match self.store.find_by_digest(&embedded) {
            Ok(Some(record)) => record,
            Ok(None) => return reject(RejectionReason::UnknownDigest, &embedded),
            Err(err) => {
                tracing::warn!(
                    reason = %RejectionReason::StoreUnavailable,
                    digest = %embedded,
                    error = %err,
                    "record store lookup failed; treating proof as invalid"
                );
                return VerificationOutcome::Rejected(RejectionReason::StoreUnavailable);
            }
        };

        if record.canonical_payload.as_bytes() != sealed.canonical.as_bytes() {
            return reject(RejectionReason::RecordMismatch, &embedded);
        }

        tracing::debug!(
            digest = %embedded,
            request_id = %payload.request_id(),
            "proof verified"
        );
        VerificationOutcome::Accepted(ReconstructedFacts::from(&payload))
    }
}

fn digests_match(a: &ContentDigest, b: &ContentDigest) -> bool {
    bool::from(a.as_bytes()[..].ct_eq(&b.as_bytes()[..]))
}

fn reject(reason: RejectionReason, digest: &ContentDigest) -> VerificationOutcome {
    tracing::warn!(reason = %reason, digest = %digest, "proof rejected");
    VerificationOutcome::Rejected(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use surat_core::IssuerId;
    use surat_store::{MemoryRecordStore, ProofRecord};

    use crate::payload::ResidentFacts;
    use crate::wire::compose;

    fn payload(name: &str) -> ProofPayload {
        ProofPayload::build(
            RequestId::new(42),
            "001/DS/2024",
            ResidentFacts::new(
                name,
                "3201010101000001",
                CalendarDate::from_ymd(2000, 5, 1).unwrap(),
            )
            .unwrap(),
            EpochMillis::from_millis(1_714_521_600_000),
        )
        .unwrap()
    }

    fn record_of(p: &ProofPayload) -> ProofRecord {
        let sealed = p.seal().unwrap();
        ProofRecord::new(
            sealed.digest,
            p.request_id(),
            IssuerId::new(7),
            sealed.canonical.as_str(),
        )
    }

    #[test]
    fn accepted_when_recorded() {
        let store = MemoryRecordStore::new();
        let p = payload("Sri");
        store.write(record_of(&p)).unwrap();
        let proof = compose(&p, &p.seal().unwrap().digest).unwrap();

        let verifier = ProofVerifier::new(store);
        let outcome = verifier.inspect(&proof);
        assert!(outcome.is_accepted());

        let result = verifier.verify(&proof);
        assert!(result.is_valid);
        let data = result.data.unwrap();
        assert_eq!(data.resident_name, "Sri");
        assert_eq!(data.request_id, RequestId::new(42));
    }

    #[test]
    fn unknown_digest_rejected() {
        let p = payload("Sri");
        let proof = compose(&p, &p.seal().unwrap().digest).unwrap();
        let verifier = ProofVerifier::new(MemoryRecordStore::new());
        assert_eq!(
            verifier.inspect(&proof).rejection(),
            Some(RejectionReason::UnknownDigest)
        );
        assert_eq!(verifier.verify(&proof), VerificationResult::invalid());
    }

    #[test]
    fn digest_mismatch_rejected() {
        let store = MemoryRecordStore::new();
        let issued = payload("Sri");
        store.write(record_of(&issued)).unwrap();
        let forged = compose(&payload("Eve"), &issued.seal().unwrap().digest).unwrap();

        let verifier = ProofVerifier::new(store);
        assert_eq!(
            verifier.inspect(&forged).rejection(),
            Some(RejectionReason::DigestMismatch)
        );
    }

    #[test]
    fn record_with_other_payload_rejected() {
        let store = MemoryRecordStore::new();
        let p = payload("Sri");
        let mut record = record_of(&p);
        record.canonical_payload = payload("Eve").seal().unwrap().canonical.as_str().to_string();
        store.write(record).unwrap();
        let proof = compose(&p, &p.seal().unwrap().digest).unwrap();

        assert_eq!(
            ProofVerifier::new(store).inspect(&proof).rejection(),
            Some(RejectionReason::RecordMismatch)
        );
    }

    #[test]
    fn malformed_and_invalid_fields_distinguished() {
        let verifier = ProofVerifier::new(MemoryRecordStore::new());
        assert_eq!(
            verifier.inspect("garbage").rejection(),
            Some(RejectionReason::Malformed)
        );
        let p = payload("Sri");
        let padded = compose(&p, &p.seal().unwrap().digest)
            .unwrap()
            .replace(r#""name":"Sri""#, r#""name":" Sri""#);
        assert_eq!(
            verifier.inspect(&padded).rejection(),
            Some(RejectionReason::InvalidFields)
        );
    }

    #[test]
    fn invalid_result_serializes_without_data() {
        let json = serde_json::to_string(&VerificationResult::invalid()).unwrap();
        assert_eq!(json, r#"{"isValid":false}"#);
    }

    #[test]
    fn valid_result_serializes_camel_case() {
        let facts = ReconstructedFacts::from(&payload("Sri"));
        let result = VerificationResult::from(VerificationOutcome::Accepted(facts));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["isValid"], true);
        assert_eq!(json["data"]["residentName"], "Sri");
        assert_eq!(json["data"]["residentDateOfBirth"], "2000-05-01");
        assert_eq!(json["data"]["issuedAtEpochMillis"], 1_714_521_600_000i64);
    }

    #[test]
    fn reason_labels() {
        assert_eq!(RejectionReason::UnknownDigest.to_string(), "unknown_digest");
        assert_eq!(
            RejectionReason::StoreUnavailable.as_str(),
            "store_unavailable"
        );
    }
}
