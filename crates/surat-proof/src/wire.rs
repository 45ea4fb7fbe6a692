//! # Proof String Wire Format
//!
//! The outward proof string is compact JSON:
//!
//! ```json
//! {"requestId":42,"letterNumber":"001/DS/2024",
//!  "resident":{"name":"Sri","nationalId":"3201010101000001","dateOfBirth":"2000-05-01"},
//!  "issuedAtEpochMillis":1714521600000,"digest":"4310...6eb9"}
//! ```
//!
//! Parsing is strict. Unknown fields are rejected, the digest must be 64
//! lowercase hex characters, the date must be `YYYY-MM-DD`, and every string
//! field must already be in the trimmed form the payload builder produces.
//! A scanned value that only normalizes to an issued one is not accepted.

use serde::{Deserialize, Serialize};
use surat_core::{
    CalendarDate, CanonicalizationError, ContentDigest, EpochMillis, RequestId,
};

use crate::error::ProofError;
use crate::payload::{ProofPayload, ResidentFacts};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct WireProof {
    request_id: u64,
    letter_number: String,
    resident: WireResident,
    issued_at_epoch_millis: i64,
    digest: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct WireResident {
    name: String,
    national_id: String,
    date_of_birth: String,
}

/// Render the proof string for a payload and its digest.
pub fn compose(payload: &ProofPayload, digest: &ContentDigest) -> Result<String, ProofError> {
    let wire = WireProof {
        request_id: payload.request_id().get(),
        letter_number: payload.letter_number().to_string(),
        resident: WireResident {
            name: payload.resident().name().to_string(),
            national_id: payload.resident().national_id().to_string(),
            date_of_birth: payload.resident().date_of_birth().to_iso_date(),
        },
        issued_at_epoch_millis: payload.issued_at().as_millis(),
        digest: digest.to_hex(),
    };
    serde_json::to_string(&wire)
        .map_err(CanonicalizationError::from)
        .map_err(ProofError::from)
}

/// A decoded proof string: the claimed payload and its embedded digest.
///
/// Nothing about a `ScannedProof` is trusted until the verifier has
/// recomputed the digest and found it in the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedProof {
    payload: ProofPayload,
    digest: ContentDigest,
}

impl ScannedProof {
    /// Decode a scanned proof string.
    ///
    /// # Errors
    ///
    /// - [`ProofError::MalformedProof`] if the text is not a proof string of
    ///   the expected shape, or the digest is not lowercase 64-hex.
    /// - [`ProofError::InvalidInput`] if the shape is right but a field value
    ///   is empty, padded, or an invalid date.
    pub fn parse(scanned: &str) -> Result<Self, ProofError> {
        let wire: WireProof = serde_json::from_str(scanned.trim())
            .map_err(|e| ProofError::MalformedProof(e.to_string()))?;

        let digest = ContentDigest::from_hex(&wire.digest)
            .map_err(|e| ProofError::MalformedProof(e.to_string()))?;
        if digest.to_hex() != wire.digest {
            return Err(ProofError::MalformedProof(
                "digest must be lowercase hex".into(),
            ));
        }

        let date_of_birth = CalendarDate::parse(&wire.resident.date_of_birth)?;
        let resident = ResidentFacts::new(
            wire.resident.name.as_str(),
            wire.resident.national_id.as_str(),
            date_of_birth,
        )?;
        let payload = ProofPayload::build(
            RequestId::new(wire.request_id),
            wire.letter_number.as_str(),
            resident,
            EpochMillis::from_millis(wire.issued_at_epoch_millis),
        )?;

        require_verbatim("letterNumber", &wire.letter_number, payload.letter_number().as_str())?;
        require_verbatim("resident.name", &wire.resident.name, payload.resident().name().as_str())?;
        require_verbatim(
            "resident.nationalId",
            &wire.resident.national_id,
            payload.resident().national_id().as_str(),
        )?;

        Ok(Self { payload, digest })
    }

    /// The claimed payload.
    pub fn payload(&self) -> &ProofPayload {
        &self.payload
    }

    /// The embedded digest.
    pub fn digest(&self) -> &ContentDigest {
        &self.digest
    }

    /// Split into payload and digest.
    pub fn into_parts(self) -> (ProofPayload, ContentDigest) {
        (self.payload, self.digest)
    }
}

fn require_verbatim(field: &str, raw: &str, normalized: &str) -> Result<(), ProofError> {
    if raw == normalized {
        Ok(())
    } else {
        Err(ProofError::InvalidInput(format!(
            "{field} carries surrounding whitespace"
        )))
    }
}
