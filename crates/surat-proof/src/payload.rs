//! # Proof Payload: the Attested Facts
//!
//! [`ProofPayload`] is the immutable set of facts a letter proof attests:
//! request id, letter number, the resident's name, national id and date of
//! birth, and the issuance instant.
//!
//! ## Security Invariant
//!
//! [`ProofPayload::seal`] is the single canonicalization and hashing routine
//! used by both issuance and verification. Canonicalization goes through
//! [`CanonicalBytes`], so the serialized form depends only on field values:
//! keys are sorted, the date of birth is `YYYY-MM-DD`, the timestamp is an
//! integer, and no locale input exists anywhere in the path.

use serde::{Deserialize, Serialize};
use surat_core::{
    sha256_digest, CalendarDate, CanonicalBytes, ContentDigest, EpochMillis, LetterNumber,
    NationalId, RequestId, ResidentName,
};

use crate::error::ProofError;

/// A letter request as handed over by the portal.
///
/// Field values are unvalidated here; validation happens when the payload
/// is built, so that every rejection surfaces as
/// [`ProofError::InvalidInput`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterRequest {
    /// Row id of the request.
    pub id: RequestId,
    /// Human-facing document number.
    pub letter_number: String,
    /// The resident the letter was issued for; absent if the request lost
    /// its resident linkage.
    #[serde(default)]
    pub resident: Option<Resident>,
}

/// Resident data as recorded on a letter request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resident {
    /// Full name.
    pub name: String,
    /// National identity number.
    pub national_id: String,
    /// Date of birth, if recorded.
    #[serde(default)]
    pub date_of_birth: Option<CalendarDate>,
}

/// Validated resident block of a [`ProofPayload`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidentFacts {
    name: ResidentName,
    national_id: NationalId,
    date_of_birth: CalendarDate,
}

impl ResidentFacts {
    /// Validate resident fields.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::InvalidInput`] if the name or national id is
    /// empty.
    pub fn new(
        name: impl Into<String>,
        national_id: impl Into<String>,
        date_of_birth: CalendarDate,
    ) -> Result<Self, ProofError> {
        Ok(Self {
            name: ResidentName::new(name)?,
            national_id: NationalId::new(national_id)?,
            date_of_birth,
        })
    }

    /// Validate a [`Resident`] from a letter request.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::InvalidInput`] if any field is empty or the
    /// date of birth is missing.
    pub fn from_resident(resident: &Resident) -> Result<Self, ProofError> {
        let date_of_birth = resident.date_of_birth.ok_or_else(|| {
            ProofError::InvalidInput("resident has no date of birth".into())
        })?;
        Self::new(
            resident.name.as_str(),
            resident.national_id.as_str(),
            date_of_birth,
        )
    }

    /// Resident name.
    pub fn name(&self) -> &ResidentName {
        &self.name
    }

    /// National identity number.
    pub fn national_id(&self) -> &NationalId {
        &self.national_id
    }

    /// Date of birth, day precision.
    pub fn date_of_birth(&self) -> CalendarDate {
        self.date_of_birth
    }
}

/// The canonical set of attested facts. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofPayload {
    request_id: RequestId,
    letter_number: LetterNumber,
    resident: ResidentFacts,
    #[serde(rename = "issuedAtEpochMillis")]
    issued_at: EpochMillis,
}

/// Canonical bytes of a payload together with their digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedPayload {
    /// The exact bytes that were hashed.
    pub canonical: CanonicalBytes,
    /// SHA-256 of `canonical`.
    pub digest: ContentDigest,
}

impl ProofPayload {
    /// Build a payload from its parts.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::InvalidInput`] if the letter number is empty.
    pub fn build(
        request_id: RequestId,
        letter_number: impl Into<String>,
        resident: ResidentFacts,
        issued_at: EpochMillis,
    ) -> Result<Self, ProofError> {
        Ok(Self {
            request_id,
            letter_number: LetterNumber::new(letter_number)?,
            resident,
            issued_at,
        })
    }

    /// Build the payload for a letter request.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::InvalidInput`] if the request has no resident
    /// linkage, or if any attested field is empty or missing.
    pub fn from_request(request: &LetterRequest, issued_at: EpochMillis) -> Result<Self, ProofError> {
        let resident = request.resident.as_ref().ok_or_else(|| {
            ProofError::InvalidInput(format!(
                "letter request {} has no resident; cannot attest",
                request.id
            ))
        })?;
        let facts = ResidentFacts::from_resident(resident)?;
        Self::build(request.id, request.letter_number.as_str(), facts, issued_at)
    }

    /// Canonicalize and hash the payload.
    ///
    /// This is the only routine that turns a payload into digestable bytes;
    /// issuance and verification both call it.
    pub fn seal(&self) -> Result<SealedPayload, ProofError> {
        let canonical = CanonicalBytes::new(self)?;
        let digest = sha256_digest(&canonical);
        Ok(SealedPayload { canonical, digest })
    }

    /// Request id.
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Letter number.
    pub fn letter_number(&self) -> &LetterNumber {
        &self.letter_number
    }

    /// Resident block.
    pub fn resident(&self) -> &ResidentFacts {
        &self.resident
    }

    /// Issuance instant.
    pub fn issued_at(&self) -> EpochMillis {
        self.issued_at
    }
}
