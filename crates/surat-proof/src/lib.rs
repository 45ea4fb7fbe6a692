//! # surat-proof: Tamper-Evident Letter Proofs
//!
//! Issues and verifies the scannable authenticity proof printed on letters
//! released by the village office.
//!
//! ## Issuance
//!
//! [`ProofIssuer::issue_proof`] builds the canonical [`ProofPayload`] for a
//! [`LetterRequest`], hashes it with SHA-256, writes a
//! [`ProofRecord`](surat_store::ProofRecord) to the injected
//! [`RecordStore`](surat_store::RecordStore), and only then hands the proof
//! string to the injected [`ProofEncoder`].
//!
//! ## Verification
//!
//! [`ProofVerifier::verify`] parses a scanned proof string, rebuilds the
//! canonical payload through the same [`ProofPayload`] routine, compares
//! digests, and requires the digest to exist in the record store. Every
//! failure collapses into the same negative [`VerificationResult`]; the
//! reason is available only through [`ProofVerifier::inspect`] and the
//! structured log.
//!
//! ## Security Invariants
//!
//! - Issuance and verification share exactly one canonicalization path:
//!   [`ProofPayload::seal`].
//! - A proof is never encoded unless its record was persisted first.
//! - Verification is fail-closed: validity requires positive evidence.

pub mod encoder;
pub mod error;
pub mod issuance;
pub mod payload;
pub mod verification;
pub mod wire;

// Re-export primary types.
pub use encoder::{DataUriEncoder, ProofEncoder, ScannableArtifact};
pub use error::ProofError;
pub use issuance::{IssuedProof, ProofIssuer};
pub use payload::{LetterRequest, ProofPayload, Resident, ResidentFacts, SealedPayload};
pub use verification::{
    ProofVerifier, ReconstructedFacts, RejectionReason, VerificationOutcome, VerificationResult,
};
pub use wire::ScannedProof;
