//! # Proof Error Types

use surat_core::{CanonicalizationError, ValidationError};
use surat_store::StoreError;
use thiserror::Error;

/// Errors from proof issuance and proof-string parsing.
///
/// Verification never surfaces these to its caller; they are folded into a
/// negative [`VerificationResult`](crate::VerificationResult).
#[derive(Error, Debug)]
pub enum ProofError {
    /// The attestation request is malformed or incomplete.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Persisting the proof record failed; no artifact was produced.
    #[error("store write failed: {0}")]
    StoreWrite(#[source] StoreError),

    /// Canonicalization of the payload failed.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// A proof string could not be decoded.
    #[error("malformed proof string: {0}")]
    MalformedProof(String),
}

impl From<ValidationError> for ProofError {
    fn from(err: ValidationError) -> Self {
        ProofError::InvalidInput(err.to_string())
    }
}
