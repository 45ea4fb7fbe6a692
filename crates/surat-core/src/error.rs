//! # Error Hierarchy
//!
//! Structured error types for the core primitives, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.

use thiserror::Error;

/// Errors during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    /// Identifiers and timestamps must be integers or strings.
    #[error("float values are not permitted in canonical representations: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed during canonicalization.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Errors raised by validating constructors of domain primitives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Letter number is empty or whitespace only.
    #[error("letter number must not be empty")]
    EmptyLetterNumber,

    /// Resident name is empty or whitespace only.
    #[error("resident name must not be empty")]
    EmptyResidentName,

    /// National identifier is empty or whitespace only.
    #[error("national id must not be empty")]
    EmptyNationalId,

    /// Date is not a valid `YYYY-MM-DD` calendar date.
    #[error("invalid calendar date: \"{0}\" (expected YYYY-MM-DD)")]
    InvalidDate(String),

    /// Epoch-millisecond value is outside the representable range.
    #[error("epoch milliseconds out of range: {0}")]
    TimestampOutOfRange(i64),

    /// Digest is not 64 hexadecimal characters.
    #[error("invalid digest: {0}")]
    InvalidDigest(String),
}
