//! # Identity Newtypes
//!
//! Domain-primitive newtypes for the identifiers that appear in an attested
//! letter. Each identifier is a distinct type: a [`RequestId`] cannot be
//! passed where an [`IssuerId`] is expected.
//!
//! ## Validation
//!
//! String-based identifiers ([`LetterNumber`], [`ResidentName`],
//! [`NationalId`]) must be non-empty after trimming and are stored trimmed,
//! so that incidental whitespace from form input never reaches the
//! canonical payload. Deserialization routes through the same validating
//! constructor. Integer identifiers are valid by construction.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Implement `Deserialize` for a string newtype by routing through its
/// validating `new()` constructor, so invalid values are rejected at
/// deserialization time instead of silently accepted.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// Shared accessors and `Display` for trimmed string newtypes.
macro_rules! impl_string_newtype {
    ($ty:ident) => {
        impl $ty {
            /// Access the stored (trimmed) value.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

fn trimmed_non_empty(raw: String, err: ValidationError) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(err);
    }
    if trimmed.len() == raw.len() {
        Ok(raw)
    } else {
        Ok(trimmed.to_string())
    }
}

// ---------------------------------------------------------------------------
// Integer identifiers
// ---------------------------------------------------------------------------

/// Identifier of an issued letter request (the database row id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(u64);

impl RequestId {
    /// Wrap a raw request id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw integer value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the authorizing official who issued a proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssuerId(u64);

impl IssuerId {
    /// Wrap a raw issuer id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw integer value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for IssuerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// String identifiers
// ---------------------------------------------------------------------------

/// Human-facing document number, e.g. `001/DS/2024`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LetterNumber(String);

impl_validating_deserialize!(LetterNumber);
impl_string_newtype!(LetterNumber);

impl LetterNumber {
    /// Create a letter number.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyLetterNumber`] if the value is empty
    /// or whitespace only.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        trimmed_non_empty(value.into(), ValidationError::EmptyLetterNumber).map(Self)
    }
}

/// A resident's full name as recorded in the population register.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ResidentName(String);

impl_validating_deserialize!(ResidentName);
impl_string_newtype!(ResidentName);

impl ResidentName {
    /// Create a resident name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyResidentName`] if the value is empty
    /// or whitespace only.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        trimmed_non_empty(value.into(), ValidationError::EmptyResidentName).map(Self)
    }
}

/// National identity number of a resident.
///
/// The format is not enforced beyond non-emptiness: registers carry legacy
/// values of varying length, and the digest binds whatever was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NationalId(String);

impl_validating_deserialize!(NationalId);
impl_string_newtype!(NationalId);

impl NationalId {
    /// Create a national id.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyNationalId`] if the value is empty
    /// or whitespace only.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        trimmed_non_empty(value.into(), ValidationError::EmptyNationalId).map(Self)
    }
}
