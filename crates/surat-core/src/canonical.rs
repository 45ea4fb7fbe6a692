//! # Canonical Serialization: JCS-Compatible Byte Production
//!
//! This module defines `CanonicalBytes`, the sole construction path for bytes
//! used in digest computation.
//!
//! ## Security Invariant
//!
//! The inner string is private. The only way to construct `CanonicalBytes`
//! is through [`CanonicalBytes::new()`], which converts the value to a JSON
//! tree, rejects floats, and serializes in RFC 8785 (JCS) form. Any function
//! requiring canonical bytes must accept `&CanonicalBytes`, so a letter proof
//! can never be hashed over an ad-hoc serialization.
//!
//! ## Rules
//!
//! 1. **Reject floats**: identifiers and timestamps are integers; float
//!    number rendering has edge cases that differ between serializers.
//! 2. **Sorted keys**: object keys are ordered lexicographically, giving a
//!    fixed field order independent of struct declaration or input order.
//! 3. **Compact separators**: no whitespace between tokens.
//! 4. **UTF-8**: non-ASCII characters (resident names) pass through unescaped.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by JCS canonicalization with float rejection.
///
/// # Invariants
///
/// - The only constructor is `CanonicalBytes::new()`.
/// - All numbers are integers.
/// - Serialization uses sorted keys with compact separators (RFC 8785).
/// - The inner value is the `String` returned by `serde_jcs`, so the text
///   and byte views are the same data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(String);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::FloatRejected` if the value contains
    /// float numbers. Returns `CanonicalizationError::SerializationFailed` if
    /// conversion to JSON or JCS serialization fails.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        let coerced = coerce_json_value(value)?;
        let text = serialize_canonical(&coerced)?;
        Ok(Self(text))
    }

    /// Access the canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// View the canonical bytes as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the canonical string.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

/// Recursively reject floats anywhere in the JSON tree.
fn coerce_json_value(value: Value) -> Result<Value, CanonicalizationError> {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => Ok(value),
        Value::Number(ref n) => {
            if n.is_f64() && !n.is_i64() && !n.is_u64() {
                if let Some(f) = n.as_f64() {
                    return Err(CanonicalizationError::FloatRejected(f));
                }
            }
            Ok(value)
        }
        Value::Object(map) => {
            let mut coerced = serde_json::Map::new();
            for (k, v) in map {
                coerced.insert(k, coerce_json_value(v)?);
            }
            Ok(Value::Object(coerced))
        }
        Value::Array(arr) => {
            let coerced: Result<Vec<_>, _> = arr.into_iter().map(coerce_json_value).collect();
            Ok(Value::Array(coerced?))
        }
    }
}

/// Serialize a JSON value in JCS-canonical form (RFC 8785).
fn serialize_canonical(value: &Value) -> Result<String, CanonicalizationError> {
    Ok(serde_jcs::to_string(value)?)
}
