//! # Store Error Types

use surat_core::ContentDigest;
use thiserror::Error;

/// Result alias for record store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from record store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A record with this digest already exists. Records are written once.
    #[error("proof record already exists for digest {0}")]
    Duplicate(ContentDigest),

    /// A stored record failed its integrity check on read.
    #[error("integrity violation: {0}")]
    Integrity(String),

    /// The backing store could not be reached.
    #[error("record store unavailable: {0}")]
    Unavailable(String),

    /// Record (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_display_includes_digest() {
        let digest = ContentDigest::from_bytes([0x11; 32]);
        let msg = StoreError::Duplicate(digest).to_string();
        assert!(msg.contains(&"11".repeat(32)));
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only volume");
        let err = StoreError::from(io_err);
        assert!(matches!(err, StoreError::Io(_)));
        assert!(err.to_string().contains("read-only volume"));
    }
}
