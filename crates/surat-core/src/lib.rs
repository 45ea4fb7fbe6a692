//! # surat-core: Foundational Types for Surat Proof
//!
//! This crate defines the primitives every other crate in the workspace
//! builds on: the canonical byte representation used for hashing, the
//! SHA-256 content digest, the temporal types that appear in attested
//! letter payloads, and the validated identifier newtypes.
//!
//! ## Key Design Principles
//!
//! 1. **`CanonicalBytes` newtype.** ALL digest computation flows through
//!    `CanonicalBytes::new()`. No raw `serde_json::to_vec()` for digests.
//!    Issuance and verification therefore cannot disagree on byte layout.
//!
//! 2. **`sha256_digest()` accepts only `&CanonicalBytes`.** Compile-time
//!    enforcement that every digest path went through canonicalization.
//!
//! 3. **Day-precision dates.** `CalendarDate` carries no time-of-day or
//!    offset, so a resident's date of birth canonicalizes to `YYYY-MM-DD`
//!    regardless of how the source record stored it.
//!
//! 4. **Newtype wrappers for identifiers.** `RequestId`, `IssuerId`,
//!    `LetterNumber`, `NationalId`, `ResidentName`. No bare strings or
//!    integers crossing crate boundaries.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `surat-*` crates (leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, ContentDigest};
pub use error::{CanonicalizationError, ValidationError};
pub use identity::{IssuerId, LetterNumber, NationalId, RequestId, ResidentName};
pub use temporal::{CalendarDate, EpochMillis};
