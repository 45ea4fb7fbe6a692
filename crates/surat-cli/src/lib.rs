//! # surat-cli: Surat Proof Command-Line Interface
//!
//! ## Subcommands
//!
//! - `issue`: issue a proof for a letter request
//! - `verify`: verify a scanned proof string
//! - `show`: print the stored record for a digest
//!
//! Handlers return the process exit code: 0 for success or a valid proof,
//! 1 for an invalid proof or missing record. Operational failures surface
//! as `Err` and exit with 2.
//!
//! Argument parsing lives in `main.rs`; handlers delegate to `surat-proof`
//! and `surat-store` and hold no proof logic of their own.

pub mod config;
pub mod issue;
pub mod show;
pub mod verify;
