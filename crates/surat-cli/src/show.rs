//! # Show Subcommand
//!
//! Prints the stored proof record for a digest.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use surat_core::ContentDigest;
use surat_store::RecordStore;

use crate::config::SuratConfig;

/// Arguments for `surat show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Digest as 64 hex characters.
    pub digest: String,
}

/// Execute `surat show`. Exit code 1 if no record exists.
pub fn run_show(args: &ShowArgs, config: &SuratConfig, out: &mut impl Write) -> Result<u8> {
    let digest = ContentDigest::from_hex(args.digest.trim())
        .with_context(|| format!("not a digest: {}", args.digest))?;

    let store = config.open_store();
    match store
        .find_by_digest(&digest)
        .with_context(|| format!("failed to read record {digest}"))?
    {
        Some(record) => {
            writeln!(out, "{}", serde_json::to_string_pretty(&record)?)?;
            Ok(0)
        }
        None => {
            writeln!(out, "no record for {digest}")?;
            Ok(1)
        }
    }
}
