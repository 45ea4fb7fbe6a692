//! # Issue Subcommand
//!
//! Issues a proof for a letter request read from a JSON file:
//!
//! ```bash
//! surat issue --request letter-42.json --issuer 7
//! surat issue --request letter-42.json --issuer 7 --raw
//! ```
//!
//! Prints the data-URI artifact, or the raw proof string with `--raw`.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use surat_core::IssuerId;
use surat_proof::{DataUriEncoder, LetterRequest, ProofIssuer};

use crate::config::SuratConfig;

/// Arguments for `surat issue`.
#[derive(Args, Debug)]
pub struct IssueArgs {
    /// Path to the letter request JSON.
    #[arg(long)]
    pub request: PathBuf,

    /// Id of the authorizing official.
    #[arg(long)]
    pub issuer: u64,

    /// Print the raw proof string instead of the encoded artifact.
    #[arg(long)]
    pub raw: bool,
}

/// Execute `surat issue`.
pub fn run_issue(args: &IssueArgs, config: &SuratConfig, out: &mut impl Write) -> Result<u8> {
    let content = std::fs::read_to_string(&args.request)
        .with_context(|| format!("failed to read letter request: {}", args.request.display()))?;
    let request: LetterRequest = serde_json::from_str(&content)
        .with_context(|| format!("invalid letter request: {}", args.request.display()))?;

    let issuer = ProofIssuer::new(config.open_store(), DataUriEncoder);
    let issued = issuer
        .issue_proof(&request, IssuerId::new(args.issuer))
        .with_context(|| format!("failed to issue proof for request {}", request.id))?;

    if args.raw {
        writeln!(out, "{}", issued.proof_string)?;
    } else {
        writeln!(out, "{}", issued.artifact)?;
    }
    Ok(0)
}
