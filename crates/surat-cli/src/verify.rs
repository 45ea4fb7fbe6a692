//! # Verify Subcommand
//!
//! Verifies a scanned proof string given as an argument, or read from
//! stdin when the argument is `-`. Either a raw proof string or the
//! `data:` URI printed by `surat issue` is accepted.
//!
//! Exit code 0 means valid, 1 invalid. The rejection reason is only
//! visible in the log (`-v`).

use std::io::{Read, Write};

use anyhow::{Context, Result};
use clap::Args;
use surat_proof::{DataUriEncoder, ProofVerifier};

use crate::config::SuratConfig;

const DATA_URI_SCHEME: &str = "data:";

/// Arguments for `surat verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Proof string or data URI; `-` reads stdin.
    pub proof: String,
}

/// Execute `surat verify`.
pub fn run_verify(
    args: &VerifyArgs,
    config: &SuratConfig,
    stdin: &mut impl Read,
    out: &mut impl Write,
) -> Result<u8> {
    let scanned = if args.proof == "-" {
        let mut buf = String::new();
        stdin
            .read_to_string(&mut buf)
            .context("failed to read proof from stdin")?;
        buf
    } else {
        args.proof.clone()
    };

    let proof_string = unwrap_data_uri(&scanned);
    let verifier = ProofVerifier::new(config.open_store());
    let result = verifier.verify(&proof_string);

    match result.data {
        Some(facts) if result.is_valid => {
            writeln!(out, "valid")?;
            writeln!(out, "{}", serde_json::to_string_pretty(&facts)?)?;
            Ok(0)
        }
        _ => {
            writeln!(out, "invalid")?;
            Ok(1)
        }
    }
}

/// Strip a `data:` URI wrapper. Anything that is not a decodable JSON data
/// URI is passed through and left for the verifier to reject.
fn unwrap_data_uri(scanned: &str) -> String {
    if scanned.trim_start().starts_with(DATA_URI_SCHEME) {
        if let Some(decoded) = DataUriEncoder::decode(scanned) {
            return decoded;
        }
    }
    scanned.to_string()
}
