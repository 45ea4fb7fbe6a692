//! # surat CLI entry point
//!
//! Parses command-line arguments, resolves configuration, installs the
//! tracing subscriber, and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use surat_cli::config::{filter_directive, ConfigSources, SuratConfig};
use surat_cli::issue::{run_issue, IssueArgs};
use surat_cli::show::{run_show, ShowArgs};
use surat_cli::verify::{run_verify, VerifyArgs};

const EXIT_OPERATIONAL_ERROR: u8 = 2;

/// Surat Proof: tamper-evident proofs for village office letters.
#[derive(Parser, Debug)]
#[command(name = "surat", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file (overrides SURAT_CONFIG).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Record store directory (overrides SURAT_STORE_DIR and the config file).
    #[arg(long, global = true)]
    store_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Issue a proof for a letter request.
    Issue(IssueArgs),

    /// Verify a scanned proof string.
    Verify(VerifyArgs),

    /// Print the stored proof record for a digest.
    Show(ShowArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = SuratConfig::resolve(ConfigSources::from_env(
        cli.config.clone(),
        cli.store_dir.clone(),
    ));

    let rust_log = std::env::var("RUST_LOG").ok();
    let configured = config.as_ref().ok().and_then(|c| c.log_filter.as_deref());
    let directive = filter_directive(cli.verbose, configured, rust_log.as_deref());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(EXIT_OPERATIONAL_ERROR);
        }
    };

    let mut stdout = std::io::stdout().lock();
    let result = match &cli.command {
        Commands::Issue(args) => run_issue(args, &config, &mut stdout),
        Commands::Verify(args) => {
            run_verify(args, &config, &mut std::io::stdin().lock(), &mut stdout)
        }
        Commands::Show(args) => run_show(args, &config, &mut stdout),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_OPERATIONAL_ERROR)
        }
    }
}
