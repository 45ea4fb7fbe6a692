//! # CLI Configuration
//!
//! Optional YAML file, located by `--config` or `SURAT_CONFIG`:
//!
//! ```yaml
//! store_dir: /var/lib/surat
//! log_filter: surat_proof=debug,info
//! ```
//!
//! `SURAT_STORE_DIR` overrides `store_dir` from the file, and `--store-dir`
//! overrides both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use surat_store::FileRecordStore;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "SURAT_CONFIG";
/// Environment variable overriding the store directory.
pub const STORE_DIR_ENV: &str = "SURAT_STORE_DIR";

const DEFAULT_STORE_DIR: &str = "./surat-store";

fn default_store_dir() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_DIR)
}

/// Resolved CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuratConfig {
    /// Root directory of the filesystem record store.
    #[serde(default = "default_store_dir")]
    pub store_dir: PathBuf,
    /// `EnvFilter` directive used when neither `RUST_LOG` nor `-v` is given.
    #[serde(default)]
    pub log_filter: Option<String>,
}

impl Default for SuratConfig {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            log_filter: None,
        }
    }
}

/// Sources a configuration is resolved from, highest precedence last.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// `--config`.
    pub config_flag: Option<PathBuf>,
    /// `SURAT_CONFIG`.
    pub config_env: Option<PathBuf>,
    /// `SURAT_STORE_DIR`.
    pub store_dir_env: Option<PathBuf>,
    /// `--store-dir`.
    pub store_dir_flag: Option<PathBuf>,
}

impl ConfigSources {
    /// Collect sources from the given flags and the process environment.
    pub fn from_env(config_flag: Option<PathBuf>, store_dir_flag: Option<PathBuf>) -> Self {
        Self {
            config_flag,
            config_env: std::env::var_os(CONFIG_ENV).map(PathBuf::from),
            store_dir_env: std::env::var_os(STORE_DIR_ENV).map(PathBuf::from),
            store_dir_flag,
        }
    }
}

impl SuratConfig {
    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content)
            .with_context(|| format!("invalid config file: {}", path.display()))
    }

    /// Resolve the effective configuration.
    ///
    /// `--config` takes precedence over `SURAT_CONFIG`. A named config file
    /// that cannot be read is an error, not a silent fallback to defaults.
    pub fn resolve(sources: ConfigSources) -> Result<Self> {
        let mut config = match sources.config_flag.or(sources.config_env) {
            Some(path) => Self::load(&path)?,
            None => Self::default(),
        };
        if let Some(dir) = sources.store_dir_flag.or(sources.store_dir_env) {
            config.store_dir = dir;
        }
        tracing::debug!(store_dir = %config.store_dir.display(), "configuration resolved");
        Ok(config)
    }

    /// Open the configured record store.
    pub fn open_store(&self) -> FileRecordStore {
        FileRecordStore::new(&self.store_dir)
    }
}

/// Pick the tracing filter directive.
///
/// `RUST_LOG` wins. Otherwise an explicit `-v` count maps to
/// `info`/`debug`/`trace`, and without one the configured filter applies,
/// falling back to `warn`.
pub fn filter_directive(verbose: u8, configured: Option<&str>, rust_log: Option<&str>) -> String {
    if let Some(env) = rust_log.filter(|s| !s.trim().is_empty()) {
        return env.to_string();
    }
    match (verbose, configured) {
        (0, Some(filter)) => filter.to_string(),
        (0, None) => "warn".to_string(),
        (1, _) => "info".to_string(),
        (2, _) => "debug".to_string(),
        _ => "trace".to_string(),
    }
}
