//! # Filesystem Record Store
//!
//! Stores each proof record as `{base_dir}/proofs/{digest_hex}.json`.
//!
//! ## Integrity Invariant
//!
//! Every record's filename encodes its digest. On read, the record's own
//! `digest` field and the digest recomputed from its canonical payload must
//! both match the filename. A record edited on disk is reported as
//! [`StoreError::Integrity`], never returned as valid.
//!
//! ## Write-Once
//!
//! Files are created with `OpenOptions::create_new(true)`, which fails with
//! `AlreadyExists` if the file exists. Two concurrent writers of the same
//! digest therefore cannot both succeed, with no exists-then-write race.
//! If filling the new file fails, it is removed so a later retry of the
//! same digest is not blocked by a truncated record.

use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use subtle::ConstantTimeEq;
use surat_core::ContentDigest;

use crate::error::{StoreError, StoreResult};
use crate::record::ProofRecord;
use crate::traits::RecordStore;

const RECORD_DIR: &str = "proofs";

/// A [`RecordStore`] backed by the filesystem.
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    base_dir: PathBuf,
}

impl FileRecordStore {
    /// Create a store rooted at the given directory.
    ///
    /// The directory does not need to exist yet; it is created on the
    /// first write.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Return the base directory path.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn record_path(&self, digest: &ContentDigest) -> PathBuf {
        self.base_dir
            .join(RECORD_DIR)
            .join(format!("{}.json", digest.to_hex()))
    }

    /// List the digests of all stored records, sorted.
    ///
    /// Files whose stem is not a valid digest are skipped.
    pub fn list_digests(&self) -> StoreResult<Vec<ContentDigest>> {
        let dir = self.base_dir.join(RECORD_DIR);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut digests = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if let Ok(digest) = ContentDigest::from_hex(stem) {
                    digests.push(digest);
                }
            }
        }
        digests.sort();
        Ok(digests)
    }
}

/// Run `fill` against a freshly created record file, deleting the file if
/// it fails. The original I/O error is returned either way.
fn fill_or_remove(
    mut file: fs::File,
    path: &Path,
    fill: impl FnOnce(&mut fs::File) -> io::Result<()>,
) -> io::Result<()> {
    let result = fill(&mut file);
    drop(file);
    if let Err(err) = result {
        if let Err(cleanup) = fs::remove_file(path) {
            tracing::warn!(
                path = %path.display(),
                error = %cleanup,
                "could not remove partially written proof record"
            );
        }
        return Err(err);
    }
    Ok(())
}

impl RecordStore for FileRecordStore {
    fn write(&self, record: ProofRecord) -> StoreResult<()> {
        let dir = self.base_dir.join(RECORD_DIR);
        fs::create_dir_all(&dir)?;

        let path = self.record_path(&record.digest);
        let bytes = serde_json::to_vec_pretty(&record)?;

        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
        {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(StoreError::Duplicate(record.digest));
            }
            Err(e) => return Err(e.into()),
        };
        fill_or_remove(file, &path, |f| {
            f.write_all(&bytes)?;
            f.sync_all()
        })?;

        tracing::debug!(
            digest = %record.digest,
            path = %path.display(),
            "proof record written"
        );
        Ok(())
    }

    fn find_by_digest(&self, digest: &ContentDigest) -> StoreResult<Option<ProofRecord>> {
        let path = self.record_path(digest);
        let bytes = match fs::read(&path) {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let record: ProofRecord = serde_json::from_slice(&bytes).map_err(|e| {
            StoreError::Integrity(format!(
                "stored record at {} is not a valid proof record: {e}",
                path.display()
            ))
        })?;

        if !bool::from(record.digest.as_bytes()[..].ct_eq(&digest.as_bytes()[..])) {
            return Err(StoreError::Integrity(format!(
                "record at {} declares digest {}",
                path.display(),
                record.digest
            )));
        }

        let recomputed = record.recompute_digest()?;
        if !bool::from(recomputed.as_bytes()[..].ct_eq(&digest.as_bytes()[..])) {
            return Err(StoreError::Integrity(format!(
                "record at {} hashes to {} but is filed under {}",
                path.display(),
                recomputed,
                digest
            )));
        }

        Ok(Some(record))
    }

    fn contains(&self, digest: &ContentDigest) -> StoreResult<bool> {
        Ok(self.record_path(digest).is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use surat_core::{sha256_digest, CanonicalBytes, IssuerId, RequestId};

    fn record_for(payload: serde_json::Value) -> ProofRecord {
        let cb = CanonicalBytes::new(&payload).unwrap();
        ProofRecord::new(
            sha256_digest(&cb),
            RequestId::new(42),
            IssuerId::new(7),
            cb.as_str(),
        )
    }

    #[test]
    fn write_then_find() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileRecordStore::new(tmp.path());
        let record = record_for(serde_json::json!({"requestId": 42}));
        store.write(record.clone()).unwrap();

        assert_eq!(store.find_by_digest(&record.digest).unwrap(), Some(record.clone()));
        assert!(store.contains(&record.digest).unwrap());
        assert!(tmp
            .path()
            .join("proofs")
            .join(format!("{}.json", record.digest.to_hex()))
            .is_file());
    }

    #[test]
    fn find_before_any_write_returns_none() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileRecordStore::new(tmp.path().join("not-yet-created"));
        let digest = ContentDigest::from_bytes([1; 32]);
        assert_eq!(store.find_by_digest(&digest).unwrap(), None);
        assert!(store.list_digests().unwrap().is_empty());
    }

    #[test]
    fn duplicate_write_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileRecordStore::new(tmp.path());
        let record = record_for(serde_json::json!({"requestId": 1}));
        store.write(record.clone()).unwrap();
        assert!(matches!(
            store.write(record),
            Err(StoreError::Duplicate(_))
        ));
    }

    #[test]
    fn tampered_payload_detected_on_read() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileRecordStore::new(tmp.path());
        let record = record_for(serde_json::json!({"name": "Sri"}));
        store.write(record.clone()).unwrap();

        let path = tmp
            .path()
            .join("proofs")
            .join(format!("{}.json", record.digest.to_hex()));
        let mut on_disk: ProofRecord =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        on_disk.canonical_payload = r#"{"name":"Eve"}"#.to_string();
        std::fs::write(&path, serde_json::to_vec(&on_disk).unwrap()).unwrap();

        assert!(matches!(
            store.find_by_digest(&record.digest),
            Err(StoreError::Integrity(_))
        ));
    }

    #[test]
    fn record_filed_under_wrong_digest_detected() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileRecordStore::new(tmp.path());
        let record = record_for(serde_json::json!({"a": 1}));
        store.write(record.clone()).unwrap();

        let other = ContentDigest::from_bytes([0xee; 32]);
        std::fs::copy(
            store.record_path(&record.digest),
            store.record_path(&other),
        )
        .unwrap();

        assert!(matches!(
            store.find_by_digest(&other),
            Err(StoreError::Integrity(_))
        ));
    }

    #[test]
    fn corrupt_file_reported_as_integrity_error() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileRecordStore::new(tmp.path());
        let digest = ContentDigest::from_bytes([2; 32]);
        std::fs::create_dir_all(tmp.path().join("proofs")).unwrap();
        std::fs::write(store.record_path(&digest), b"{\"digest\":").unwrap();

        assert!(matches!(
            store.find_by_digest(&digest),
            Err(StoreError::Integrity(_))
        ));
    }

    #[test]
    fn list_digests_skips_foreign_files() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileRecordStore::new(tmp.path());
        let r1 = record_for(serde_json::json!({"n": 1}));
        let r2 = record_for(serde_json::json!({"n": 2}));
        store.write(r1.clone()).unwrap();
        store.write(r2.clone()).unwrap();
        std::fs::write(tmp.path().join("proofs").join("README.txt"), b"x").unwrap();
        std::fs::write(tmp.path().join("proofs").join("short.json"), b"{}").unwrap();

        let mut expected = vec![r1.digest, r2.digest];
        expected.sort();
        assert_eq!(store.list_digests().unwrap(), expected);
    }

    #[test]
    fn failed_fill_removes_file_and_allows_retry() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileRecordStore::new(tmp.path());
        let record = record_for(serde_json::json!({"requestId": 9}));
        let path = store.record_path(&record.digest);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();

        let file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .unwrap();
        let err = fill_or_remove(file, &path, |f| {
            f.write_all(b"{\"digest\":")?;
            Err(io::Error::new(ErrorKind::Other, "disk full"))
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "disk full");
        assert!(!path.exists());

        store.write(record.clone()).unwrap();
        assert_eq!(store.find_by_digest(&record.digest).unwrap(), Some(record));
    }
}
