use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("save directory missing or not writable: {0}")]
    SaveDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Dedup index plus the save directory it mirrors.
///
/// Invariant: a hash in the index means `<hash>.<ext>` already exists in
/// the directory or was written this run. The index only grows.
pub struct ImageStore {
    dir: PathBuf,
    hashes: HashSet<String>,
}

impl ImageStore {
    /// `seeds` are the tokens found by the startup directory scan.
    pub fn new(dir: PathBuf, seeds: HashSet<String>) -> Self {
        Self { dir, hashes: seeds }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    pub fn contains(&self, hash: &str) -> bool {
        self.hashes.contains(hash)
    }

    /// Atomically write `bytes` as `<hash>.jpg` and record the hash.
    ///
    /// The extension is always `.jpg` regardless of the actual image
    /// format; the startup scan accepts any extension, so the dedup
    /// invariant is unaffected. Write goes through a temp file and a
    /// rename so a crash never leaves a half-written image behind.
    pub fn save(&mut self, hash: &str, bytes: &[u8]) -> Result<PathBuf, PersistError> {
        let target = self.dir.join(format!("{hash}.jpg"));

        let mut tmp =
            NamedTempFile::new_in(&self.dir).map_err(|e| PersistError::SaveDir(e.to_string()))?;
        tmp.write_all(bytes)?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        // Replace any existing file to keep determinism.
        if target.exists() {
            fs::remove_file(&target)?;
        }
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;

        self.hashes.insert(hash.to_string());
        Ok(target)
    }
}
