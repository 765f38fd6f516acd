// src/storage/raw_store.rs
//! Filesystem-backed store of raw responses.
//!
//! This is the only place where raw response files are created, read or
//! removed. Every I/O failure is reported with the offending path.

use super::paths::{backup_file_name, raw_file_name};
use crate::error::AppError;
use crate::types::PropertyId;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

/// A raw response file found in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub id: PropertyId,
    pub date: NaiveDate,
    pub path: PathBuf,
}

/// Raw responses keyed by `(identifier, collection date)` in one directory.
#[derive(Debug, Clone)]
pub struct RawStore {
    dir: PathBuf,
}

impl RawStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the store directory if needed.
    pub fn ensure_dir(&self) -> Result<(), AppError> {
        if self.dir.exists() && !self.dir.is_dir() {
            return Err(storage_error(
                &self.dir,
                std::io::Error::new(
                    std::io::ErrorKind::AlreadyExists,
                    "path exists but is not a directory",
                ),
            ));
        }
        fs::create_dir_all(&self.dir).map_err(|e| storage_error(&self.dir, e))
    }

    pub fn path_for(&self, id: PropertyId, date: NaiveDate) -> PathBuf {
        self.dir.join(raw_file_name(id, date))
    }

    pub fn backup_path(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(backup_file_name(date))
    }

    /// Writes (or overwrites) the body for one identifier.
    pub fn write(&self, id: PropertyId, date: NaiveDate, body: &str) -> Result<PathBuf, AppError> {
        let path = self.path_for(id, date);
        log::debug!("Writing {} bytes to {}", body.len(), path.display());
        fs::write(&path, body).map_err(|e| storage_error(&path, e))?;
        Ok(path)
    }

    /// Reads a stored body. Invalid UTF-8 is replaced rather than rejected,
    /// so a garbled body surfaces as a parse failure instead of a run abort.
    pub fn read(&self, path: &Path) -> Result<String, AppError> {
        let bytes = fs::read(path).map_err(|e| storage_error(path, e))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    pub fn remove(&self, path: &Path) -> Result<(), AppError> {
        fs::remove_file(path).map_err(|e| storage_error(path, e))?;
        log::debug!("Removed {}", path.display());
        Ok(())
    }

    /// Removes all given raw files, stopping at the first failure.
    pub fn remove_all<'a>(
        &self,
        paths: impl IntoIterator<Item = &'a Path>,
    ) -> Result<usize, AppError> {
        let mut removed = 0;
        for path in paths {
            self.remove(path)?;
            removed += 1;
        }
        log::info!("Removed {} raw response files from {}", removed, self.dir.display());
        Ok(removed)
    }
}

fn storage_error(path: &Path, source: std::io::Error) -> AppError {
    AppError::Storage {
        path: path.to_path_buf(),
        source,
    }
}
