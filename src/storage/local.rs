//! Local filesystem archive.
//!
//! Owns the date-partitioned layout under the archive root and the two
//! per-item writes: the binary asset and its raw metadata.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::SafeId;

/// Suffix of in-flight asset downloads.
const PARTIAL_SUFFIX: &str = "part";

/// Local filesystem archive rooted at a directory.
#[derive(Debug, Clone)]
pub struct LocalArchive {
    root_dir: PathBuf,
}

impl LocalArchive {
    /// Create a new archive rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Partition directory for a date: `root/year/month/day`, unpadded.
    pub fn partition_dir(&self, date: NaiveDate) -> PathBuf {
        self.root_dir
            .join(date.year().to_string())
            .join(date.month().to_string())
            .join(date.day().to_string())
    }

    /// Create the partition directory if needed and return it.
    pub async fn ensure_partition(&self, date: NaiveDate) -> Result<PathBuf> {
        let dir = self.partition_dir(date);
        match tokio::fs::create_dir_all(&dir).await {
            Ok(()) => Ok(dir),
            Err(e) if e.kind() == ErrorKind::AlreadyExists && dir.is_dir() => Ok(dir),
            Err(e) => Err(AppError::partition(dir, e)),
        }
    }

    /// Path of the asset file: `{dir}/{safe_id}{ext}`.
    pub fn asset_path(dir: &Path, safe_id: &SafeId, ext: &str) -> PathBuf {
        dir.join(format!("{safe_id}{ext}"))
    }

    /// Path of the metadata file: `{dir}/{safe_id}.json`.
    pub fn metadata_path(dir: &Path, safe_id: &SafeId) -> PathBuf {
        dir.join(format!("{safe_id}.json"))
    }

    /// Write bytes atomically (write to temp, then rename).
    ///
    /// The temp file is removed again when any step fails.
    async fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".");
        tmp.push(PARTIAL_SUFFIX);
        let tmp = PathBuf::from(tmp);

        if let Err(e) = Self::write_then_rename(&tmp, path, bytes).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn write_then_rename(tmp: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        let mut file = tokio::fs::File::create(tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(tmp, path).await
    }

    /// Write a downloaded asset and return its path.
    pub async fn write_asset(
        &self,
        dir: &Path,
        safe_id: &SafeId,
        ext: &str,
        bytes: &[u8],
    ) -> Result<PathBuf> {
        let path = Self::asset_path(dir, safe_id, ext);
        Self::write_bytes(&path, bytes).await?;
        Ok(path)
    }

    /// Write item metadata as compact JSON and return its path.
    pub async fn write_metadata<T: Serialize + ?Sized>(
        &self,
        dir: &Path,
        safe_id: &SafeId,
        value: &T,
    ) -> Result<PathBuf> {
        let path = Self::metadata_path(dir, safe_id);
        let bytes = serde_json::to_vec(value)?;
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }
}
