//! Append-only download ledger.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::error::{AppError, Result};
use crate::models::{ArchiveRecord, RenditionKind, SafeId};
use crate::storage::MatchMode;

/// Ledger of processed ids, one [`ArchiveRecord`] per line.
///
/// Not safe for concurrent writers; the pipeline appends from one task.
#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
    match_mode: MatchMode,
}

impl Ledger {
    pub fn new(path: impl Into<PathBuf>, match_mode: MatchMode) -> Self {
        Self {
            path: path.into(),
            match_mode,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the ledger for reading, `None` if it does not exist yet.
    async fn open(&self) -> Result<Option<File>> {
        match File::open(&self.path).await {
            Ok(file) => Ok(Some(file)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::ledger(&self.path, e)),
        }
    }

    /// Whether any line mentions `safe_id`. An absent ledger mentions nothing.
    pub async fn exists(&self, safe_id: &SafeId) -> Result<bool> {
        let Some(file) = self.open().await? else {
            return Ok(false);
        };

        let mut lines = BufReader::new(file).lines();
        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| AppError::ledger(&self.path, e))?
        {
            if self.line_matches(&line, safe_id) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn line_matches(&self, line: &str, safe_id: &SafeId) -> bool {
        match self.match_mode {
            MatchMode::Substring => line.contains(safe_id.as_str()),
            MatchMode::Exact => ArchiveRecord::line_safe_id(line) == Some(safe_id.as_str()),
        }
    }

    /// Append one record, creating the ledger on first write.
    pub async fn append(&self, record: &ArchiveRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::ledger(&self.path, e))?;
        }

        let mut line = record.to_line();
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| AppError::ledger(&self.path, e))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| AppError::ledger(&self.path, e))?;
        file.flush()
            .await
            .map_err(|e| AppError::ledger(&self.path, e))?;
        Ok(())
    }

    /// Every well-formed record, in ledger order. Malformed lines are skipped.
    pub async fn records(&self) -> Result<Vec<ArchiveRecord>> {
        let Some(file) = self.open().await? else {
            return Ok(Vec::new());
        };

        let mut records = Vec::new();
        let mut lines = BufReader::new(file).lines();
        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| AppError::ledger(&self.path, e))?
        {
            if let Some(record) = ArchiveRecord::parse_line(&line) {
                records.push(record);
            }
        }
        Ok(records)
    }

    /// Aggregate counts over [`Ledger::records`].
    pub async fn stats(&self) -> Result<LedgerStats> {
        Ok(LedgerStats::from_records(&self.records().await?))
    }
}

/// Counts reported by the `info` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerStats {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub by_kind: BTreeMap<RenditionKind, usize>,
    pub without_link: usize,
}

impl LedgerStats {
    pub fn from_records(records: &[ArchiveRecord]) -> Self {
        let mut stats = Self {
            total: records.len(),
            ..Self::default()
        };
        for record in records {
            if record.success {
                stats.succeeded += 1;
            } else {
                stats.failed += 1;
            }
            match record.rendition {
                Some(kind) => *stats.by_kind.entry(kind).or_default() += 1,
                None => stats.without_link += 1,
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::TempDir;

    use super::*;

    fn record(id: &str, success: bool, kind: Option<RenditionKind>) -> ArchiveRecord {
        ArchiveRecord::new(
            SafeId::new(id),
            NaiveDate::from_ymd_opt(2021, 3, 7).unwrap(),
            success,
            kind,
        )
    }

    #[tokio::test]
    async fn test_missing_ledger_fails_open() {
        let tmp = TempDir::new().unwrap();
        let ledger = Ledger::new(tmp.path().join("download_list.txt"), MatchMode::Substring);

        assert!(!ledger.exists(&SafeId::new("PIA1")).await.unwrap());
        assert!(ledger.records().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_creates_file_and_parents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("NASA").join("download_list.txt");
        let ledger = Ledger::new(&path, MatchMode::Substring);

        ledger
            .append(&record("PIA1", true, Some(RenditionKind::Original)))
            .await
            .unwrap();
        ledger.append(&record("PIA2", false, None)).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "&&PIA1|2021-03-07|True|link_org\n&&PIA2|2021-03-07|False|None\n"
        );
        assert!(ledger.exists(&SafeId::new("PIA2")).await.unwrap());
    }

    #[tokio::test]
    async fn test_substring_mode_matches_prefix_ids() {
        let tmp = TempDir::new().unwrap();
        let ledger = Ledger::new(tmp.path().join("l.txt"), MatchMode::Substring);
        ledger.append(&record("123", true, None)).await.unwrap();

        assert!(ledger.exists(&SafeId::new("12")).await.unwrap());
        assert!(!ledger.exists(&SafeId::new("1234")).await.unwrap());
    }

    #[tokio::test]
    async fn test_exact_mode_compares_field() {
        let tmp = TempDir::new().unwrap();
        let ledger = Ledger::new(tmp.path().join("l.txt"), MatchMode::Exact);
        ledger.append(&record("123", true, None)).await.unwrap();

        assert!(!ledger.exists(&SafeId::new("12")).await.unwrap());
        assert!(ledger.exists(&SafeId::new("123")).await.unwrap());
    }

    #[tokio::test]
    async fn test_exists_sees_lines_written_by_other_tools() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("l.txt");
        std::fs::write(&path, "legacy note mentioning PIA9\n").unwrap();

        let substring = Ledger::new(&path, MatchMode::Substring);
        assert!(substring.exists(&SafeId::new("PIA9")).await.unwrap());

        let exact = Ledger::new(&path, MatchMode::Exact);
        assert!(!exact.exists(&SafeId::new("PIA9")).await.unwrap());
    }

    #[tokio::test]
    async fn test_append_failure_is_ledger_error() {
        let tmp = TempDir::new().unwrap();
        // The ledger path is a directory, so opening it for append fails.
        let ledger = Ledger::new(tmp.path(), MatchMode::Substring);

        let err = ledger.append(&record("a", true, None)).await.unwrap_err();
        assert!(matches!(err, AppError::Ledger { .. }));
    }

    #[tokio::test]
    async fn test_stats_counts_outcomes_and_kinds() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("l.txt");
        let ledger = Ledger::new(&path, MatchMode::Substring);

        ledger
            .append(&record("a", true, Some(RenditionKind::Original)))
            .await
            .unwrap();
        ledger
            .append(&record("b", false, Some(RenditionKind::Original)))
            .await
            .unwrap();
        ledger.append(&record("c", false, None)).await.unwrap();
        let mut file = OpenOptions::new().append(true).open(&path).await.unwrap();
        file.write_all(b"not a record\n").await.unwrap();
        file.flush().await.unwrap();

        let stats = ledger.stats().await.unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.succeeded, 1);
        assert_eq!(stats.failed, 2);
        assert_eq!(stats.by_kind.get(&RenditionKind::Original), Some(&2));
        assert_eq!(stats.without_link, 1);
    }
}
