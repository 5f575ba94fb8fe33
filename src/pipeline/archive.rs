// src/pipeline/archive.rs

//! Per-item archival.

use std::path::Path;

use serde_json::Value;

use crate::error::Result;
use crate::models::{ArchiveRecord, Item, Rendition, RenditionKind, SafeId};
use crate::services::{AssetResolver, Fetcher};
use crate::storage::{Ledger, LocalArchive};
use crate::utils::Logger;
use crate::utils::url::extension;

/// What happened to one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveOutcome {
    /// Already in the ledger; nothing was done
    Skipped,
    /// Asset and metadata written
    Archived { kind: RenditionKind },
    /// Recorded as failed; `kind` is whatever the resolver picked
    Failed { kind: Option<RenditionKind> },
}

/// Archives single search items: dedup, resolve, download, record.
pub struct Archiver<'a> {
    fetcher: &'a dyn Fetcher,
    ledger: Ledger,
    archive: LocalArchive,
    log: Logger,
}

impl<'a> Archiver<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, ledger: Ledger, archive: LocalArchive, log: Logger) -> Self {
        Self {
            fetcher,
            ledger,
            archive,
            log,
        }
    }

    /// Archive one raw search item.
    ///
    /// Only ledger, timestamp, item-shape and partition errors are returned;
    /// network and asset-write problems end up as [`ArchiveOutcome::Failed`].
    pub async fn archive(&self, raw: &Value) -> Result<ArchiveOutcome> {
        let item = Item::from_value(raw)?;
        let safe_id = SafeId::new(&item.identifier);

        if self.ledger.exists(&safe_id).await? {
            self.log.debug(format!("Skipping {safe_id}, already in ledger"));
            return Ok(ArchiveOutcome::Skipped);
        }

        let date = item.created_date()?;
        let href = item.asset_links_href()?;
        self.log.info(format!("Downloading - {safe_id} - {date}"));
        let dir = self.archive.ensure_partition(date).await?;

        let rendition = AssetResolver::new(self.fetcher, self.log.clone())
            .resolve(href)
            .await;

        let mut success = match &rendition {
            Some(rendition) => self.download(rendition, &dir, &safe_id).await,
            None => false,
        };

        if success {
            if let Err(e) = self.archive.write_metadata(&dir, &safe_id, raw).await {
                self.log
                    .error(format!("Failed to write metadata for {safe_id}: {e}"));
                success = false;
            }
        }

        let kind = rendition.map(|r| r.kind);
        self.ledger
            .append(&ArchiveRecord::new(safe_id, date, success, kind))
            .await?;

        Ok(match (success, kind) {
            (true, Some(kind)) => ArchiveOutcome::Archived { kind },
            _ => ArchiveOutcome::Failed { kind },
        })
    }

    /// Fetch the asset and write it next to its metadata. Never fatal.
    ///
    /// Fetch failures are already logged by the fetcher.
    async fn download(&self, rendition: &Rendition, dir: &Path, safe_id: &SafeId) -> bool {
        let Ok(bytes) = self.fetcher.fetch_bytes(&rendition.url).await else {
            self.log.debug(format!("No asset saved for {safe_id}"));
            return false;
        };

        let ext = extension(&rendition.url);
        match self.archive.write_asset(dir, safe_id, &ext, &bytes).await {
            Ok(path) => {
                self.log.debug(format!("Wrote {}", path.display()));
                true
            }
            Err(e) => {
                self.log.error(format!("Failed to save {safe_id}: {e}"));
                false
            }
        }
    }
}
