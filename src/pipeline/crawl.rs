// src/pipeline/crawl.rs

//! Search result pagination.

use std::collections::HashSet;
use std::ops::AddAssign;
use std::time::Duration;

use crate::error::{AppError, Result};
use crate::models::Page;
use crate::services::Fetcher;
use crate::utils::Logger;

use super::archive::{ArchiveOutcome, Archiver};

/// Counters for one or more sweeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    pub pages: usize,
    pub archived: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl SweepStats {
    fn record(&mut self, outcome: &ArchiveOutcome) {
        match outcome {
            ArchiveOutcome::Skipped => self.skipped += 1,
            ArchiveOutcome::Archived { .. } => self.archived += 1,
            ArchiveOutcome::Failed { .. } => self.failed += 1,
        }
    }

    /// Items seen across all pages.
    pub fn items(&self) -> usize {
        self.archived + self.failed + self.skipped
    }
}

impl AddAssign for SweepStats {
    fn add_assign(&mut self, other: Self) {
        self.pages += other.pages;
        self.archived += other.archived;
        self.failed += other.failed;
        self.skipped += other.skipped;
    }
}

/// Walks the pages of one search, archiving every item.
pub struct Crawler<'a> {
    fetcher: &'a dyn Fetcher,
    archiver: &'a Archiver<'a>,
    page_delay: Duration,
    log: Logger,
}

impl<'a> Crawler<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, archiver: &'a Archiver<'a>, log: Logger) -> Self {
        Self {
            fetcher,
            archiver,
            page_delay: Duration::ZERO,
            log,
        }
    }

    /// Pause between consecutive page requests.
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    /// Crawl from `start_url`, following `Next` links until none is left.
    ///
    /// A page that cannot be fetched or decoded aborts the sweep. A `Next`
    /// link pointing at a page already visited in this sweep ends it.
    pub async fn crawl(&self, start_url: &str) -> Result<SweepStats> {
        let mut stats = SweepStats::default();
        let mut visited = HashSet::new();
        let mut next = Some(start_url.to_string());

        while let Some(url) = next.take() {
            if !visited.insert(url.clone()) {
                self.log
                    .warn(format!("Continuation loops back to {url}, stopping sweep"));
                break;
            }
            if stats.pages > 0 && !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }

            let payload = self
                .fetcher
                .fetch_json(&url)
                .await
                .map_err(|e| AppError::fetch(&url, e))?;
            let page = Page::from_value(payload)?;
            stats.pages += 1;
            self.log.debug(format!(
                "Page {} ({} items): {url}",
                stats.pages,
                page.items.len()
            ));

            for item in &page.items {
                let outcome = self.archiver.archive(item).await?;
                stats.record(&outcome);
            }

            next = page.next;
        }

        Ok(stats)
    }
}
