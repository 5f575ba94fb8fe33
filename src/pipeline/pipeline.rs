// src/pipeline/pipeline.rs

use std::time::Duration;

use crate::error::Result;
use crate::models::{Config, SearchMode, SearchQuery};
use crate::services::Fetcher;
use crate::storage::{Ledger, LocalArchive};
use crate::utils::Logger;

use super::archive::Archiver;
use super::crawl::{Crawler, SweepStats};

/// Run every configured sweep: each term, base search then keyword search.
///
/// Sweeps run one after another; the first fatal error ends the run.
pub async fn run_archiver(config: &Config, fetcher: &dyn Fetcher, log: &Logger) -> Result<SweepStats> {
    let ledger = Ledger::new(config.ledger_path(), config.archive.match_mode);
    let archive = LocalArchive::new(&config.archive.root);
    let archiver = Archiver::new(fetcher, ledger, archive, log.scoped("archive"));
    let crawler = Crawler::new(fetcher, &archiver, log.scoped("crawl"))
        .with_page_delay(Duration::from_millis(config.crawler.request_delay_ms));

    let mut total = SweepStats::default();
    for term in &config.search.terms {
        log.info(format!("Processing {term}"));
        for mode in SearchMode::ALL {
            log.info(match mode {
                SearchMode::Base => "Starting base search",
                SearchMode::Keyword => "Starting keyword search",
            });
            let url = SearchQuery::new(term.as_str(), mode)
                .url(&config.search.base_url, &config.search.media_type)?;
            let stats = crawler.crawl(&url).await?;
            log.debug(format!(
                "{mode} sweep for '{term}': {} pages, {} items",
                stats.pages,
                stats.items()
            ));
            total += stats;
        }
        log.separator();
    }

    Ok(total)
}
