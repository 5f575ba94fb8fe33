//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::storage::MatchMode;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where and how the archive is stored
    #[serde(default)]
    pub archive: ArchiveConfig,

    /// What to search for
    #[serde(default)]
    pub search: SearchConfig,

    /// HTTP behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Log verbosity
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::config(format!("cannot read {}: {e}", path.display())))?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.archive.root.as_os_str().is_empty() {
            return Err(AppError::validation("archive.root is empty"));
        }
        if self.archive.ledger_file.trim().is_empty() {
            return Err(AppError::validation("archive.ledger_file is empty"));
        }
        if self.search.base_url.trim().is_empty() {
            return Err(AppError::validation("search.base_url is empty"));
        }
        url::Url::parse(&self.search.base_url)
            .map_err(|e| AppError::validation(format!("search.base_url is invalid: {e}")))?;
        if self.search.media_type.trim().is_empty() {
            return Err(AppError::validation("search.media_type is empty"));
        }
        if self.search.terms.is_empty() {
            return Err(AppError::validation("No search terms defined"));
        }
        if self.search.terms.iter().any(|t| t.trim().is_empty()) {
            return Err(AppError::validation("search.terms contains a blank term"));
        }
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == Some(0) {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        Ok(())
    }

    /// Full path of the download ledger.
    pub fn ledger_path(&self) -> PathBuf {
        self.archive.root.join(&self.archive.ledger_file)
    }
}

/// Archive location and ledger behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Root directory of the date-partitioned archive
    #[serde(default = "defaults::root")]
    pub root: PathBuf,

    /// Ledger file name, relative to `root`
    #[serde(default = "defaults::ledger_file")]
    pub ledger_file: String,

    /// How ledger lines are matched against a safe id
    #[serde(default)]
    pub match_mode: MatchMode,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            root: defaults::root(),
            ledger_file: defaults::ledger_file(),
            match_mode: MatchMode::default(),
        }
    }
}

/// Search API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// API base URL, without the `/search` path
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Value of the `media_type` query parameter
    #[serde(default = "defaults::media_type")]
    pub media_type: String,

    /// Terms to sweep, in order
    #[serde(default = "defaults::terms")]
    pub terms: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            media_type: defaults::media_type(),
            terms: defaults::terms(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds; unset means the client default (none)
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Delay between search pages in milliseconds
    #[serde(default)]
    pub request_delay_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: None,
            request_delay_ms: 0,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "defaults::level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::level(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    pub fn root() -> PathBuf {
        PathBuf::from("./NASA")
    }
    pub fn ledger_file() -> String {
        "download_list.txt".into()
    }

    pub fn base_url() -> String {
        "https://images-api.nasa.gov".into()
    }
    pub fn media_type() -> String {
        "image".into()
    }
    pub fn terms() -> Vec<String> {
        vec![
            "curiosity".into(),
            "perseverance".into(),
            "mars2020".into(),
            "mars 2020".into(),
        ]
    }

    pub fn user_agent() -> String {
        concat!("media-archiver/", env!("CARGO_PKG_VERSION")).into()
    }

    pub fn level() -> String {
        "info".into()
    }
}
