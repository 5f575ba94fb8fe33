// src/error.rs

//! Unified error handling for the archiver.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for archiver operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
///
/// Every variant is fatal for the run: recoverable failures (a single asset
/// that cannot be fetched) are expressed as [`FetchError`] and never escape
/// the archiver.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client could not be built
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// A search page could not be retrieved
    #[error("Fetch failed for {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },

    /// The API answered with a shape the pipeline cannot work with
    #[error("Unexpected API response: {0}")]
    ApiShape(String),

    /// An item creation timestamp did not match `YYYY-MM-DDTHH:MM:SSZ`
    #[error("Invalid timestamp '{value}': {source}")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A date partition directory could not be created
    #[error("Cannot create partition {}: {source}", .path.display())]
    Partition {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The download ledger could not be read or appended
    #[error("Ledger error at {}: {source}", .path.display())]
    Ledger {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an API shape error.
    pub fn api_shape(message: impl fmt::Display) -> Self {
        Self::ApiShape(message.to_string())
    }

    /// Wrap a fetch failure with the URL it happened on.
    pub fn fetch(url: impl Into<String>, source: FetchError) -> Self {
        Self::Fetch {
            url: url.into(),
            source,
        }
    }

    /// Wrap a partition creation failure with the directory it was for.
    pub fn partition(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Partition {
            path: path.into(),
            source,
        }
    }

    /// Wrap a ledger I/O failure with the ledger location.
    pub fn ledger(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Ledger {
            path: path.into(),
            source,
        }
    }
}

/// Uniform failure signal for a single network operation.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection, redirect or body transfer failed
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("server returned {0}")]
    Status(reqwest::StatusCode),

    /// Body was not valid JSON
    #[error("invalid JSON payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// Resource could not be produced for another reason
    #[error("{0}")]
    Unavailable(String),
}

impl FetchError {
    /// Create an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_displays_url_and_reason() {
        let err = AppError::fetch("https://x/search", FetchError::unavailable("boom"));
        assert_eq!(err.to_string(), "Fetch failed for https://x/search: boom");
    }

    #[test]
    fn ledger_error_displays_path() {
        let err = AppError::ledger(
            "/tmp/ledger.txt",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("/tmp/ledger.txt"));
    }
}
