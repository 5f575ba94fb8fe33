// src/services/fetcher.rs

//! Network access for the pipeline.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::error::FetchError;
use crate::utils::Logger;

/// Outcome of a single network operation.
pub type Fetched<T> = std::result::Result<T, FetchError>;

/// The two network operations the archiver needs.
///
/// Implementations never panic on bad input; every failure comes back as a
/// [`FetchError`] for the caller to branch on.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET `url` and decode the body as JSON.
    async fn fetch_json(&self, url: &str) -> Fetched<Value>;

    /// GET `url`, following redirects, and return the raw body.
    async fn fetch_bytes(&self, url: &str) -> Fetched<Vec<u8>>;
}

/// [`Fetcher`] backed by a reqwest client.
pub struct HttpFetcher {
    client: Client,
    log: Logger,
}

impl HttpFetcher {
    pub fn new(client: Client, log: Logger) -> Self {
        Self { client, log }
    }

    async fn get(&self, url: &str) -> Fetched<reqwest::Response> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        Ok(response)
    }

    async fn try_json(&self, url: &str) -> Fetched<Value> {
        let body = self.get(url).await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn try_bytes(&self, url: &str) -> Fetched<Vec<u8>> {
        let body = self.get(url).await?.bytes().await?;
        Ok(body.to_vec())
    }

    fn report<T>(&self, url: &str, outcome: Fetched<T>) -> Fetched<T> {
        if let Err(e) = &outcome {
            self.log.error(format!("{url}: {e}"));
        }
        outcome
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_json(&self, url: &str) -> Fetched<Value> {
        self.log.debug(format!("GET {url}"));
        let outcome = self.try_json(url).await;
        self.report(url, outcome)
    }

    async fn fetch_bytes(&self, url: &str) -> Fetched<Vec<u8>> {
        self.log.debug(format!("GET {url} (binary)"));
        let outcome = self.try_bytes(url).await;
        self.report(url, outcome)
    }
}
