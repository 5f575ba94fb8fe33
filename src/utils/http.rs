// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use crate::error::Result;
use crate::models::CrawlerConfig;

/// Create a configured asynchronous HTTP client.
///
/// Redirects follow reqwest's default policy. No timeout is applied unless
/// `timeout_secs` is configured.
pub fn create_client(config: &CrawlerConfig) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(&config.user_agent);
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client_with_and_without_timeout() {
        let mut config = CrawlerConfig::default();
        assert!(create_client(&config).is_ok());

        config.timeout_secs = Some(5);
        assert!(create_client(&config).is_ok());
    }
}
