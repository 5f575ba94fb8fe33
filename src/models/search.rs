//! Search queries.

use std::fmt;

use crate::error::Result;
use crate::utils::url::with_query;

/// How a term is handed to the search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Free-text query (`q`)
    Base,
    /// Structured keyword match (`keywords`)
    Keyword,
}

impl SearchMode {
    /// Modes swept for every term, in order.
    pub const ALL: [SearchMode; 2] = [SearchMode::Base, SearchMode::Keyword];

    pub fn query_param(self) -> &'static str {
        match self {
            SearchMode::Base => "q",
            SearchMode::Keyword => "keywords",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Base => f.write_str("base"),
            SearchMode::Keyword => f.write_str("keyword"),
        }
    }
}

/// One (term, mode) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,
    pub mode: SearchMode,
}

impl SearchQuery {
    pub fn new(term: impl Into<String>, mode: SearchMode) -> Self {
        Self {
            term: term.into(),
            mode,
        }
    }

    /// First-page URL: `{base}/search?{param}={term}&media_type={media_type}`.
    pub fn url(&self, base_url: &str, media_type: &str) -> Result<String> {
        let endpoint = format!("{}/search", base_url.trim_end_matches('/'));
        Ok(with_query(
            &endpoint,
            &[
                (self.mode.query_param(), self.term.as_str()),
                ("media_type", media_type),
            ],
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_query_url() {
        let query = SearchQuery::new("curiosity", SearchMode::Base);
        assert_eq!(
            query.url("https://images-api.nasa.gov", "image").unwrap(),
            "https://images-api.nasa.gov/search?q=curiosity&media_type=image"
        );
    }

    #[test]
    fn test_keyword_query_url_encodes_term() {
        let query = SearchQuery::new("mars 2020", SearchMode::Keyword);
        assert_eq!(
            query.url("https://images-api.nasa.gov/", "image").unwrap(),
            "https://images-api.nasa.gov/search?keywords=mars+2020&media_type=image"
        );
    }

    #[test]
    fn test_modes_sweep_base_first() {
        assert_eq!(SearchMode::ALL, [SearchMode::Base, SearchMode::Keyword]);
        assert_eq!(SearchMode::Keyword.to_string(), "keyword");
    }
}
