//! Best-rendition selection for an item.

use serde_json::Value;

use crate::models::{Rendition, RenditionSet};
use crate::services::Fetcher;
use crate::utils::Logger;

/// Resolves an item's asset-link endpoint to its best rendition.
pub struct AssetResolver<'a> {
    fetcher: &'a dyn Fetcher,
    log: Logger,
}

impl<'a> AssetResolver<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, log: Logger) -> Self {
        Self { fetcher, log }
    }

    /// Fetch the candidate list at `href` and pick the best rendition.
    ///
    /// `None` when the fetch fails, the payload is not a non-empty array, or
    /// no candidate carries a rendition token. Fetch failures are logged by
    /// the fetcher itself.
    pub async fn resolve(&self, href: &str) -> Option<Rendition> {
        let payload = self.fetcher.fetch_json(href).await.ok()?;

        let set = Self::candidates(&payload)?;
        let best = set.best();
        if best.is_none() {
            self.log.warn(format!("No known rendition listed at {href}"));
        }
        best
    }

    /// Bucket the string entries of a JSON array.
    fn candidates(payload: &Value) -> Option<RenditionSet> {
        let links = payload.as_array().filter(|links| !links.is_empty())?;
        Some(links.iter().filter_map(Value::as_str).collect())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::RenditionKind;
    use crate::services::fetcher::mock::MockFetcher;

    const HREF: &str = "https://api/asset/PIA1";

    async fn resolve_with(payload: Value) -> Option<Rendition> {
        let fetcher = MockFetcher::new().with_json(HREF, payload);
        AssetResolver::new(&fetcher, Logger::default())
            .resolve(HREF)
            .await
    }

    #[tokio::test]
    async fn test_prefers_large_over_thumb() {
        let best = resolve_with(json!([
            "https://img/PIA1~thumb.jpg",
            "https://img/PIA1~large.jpg",
            "https://img/metadata.json"
        ]))
        .await
        .unwrap();
        assert_eq!(best.kind, RenditionKind::Large);
        assert_eq!(best.kind.label(), "link_large");
        assert_eq!(best.url, "https://img/PIA1~large.jpg");
    }

    #[tokio::test]
    async fn test_original_wins_when_present() {
        let best = resolve_with(json!([
            "https://img/PIA1~medium.jpg",
            "https://img/PIA1~orig.tif",
            "https://img/PIA1~small.jpg"
        ]))
        .await
        .unwrap();
        assert_eq!(best.kind, RenditionKind::Original);
        assert_eq!(best.url, "https://img/PIA1~orig.tif");
    }

    #[tokio::test]
    async fn test_thumb_only() {
        let best = resolve_with(json!(["https://img/PIA1~thumb.jpg"]))
            .await
            .unwrap();
        assert_eq!(best.kind.label(), "link_thumb");
    }

    #[tokio::test]
    async fn test_no_match_is_absent() {
        assert!(resolve_with(json!(["https://img/metadata.json"])).await.is_none());
    }

    #[tokio::test]
    async fn test_empty_or_non_array_is_absent() {
        assert!(resolve_with(json!([])).await.is_none());
        assert!(resolve_with(json!({ "reason": "not found" })).await.is_none());
        assert!(resolve_with(Value::Null).await.is_none());
    }

    #[tokio::test]
    async fn test_non_string_entries_are_ignored() {
        let best = resolve_with(json!([42, null, "https://img/PIA1~small.png"]))
            .await
            .unwrap();
        assert_eq!(best.kind, RenditionKind::Small);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_absent() {
        let fetcher = MockFetcher::new();
        let resolver = AssetResolver::new(&fetcher, Logger::default());
        assert!(resolver.resolve(HREF).await.is_none());
        assert_eq!(fetcher.call_count(HREF), 1);
    }
}
