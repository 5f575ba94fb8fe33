// src/utils/url.rs

//! URL manipulation utilities.

use std::path::Path;

use url::Url;

/// File extension of a URL's path, including the leading dot.
///
/// Query strings and fragments are ignored. Returns an empty string when the
/// last path segment has no extension.
///
/// # Examples
/// ```
/// use archiver::utils::url::extension;
///
/// assert_eq!(extension("https://example.com/a/PIA1~orig.jpg?x=1"), ".jpg");
/// assert_eq!(extension("https://example.com/a/README"), "");
/// ```
pub fn extension(raw: &str) -> String {
    let path = match Url::parse(raw) {
        Ok(url) => url.path().to_string(),
        Err(_) => raw.split(['?', '#']).next().unwrap_or_default().to_string(),
    };

    Path::new(&path)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}

/// Build a URL from a base and query parameters, encoding the values.
///
/// # Examples
/// ```
/// use archiver::utils::url::with_query;
///
/// let url = with_query("https://api.example.com/search", &[("q", "mars 2020")]).unwrap();
/// assert_eq!(url, "https://api.example.com/search?q=mars+2020");
/// ```
pub fn with_query(base: &str, params: &[(&str, &str)]) -> Result<String, url::ParseError> {
    let url = Url::parse_with_params(base, params)?;
    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_from_asset_url() {
        assert_eq!(
            extension("http://images-assets.nasa.gov/image/PIA1/PIA1~orig.jpg"),
            ".jpg"
        );
        assert_eq!(extension("https://x.org/a/b.tar.gz"), ".gz");
    }

    #[test]
    fn test_extension_missing() {
        assert_eq!(extension("https://x.org/a/b"), "");
        assert_eq!(extension("https://x.org/"), "");
        assert_eq!(extension("https://x.org/a/.hidden"), "");
        assert_eq!(extension("https://x.org/a/name."), "");
    }

    #[test]
    fn test_extension_ignores_query_and_fragment() {
        assert_eq!(extension("https://x.org/img.png?size=large#top"), ".png");
        assert_eq!(extension("relative/img.tif?x=y"), ".tif");
    }

    #[test]
    fn test_with_query_encodes_values() {
        let url = with_query(
            "https://images-api.nasa.gov/search",
            &[("keywords", "mars 2020"), ("media_type", "image")],
        )
        .unwrap();
        assert_eq!(
            url,
            "https://images-api.nasa.gov/search?keywords=mars+2020&media_type=image"
        );
    }

    #[test]
    fn test_with_query_rejects_bad_base() {
        assert!(with_query("not a url", &[("q", "x")]).is_err());
    }
}
