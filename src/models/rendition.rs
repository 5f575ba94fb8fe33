//! Asset renditions and best-quality selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Quality tier of an asset, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RenditionKind {
    Original,
    Large,
    Medium,
    Small,
    Thumbnail,
}

impl RenditionKind {
    /// All kinds in priority order.
    pub const PRIORITY: [RenditionKind; 5] = [
        RenditionKind::Original,
        RenditionKind::Large,
        RenditionKind::Medium,
        RenditionKind::Small,
        RenditionKind::Thumbnail,
    ];

    /// Token that marks a URL as belonging to this kind.
    pub fn token(self) -> &'static str {
        match self {
            RenditionKind::Original => "orig",
            RenditionKind::Large => "large",
            RenditionKind::Medium => "medium",
            RenditionKind::Small => "small",
            RenditionKind::Thumbnail => "thumb",
        }
    }

    /// Label written to the ledger.
    pub fn label(self) -> &'static str {
        match self {
            RenditionKind::Original => "link_org",
            RenditionKind::Large => "link_large",
            RenditionKind::Medium => "link_medium",
            RenditionKind::Small => "link_small",
            RenditionKind::Thumbnail => "link_thumb",
        }
    }

    /// Classify a URL by the first token it contains, in priority order.
    pub fn classify(url: &str) -> Option<Self> {
        Self::PRIORITY
            .into_iter()
            .find(|kind| url.contains(kind.token()))
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for RenditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RenditionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::PRIORITY
            .into_iter()
            .find(|kind| kind.label() == s)
            .ok_or_else(|| format!("unknown rendition kind '{s}'"))
    }
}

/// A selected asset URL and its tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendition {
    pub kind: RenditionKind,
    pub url: String,
}

/// Candidate URLs bucketed by kind, at most one per bucket.
#[derive(Debug, Clone, Default)]
pub struct RenditionSet {
    slots: [Option<String>; 5],
}

impl RenditionSet {
    /// Bucket a candidate URL. A later URL replaces an earlier one of the
    /// same kind; URLs without a known token are ignored.
    ///
    /// Returns the kind the URL was filed under.
    pub fn insert(&mut self, url: impl Into<String>) -> Option<RenditionKind> {
        let url = url.into();
        let kind = RenditionKind::classify(&url)?;
        self.slots[kind.index()] = Some(url);
        Some(kind)
    }

    pub fn get(&self, kind: RenditionKind) -> Option<&str> {
        self.slots[kind.index()].as_deref()
    }

    /// Highest-priority rendition present.
    pub fn best(&self) -> Option<Rendition> {
        RenditionKind::PRIORITY.into_iter().find_map(|kind| {
            self.get(kind).map(|url| Rendition {
                kind,
                url: url.to_string(),
            })
        })
    }
}

impl<S: Into<String>> FromIterator<S> for RenditionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::default();
        for url in iter {
            set.insert(url);
        }
        set
    }
}
