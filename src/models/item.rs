//! Search response structures.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, Result};

/// Exact format of `date_created`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Relation label of the continuation link.
pub const NEXT_PROMPT: &str = "Next";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    collection: Collection,
}

#[derive(Debug, Deserialize)]
struct Collection {
    #[serde(default)]
    items: Vec<Value>,
    #[serde(default)]
    links: Vec<Link>,
}

#[derive(Debug, Deserialize)]
struct Link {
    #[serde(default)]
    prompt: Option<String>,
    href: String,
}

/// One decoded page of search results.
#[derive(Debug, Clone, Default)]
pub struct Page {
    /// Raw item objects, in listed order
    pub items: Vec<Value>,
    /// Continuation URL, if the server offered one
    pub next: Option<String>,
}

impl Page {
    /// Decode a search response payload.
    ///
    /// Fails when the top-level `collection` wrapper is missing or malformed.
    pub fn from_value(payload: Value) -> Result<Self> {
        let response: SearchResponse = serde_json::from_value(payload)
            .map_err(|e| AppError::api_shape(format!("search response: {e}")))?;
        let Collection { items, links } = response.collection;

        let next = links
            .into_iter()
            .find(|link| link.prompt.as_deref() == Some(NEXT_PROMPT))
            .map(|link| link.href);

        Ok(Self { items, next })
    }
}

#[derive(Debug, Deserialize)]
struct RawItem {
    data: Vec<Value>,
    #[serde(default)]
    href: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawItemData {
    nasa_id: String,
    #[serde(default)]
    date_created: Option<Value>,
}

/// The fields of a search item the archiver acts on.
///
/// Only the identifier is required up front. The timestamp and asset-link
/// endpoint are checked when first read, so an item already in the ledger
/// is never rejected for them.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// API-assigned identifier, unsanitized
    pub identifier: String,
    created_at: Option<Value>,
    asset_links_href: Option<Value>,
}

impl Item {
    /// Extract the item identifier from a raw search item.
    pub fn from_value(raw: &Value) -> Result<Self> {
        let item = RawItem::deserialize(raw)
            .map_err(|e| AppError::api_shape(format!("search item: {e}")))?;
        let first = item
            .data
            .into_iter()
            .next()
            .ok_or_else(|| AppError::api_shape("search item has an empty data list"))?;
        let data = RawItemData::deserialize(first)
            .map_err(|e| AppError::api_shape(format!("search item data: {e}")))?;

        Ok(Self {
            identifier: data.nasa_id,
            created_at: data.date_created,
            asset_links_href: item.href,
        })
    }

    /// Creation timestamp as sent by the API.
    pub fn created_at(&self) -> Result<&str> {
        self.created_at
            .as_ref()
            .and_then(Value::as_str)
            .ok_or_else(|| {
                AppError::api_shape("search item: date_created is missing or not a string")
            })
    }

    /// Endpoint listing the item's asset URLs.
    pub fn asset_links_href(&self) -> Result<&str> {
        self.asset_links_href
            .as_ref()
            .and_then(Value::as_str)
            .ok_or_else(|| {
                AppError::api_shape("search item: href is missing or not a string")
            })
    }

    /// Calendar date of the creation timestamp, taken as-is in UTC.
    pub fn created_date(&self) -> Result<NaiveDate> {
        let created_at = self.created_at()?;
        NaiveDateTime::parse_from_str(created_at, TIMESTAMP_FORMAT)
            .map(|dt| dt.date())
            .map_err(|source| AppError::Timestamp {
                value: created_at.to_string(),
                source,
            })
    }
}
