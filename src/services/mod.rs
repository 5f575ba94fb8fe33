//! Service layer for the archiver.
//!
//! This module contains the network-facing pieces:
//! - HTTP access behind the `Fetcher` trait (`HttpFetcher`)
//! - Best-rendition selection (`AssetResolver`)

pub mod fetcher;
mod resolver;

pub use fetcher::{Fetched, Fetcher, HttpFetcher};
pub use resolver::AssetResolver;
