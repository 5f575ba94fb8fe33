// src/models/mod.rs

//! Domain models for the archiver.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod item;
mod record;
mod rendition;
mod safe_id;
mod search;

// Re-export all public types
pub use config::{ArchiveConfig, Config, CrawlerConfig, LoggingConfig, SearchConfig};
pub use item::{Item, NEXT_PROMPT, Page, TIMESTAMP_FORMAT};
pub use record::ArchiveRecord;
pub use rendition::{Rendition, RenditionKind, RenditionSet};
pub use safe_id::{FILLER, SafeId};
pub use search::{SearchMode, SearchQuery};
