// src/lib.rs

//! Media Archiver Library
//!
//! Crawls a paginated media-search API and keeps an incremental,
//! date-partitioned local archive of the best rendition of every result.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
