//! Pipeline entry points for archiver operations.
//!
//! - `run_archiver`: sweep every configured term in both search modes
//! - `Crawler`: follow one search through all of its pages
//! - `Archiver`: dedup, download and record a single item

pub mod archive;
pub mod crawl;
#[allow(clippy::module_inception)]
mod pipeline;

pub use archive::{ArchiveOutcome, Archiver};
pub use crawl::{Crawler, SweepStats};
pub use pipeline::run_archiver;
