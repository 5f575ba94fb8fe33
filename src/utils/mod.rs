//! Utility functions and helpers.

pub mod http;
pub mod log;
pub mod url;

pub use self::log::Logger;
