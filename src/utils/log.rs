// src/utils/log.rs

//! Logging handle with server-style formatting.
//!
//! Components do not talk to the `log` facade directly. The CLI builds one
//! [`Logger`] at startup and every component owns a (cheaply cloned) copy,
//! optionally narrowed to its own scope with [`Logger::scoped`].

use std::fmt::Display;
use std::sync::Arc;

use log::Level;

/// Log target shared by every line the archiver emits.
pub const TARGET: &str = "archiver";

/// Explicit logging handle.
#[derive(Debug, Clone)]
pub struct Logger {
    scope: Arc<str>,
}

impl Logger {
    /// Create a root handle with the given scope label.
    pub fn new(scope: &str) -> Self {
        Self {
            scope: Arc::from(scope),
        }
    }

    /// Derive a handle for a sub-component, e.g. `archiver/crawl`.
    pub fn scoped(&self, child: &str) -> Self {
        Self {
            scope: Arc::from(format!("{}/{}", self.scope, child)),
        }
    }

    /// Scope label of this handle.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    fn emit(&self, level: Level, message: &dyn Display) {
        log::log!(target: TARGET, level, "[{}] {}", self.scope, message);
    }

    /// Log a debug message
    pub fn debug(&self, message: impl Display) {
        self.emit(Level::Debug, &message);
    }

    /// Log an info message
    pub fn info(&self, message: impl Display) {
        self.emit(Level::Info, &message);
    }

    /// Log a warning message
    pub fn warn(&self, message: impl Display) {
        self.emit(Level::Warn, &message);
    }

    /// Log an error message
    pub fn error(&self, message: impl Display) {
        self.emit(Level::Error, &message);
    }

    /// Log a separator line
    pub fn separator(&self) {
        self.info("---");
    }

    /// Log a header
    pub fn header(&self, title: &str) {
        let border = "═".repeat(60);
        self.info(&border);
        self.info(format!("  {title}"));
        self.info(&border);
    }

    /// Log a summary section
    pub fn summary(&self, title: &str, items: &[(&str, String)]) {
        self.info(format!("[SUMMARY] {title}"));
        for (key, value) in items {
            self.info(format!("    {key}: {value}"));
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(TARGET)
    }
}
