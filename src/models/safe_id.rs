//! Filesystem-and-ledger-safe identifiers.

use std::fmt;

/// Character substituted for anything that is not alphanumeric.
pub const FILLER: char = '_';

/// Identifier safe to use as a file stem and ledger key.
///
/// Every non-alphanumeric character of the raw id becomes [`FILLER`] and
/// trailing fillers are trimmed. Leading and inner fillers are kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SafeId(String);

impl SafeId {
    pub fn new(raw: &str) -> Self {
        let mapped: String = raw
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { FILLER })
            .collect();
        Self(mapped.trim_end_matches(FILLER).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SafeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SafeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
