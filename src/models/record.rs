//! Ledger record data structure.

use chrono::NaiveDate;

use super::{RenditionKind, SafeId};

/// Prefix that starts every ledger line.
const LINE_PREFIX: &str = "&&";
const FIELD_SEPARATOR: char = '|';

/// One processing attempt, as written to the ledger.
///
/// Line format: `&&{safe_id}|{YYYY-MM-DD}|{True|False}|{kind|None}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveRecord {
    pub safe_id: SafeId,
    pub date: NaiveDate,
    pub success: bool,
    pub rendition: Option<RenditionKind>,
}

impl ArchiveRecord {
    pub fn new(
        safe_id: SafeId,
        date: NaiveDate,
        success: bool,
        rendition: Option<RenditionKind>,
    ) -> Self {
        Self {
            safe_id,
            date,
            success,
            rendition,
        }
    }

    /// Serialize as a single ledger line, without the trailing newline.
    pub fn to_line(&self) -> String {
        format!(
            "{LINE_PREFIX}{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}",
            self.safe_id,
            self.date,
            if self.success { "True" } else { "False" },
            self.rendition.map_or("None", RenditionKind::label),
        )
    }

    /// Parse a ledger line. Returns `None` for anything malformed.
    pub fn parse_line(line: &str) -> Option<Self> {
        let body = line.trim_end().strip_prefix(LINE_PREFIX)?;
        let mut fields = body.split(FIELD_SEPARATOR);

        let safe_id = fields.next()?;
        let date = NaiveDate::parse_from_str(fields.next()?, "%Y-%m-%d").ok()?;
        let success = match fields.next()? {
            "True" => true,
            "False" => false,
            _ => return None,
        };
        let rendition = match fields.next()? {
            "None" => None,
            label => Some(label.parse().ok()?),
        };
        if fields.next().is_some() {
            return None;
        }

        Some(Self {
            safe_id: SafeId::new(safe_id),
            date,
            success,
            rendition,
        })
    }

    /// Safe-id field of a ledger line, without validating the rest.
    pub fn line_safe_id(line: &str) -> Option<&str> {
        line.strip_prefix(LINE_PREFIX)?
            .split(FIELD_SEPARATOR)
            .next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_to_line_success() {
        let record = ArchiveRecord::new(
            SafeId::new("PIA-12345"),
            date(2021, 3, 7),
            true,
            Some(RenditionKind::Original),
        );
        assert_eq!(record.to_line(), "&&PIA_12345|2021-03-07|True|link_org");
    }

    #[test]
    fn test_to_line_failure_without_kind() {
        let record = ArchiveRecord::new(SafeId::new("abc"), date(1999, 12, 31), false, None);
        assert_eq!(record.to_line(), "&&abc|1999-12-31|False|None");
    }

    #[test]
    fn test_parse_line() {
        let record = ArchiveRecord::parse_line("&&PIA_1|2020-01-02|False|link_thumb\n").unwrap();
        assert_eq!(record.safe_id.as_str(), "PIA_1");
        assert_eq!(record.date, date(2020, 1, 2));
        assert!(!record.success);
        assert_eq!(record.rendition, Some(RenditionKind::Thumbnail));
    }

    #[test]
    fn test_parse_line_rejects_malformed() {
        assert!(ArchiveRecord::parse_line("").is_none());
        assert!(ArchiveRecord::parse_line("PIA_1|2020-01-02|True|None").is_none());
        assert!(ArchiveRecord::parse_line("&&PIA_1|2020-13-02|True|None").is_none());
        assert!(ArchiveRecord::parse_line("&&PIA_1|2020-01-02|yes|None").is_none());
        assert!(ArchiveRecord::parse_line("&&PIA_1|2020-01-02|True|link_huge").is_none());
        assert!(ArchiveRecord::parse_line("&&PIA_1|2020-01-02|True|None|x").is_none());
    }

    #[test]
    fn test_line_safe_id() {
        assert_eq!(
            ArchiveRecord::line_safe_id("&&PIA_1|2020-01-02|True|None"),
            Some("PIA_1")
        );
        assert_eq!(ArchiveRecord::line_safe_id("garbage"), None);
    }
}
