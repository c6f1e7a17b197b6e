//! Conversion between the approach feed's date text and `NaiveDateTime`.
//!
//! # Invariants
//! - Parsed instants have minute precision; seconds are always zero.
//! - Formatted output is exactly `YYYY-MM-DD HH:MM` (UTC, no suffix).

use chrono::NaiveDateTime;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Input shape of the `cd` field, e.g. `1900-Jan-01 00:11`.
pub const CD_FORMAT: &str = "%Y-%b-%d %H:%M";
/// Output shape used for display and serialization, e.g. `1900-01-01 00:11`.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Approach date text that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeParseError {
    pub input: String,
    source: chrono::ParseError,
}

impl Display for TimeParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid approach date `{}` (expected YYYY-Mon-DD HH:MM): {}",
            self.input, self.source
        )
    }
}

impl Error for TimeParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Parses feed date text such as `1900-Jan-01 00:11`.
///
/// # Errors
/// - Returns `TimeParseError` for any text that does not match `CD_FORMAT`
///   exactly, including out-of-range days and unknown month abbreviations.
pub fn cd_to_datetime(calendar_date: &str) -> Result<NaiveDateTime, TimeParseError> {
    NaiveDateTime::parse_from_str(calendar_date.trim(), CD_FORMAT).map_err(|source| {
        TimeParseError {
            input: calendar_date.to_string(),
            source,
        }
    })
}

/// Formats an instant as `YYYY-MM-DD HH:MM`.
pub fn datetime_to_str(value: &NaiveDateTime) -> String {
    value.format(DATETIME_FORMAT).to_string()
}
