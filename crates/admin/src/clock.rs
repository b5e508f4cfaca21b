//! Time source for record timestamps, id allocation and export file names.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Provides "now".
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Today's date, used for `lastUpdated`/`dateJoined` style fields.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Render an instant as a filesystem-safe timestamp.
///
/// Produces the RFC 3339 form with millisecond precision and a `Z` suffix,
/// with `:` and `.` replaced by `-` (`2024-05-21T10-15-30-123Z`).
#[must_use]
pub fn file_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-")
}

/// Format a date the way record date fields store it (`YYYY-MM-DD`).
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
