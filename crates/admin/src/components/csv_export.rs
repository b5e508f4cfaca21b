//! CSV export of filtered record sets and analytics datasets.
//!
//! Uses the `csv` crate so every field is RFC 4180 quoted when it contains a
//! comma, quote or newline. Exports are built fully in memory: either the
//! whole body is produced or an [`ExportError`] is returned.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use csv::{Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use pathway_core::{DateRange, ParseEnumError};

use super::table_query::Record;
use crate::clock::file_timestamp;

/// Content type of every CSV download.
pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// Columns of the user table export.
pub const USER_COLUMNS: &[&str] = &[
    "id",
    "name",
    "email",
    "tier",
    "status",
    "dateJoined",
    "lastActivity",
    "phone",
    "address",
];

/// Columns of the journey table export.
pub const JOURNEY_COLUMNS: &[&str] = &[
    "id",
    "name",
    "email",
    "plan",
    "stage",
    "progress",
    "lastUpdated",
];

/// Columns of the support ticket export.
pub const TICKET_COLUMNS: &[&str] = &[
    "id",
    "subject",
    "user",
    "status",
    "priority",
    "assignedTo",
    "message",
    "lastUpdated",
];

/// Errors that can occur while building an export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Writing a CSV record failed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The writer could not hand back its buffer.
    #[error("csv buffer error: {0}")]
    Buffer(String),

    /// The encoded body was not valid UTF-8.
    #[error("csv encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// The requested format cannot be produced.
    #[error("{0} export is not supported")]
    Unsupported(ExportFormat),
}

/// A finished download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvExport {
    /// Suggested file name.
    pub filename: String,
    /// MIME type sent with the body.
    pub content_type: &'static str,
    /// CSV text.
    pub body: String,
}

impl CsvExport {
    /// `Content-Disposition` header value for this download.
    #[must_use]
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }
}

/// Build the export file name: `<prefix>-<range>-<timestamp>.csv`.
#[must_use]
pub fn export_filename(prefix: &str, range: DateRange, at: DateTime<Utc>) -> String {
    format!("{prefix}-{range}-{}.csv", file_timestamp(at))
}

/// Serialize `records` projected onto `columns`.
///
/// The header row holds the raw column names. Columns a record does not
/// have are written as empty fields.
///
/// # Errors
///
/// Returns `ExportError` if the CSV writer fails.
pub fn export_records<'a, T, I>(
    records: I,
    columns: &[&str],
    prefix: &str,
    range: DateRange,
    at: DateTime<Utc>,
) -> Result<CsvExport, ExportError>
where
    T: Record + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut writer = new_writer();
    writer.write_record(columns)?;
    for record in records {
        let row: Vec<String> = columns
            .iter()
            .map(|column| record.field(column).map(|v| v.into_owned()).unwrap_or_default())
            .collect();
        writer.write_record(&row)?;
    }
    let body = finish(writer)?;

    Ok(CsvExport {
        filename: export_filename(prefix, range, at),
        content_type: CSV_CONTENT_TYPE,
        body,
    })
}

fn new_writer() -> csv::Writer<Vec<u8>> {
    WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

fn finish(mut writer: csv::Writer<Vec<u8>>) -> Result<String, ExportError> {
    writer.flush().map_err(csv::Error::from)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

// =============================================================================
// Analytics datasets
// =============================================================================

/// Output format requested from the analytics export dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Pdf,
}

impl ExportFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(Self::Csv),
            "pdf" => Ok(Self::Pdf),
            _ => Err(ParseEnumError::new("export format", s)),
        }
    }
}

/// Which analytics datasets to include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSelection {
    pub users: bool,
    pub disputes: bool,
    pub content: bool,
}

impl Default for DatasetSelection {
    fn default() -> Self {
        Self {
            users: true,
            disputes: true,
            content: true,
        }
    }
}

/// One `dataset,id,label,value` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricRow {
    pub dataset: &'static str,
    pub id: &'static str,
    pub label: &'static str,
    pub value: u32,
}

const fn metric(dataset: &'static str, id: &'static str, label: &'static str, value: u32) -> MetricRow {
    MetricRow {
        dataset,
        id,
        label,
        value,
    }
}

/// Users and membership figures.
pub const USER_METRICS: [MetricRow; 2] = [
    metric("users", "u_1", "Total Users", 1420),
    metric("users", "u_2", "Active Users", 893),
];

/// Dispute and letter figures.
pub const DISPUTE_METRICS: [MetricRow; 2] = [
    metric("disputes", "d_1", "Open Disputes", 12),
    metric("disputes", "d_2", "Letters Generated", 47),
];

/// Content performance figures.
pub const CONTENT_METRICS: [MetricRow; 2] = [
    metric("content", "c_1", "Top Article 1", 1200),
    metric("content", "c_2", "Top Article 2", 980),
];

impl DatasetSelection {
    /// Rows for every selected dataset, in users/disputes/content order.
    #[must_use]
    pub fn rows(self) -> Vec<MetricRow> {
        [
            (self.users, &USER_METRICS),
            (self.disputes, &DISPUTE_METRICS),
            (self.content, &CONTENT_METRICS),
        ]
        .into_iter()
        .filter(|(selected, _)| *selected)
        .flat_map(|(_, rows)| rows.iter().copied())
        .collect()
    }
}

/// Build the analytics export.
///
/// The body ends with a metadata row `,,range,<range>`.
///
/// # Errors
///
/// Returns `ExportError::Unsupported` for PDF, or a CSV error.
pub fn export_analytics(
    format: ExportFormat,
    range: DateRange,
    datasets: DatasetSelection,
    at: DateTime<Utc>,
) -> Result<CsvExport, ExportError> {
    if format != ExportFormat::Csv {
        return Err(ExportError::Unsupported(format));
    }

    let mut writer = new_writer();
    writer.write_record(["dataset", "id", "label", "value"])?;
    for row in datasets.rows() {
        let value = row.value.to_string();
        writer.write_record([row.dataset, row.id, row.label, value.as_str()])?;
    }
    writer.write_record(["", "", "range", range.as_str()])?;
    let body = finish(writer)?;

    Ok(CsvExport {
        filename: export_filename("analytics-export", range, at),
        content_type: CSV_CONTENT_TYPE,
        body,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::borrow::Cow;

    use chrono::TimeZone;

    use super::*;
    use crate::components::table_query::SortField;

    #[derive(Debug, Clone)]
    struct Note {
        id: String,
        subject: String,
        body: String,
    }

    #[derive(Debug, Clone, Copy, Default, PartialEq)]
    struct ById;

    impl SortField for ById {
        fn key(self) -> &'static str {
            "id"
        }
    }

    impl Record for Note {
        type Id = String;
        type SortField = ById;

        fn id(&self) -> &String {
            &self.id
        }

        fn field(&self, name: &str) -> Option<Cow<'_, str>> {
            match name {
                "id" => Some(Cow::Borrowed(&self.id)),
                "subject" => Some(Cow::Borrowed(&self.subject)),
                "body" => Some(Cow::Borrowed(&self.body)),
                _ => None,
            }
        }

        fn search_fields(&self) -> Vec<&str> {
            vec![self.subject.as_str()]
        }
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 21, 10, 15, 30).unwrap()
    }

    fn notes() -> Vec<Note> {
        vec![
            Note {
                id: "1".to_string(),
                subject: "Hello, \"World\"".to_string(),
                body: "line one\nline two".to_string(),
            },
            Note {
                id: "2".to_string(),
                subject: "Plain".to_string(),
                body: String::new(),
            },
        ]
    }

    #[test]
    fn test_quotes_embedded_commas_and_quotes() {
        let export = export_records(&notes(), &["id", "subject"], "notes", DateRange::Last7Days, at())
            .unwrap();
        let mut lines = export.body.lines();
        assert_eq!(lines.next(), Some("id,subject"));
        assert_eq!(lines.next(), Some("1,\"Hello, \"\"World\"\"\""));
        assert_eq!(lines.next(), Some("2,Plain"));
    }

    #[test]
    fn test_round_trips_through_csv_reader() {
        let records = notes();
        let columns = ["id", "subject", "body"];
        let export = export_records(&records, &columns, "notes", DateRange::Last7Days, at()).unwrap();

        let mut reader = csv::Reader::from_reader(export.body.as_bytes());
        assert_eq!(reader.headers().unwrap(), &csv::StringRecord::from(columns.to_vec()));
        let parsed: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(parsed.len(), records.len());
        for (row, note) in parsed.iter().zip(&records) {
            assert_eq!(row.get(0), Some(note.id.as_str()));
            assert_eq!(row.get(1), Some(note.subject.as_str()));
            assert_eq!(row.get(2), Some(note.body.as_str()));
        }
    }

    #[test]
    fn test_unknown_column_is_empty() {
        let export = export_records(&notes(), &["id", "missing"], "notes", DateRange::Last7Days, at())
            .unwrap();
        assert!(export.body.lines().any(|line| line == "2,"));
    }

    #[test]
    fn test_filename_and_content_type() {
        let export = export_records(
            &notes(),
            TICKET_COLUMNS,
            "support-tickets",
            DateRange::Last30Days,
            at(),
        )
        .unwrap();
        assert_eq!(
            export.filename,
            "support-tickets-last_30_days-2024-05-21T10-15-30-000Z.csv"
        );
        assert_eq!(export.content_type, "text/csv; charset=utf-8");
        assert_eq!(
            export.content_disposition(),
            "attachment; filename=\"support-tickets-last_30_days-2024-05-21T10-15-30-000Z.csv\""
        );
    }

    #[test]
    fn test_header_only_for_empty_set() {
        let empty: Vec<Note> = vec![];
        let export = export_records(&empty, &["id"], "notes", DateRange::Last7Days, at()).unwrap();
        assert_eq!(export.body, "id\n");
    }

    #[test]
    fn test_analytics_all_datasets() {
        let export = export_analytics(
            ExportFormat::Csv,
            DateRange::ThisMonth,
            DatasetSelection::default(),
            at(),
        )
        .unwrap();
        let lines: Vec<&str> = export.body.lines().collect();
        assert_eq!(lines.first(), Some(&"dataset,id,label,value"));
        assert_eq!(lines.get(1), Some(&"users,u_1,Total Users,1420"));
        assert_eq!(lines.get(6), Some(&"content,c_2,Top Article 2,980"));
        assert_eq!(lines.last(), Some(&",,range,this_month"));
        assert_eq!(lines.len(), 8);
        assert!(export.filename.starts_with("analytics-export-this_month-"));
    }

    #[test]
    fn test_analytics_subset() {
        let selection = DatasetSelection {
            users: false,
            disputes: true,
            content: false,
        };
        let export = export_analytics(ExportFormat::Csv, DateRange::Last7Days, selection, at()).unwrap();
        assert_eq!(
            export.body,
            "dataset,id,label,value\n\
             disputes,d_1,Open Disputes,12\n\
             disputes,d_2,Letters Generated,47\n\
             ,,range,last_7_days\n"
        );
    }

    #[test]
    fn test_analytics_pdf_is_unsupported() {
        let err = export_analytics(
            ExportFormat::Pdf,
            DateRange::Last7Days,
            DatasetSelection::default(),
            at(),
        )
        .unwrap_err();
        assert!(matches!(err, ExportError::Unsupported(ExportFormat::Pdf)));
        assert_eq!(err.to_string(), "pdf export is not supported");
    }
}
