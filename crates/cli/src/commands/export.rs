//! CSV exports of the seeded tables.
//!
//! Files are named `<prefix>-<range>-<timestamp>.csv`, the same names the
//! dashboard's export buttons produce.

use std::path::{Path, PathBuf};

use tracing::info;

use pathway_admin::clock::{Clock, SystemClock};
use pathway_admin::components::CsvExport;
use pathway_admin::components::csv_export::{
    JOURNEY_COLUMNS, TICKET_COLUMNS, USER_COLUMNS, export_records,
};
use pathway_admin::db::{RecordStore, seed};
use pathway_admin::middleware::View;
use pathway_admin::routes::support::DEFAULT_SUPPORT_RANGE;
use pathway_admin::services::AuthSession;
use pathway_core::DateRange;

use super::{CliError, require_view};

/// Table to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportTarget {
    Users,
    Journeys,
    Tickets,
}

impl ExportTarget {
    /// View whose access rules gate the export.
    #[must_use]
    pub const fn view(self) -> View {
        match self {
            Self::Users => View::Users,
            Self::Journeys => View::Reports,
            Self::Tickets => View::Support,
        }
    }

    /// Range used when none is given.
    #[must_use]
    pub const fn default_range(self) -> DateRange {
        match self {
            Self::Users | Self::Journeys => DateRange::Last7Days,
            Self::Tickets => DEFAULT_SUPPORT_RANGE,
        }
    }
}

/// Build the export for `target`.
///
/// # Errors
///
/// Returns an access error when the signed-in role cannot open the table's
/// view, or `CliError::Export` if the CSV cannot be written.
pub fn build(
    session: &AuthSession,
    target: ExportTarget,
    range: Option<DateRange>,
    clock: &dyn Clock,
) -> Result<CsvExport, CliError> {
    require_view(session, target.view())?;

    let range = range.unwrap_or_else(|| target.default_range());
    let now = clock.now();
    let export = match target {
        ExportTarget::Users => {
            let users = RecordStore::with_records(seed::users())?;
            export_records(users.list(), USER_COLUMNS, "users", range, now)?
        }
        ExportTarget::Journeys => {
            let journeys = RecordStore::with_records(seed::journeys())?;
            export_records(journeys.list(), JOURNEY_COLUMNS, "journeys", range, now)?
        }
        ExportTarget::Tickets => {
            let tickets = RecordStore::with_records(seed::tickets())?;
            export_records(tickets.list(), TICKET_COLUMNS, "support-tickets", range, now)?
        }
    };
    Ok(export)
}

/// Write `export` into `dir`, returning the file path.
///
/// # Errors
///
/// Returns `CliError::Write` if the directory or file cannot be written.
pub fn write(export: &CsvExport, dir: &Path) -> Result<PathBuf, CliError> {
    let path = dir.join(&export.filename);
    std::fs::create_dir_all(dir)
        .and_then(|()| std::fs::write(&path, &export.body))
        .map_err(|source| CliError::Write {
            path: path.clone(),
            source,
        })?;
    info!("Wrote {}", path.display());
    Ok(path)
}

/// Build and write in one step.
///
/// # Errors
///
/// See [`build`] and [`write`].
pub fn run(
    session: &AuthSession,
    target: ExportTarget,
    range: Option<DateRange>,
    dir: &Path,
) -> Result<PathBuf, CliError> {
    let export = build(session, target, range, &SystemClock)?;
    write(&export, dir)
}
