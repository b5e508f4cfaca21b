//! HTTP route handlers for the dashboard.
//!
//! Every view answers with a JSON view-model for the rendering layer.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                              - Health check
//!
//! # Auth
//! GET  /login                               - Login view
//! POST /login                               - Sign in
//! POST /logout                              - Sign out
//! POST /profile                             - Update profile email
//!
//! # API
//! GET  /api/menu                            - Menu entries for the current role
//!
//! # Views
//! GET  /dashboard                           - Summary counts for a range
//! GET  /users                               - User table (+ create, edit, toggle, delete, export)
//! GET  /analytics                           - KPI view (+ dataset export)
//! GET  /reports                             - Journey table (+ export)
//! GET  /content-control                     - Content tabs (+ create, edit, toggle, delete)
//! GET  /settings                            - Settings view (+ theme)
//! GET  /help                                - Help view
//! GET  /support                             - Ticket table (+ create, edit, reply, delete, export)
//!
//! *                                         - 303 to /dashboard
//! ```

pub mod analytics;
pub mod api;
pub mod auth;
pub mod content;
pub mod dashboard;
pub mod help;
pub mod reports;
pub mod settings;
pub mod support;
pub mod users;

use std::collections::BTreeMap;
use std::str::FromStr;

use axum::{
    Router,
    http::header,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Serialize;

use pathway_core::ParseEnumError;

use crate::components::{CsvExport, DataTableConfig, SortField, TablePage, TableQuery};
use crate::error::AppError;
use crate::middleware::View;
use crate::state::AppState;

/// Build every dashboard route, with the unknown-path fallback.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(auth::router())
        .merge(api::router())
        .merge(dashboard::router())
        .merge(users::router())
        .merge(analytics::router())
        .merge(reports::router())
        .merge(content::router())
        .merge(settings::router())
        .merge(help::router())
        .merge(support::router())
        .fallback(fallback)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
async fn health() -> &'static str {
    "ok"
}

/// Unknown paths go to the dashboard, which is guarded in turn.
async fn fallback() -> Redirect {
    Redirect::to(View::DEFAULT.path())
}

/// Requested changes to a table's query state.
#[derive(Debug, Default)]
pub struct QueryUpdate<'a> {
    pub search: Option<&'a str>,
    pub filters: Vec<(&'static str, Option<&'a str>)>,
    pub sort: Option<&'a str>,
    pub page: Option<usize>,
}

impl QueryUpdate<'_> {
    /// Apply the update to `query`.
    ///
    /// A search or filter change moves the table to page 1 and the
    /// requested page is ignored, so a narrowed result never lands past
    /// its last page.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for an unknown sort field.
    pub fn apply<S>(self, query: &mut TableQuery<S>) -> Result<(), AppError>
    where
        S: SortField + FromStr<Err = ParseEnumError>,
    {
        let mut reset = false;
        if let Some(search) = self.search {
            reset |= query.set_search(search);
        }
        for (key, value) in self.filters {
            if let Some(value) = value {
                reset |= query.set_filter(key, value);
            }
        }
        if let Some(sort) = self.sort {
            let sort = sort
                .parse::<S>()
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            query.set_sort(sort);
        }
        if let (Some(page), false) = (self.page, reset) {
            query.set_page(page);
        }
        Ok(())
    }
}

/// Query state echoed back to the renderer.
#[derive(Debug, Clone, Serialize)]
pub struct QueryView<S> {
    pub search: String,
    pub filters: BTreeMap<String, String>,
    pub sort: S,
}

impl<S: SortField + Serialize> From<&TableQuery<S>> for QueryView<S> {
    fn from(query: &TableQuery<S>) -> Self {
        Self {
            search: query.search().to_string(),
            filters: query.filters().clone(),
            sort: query.sort(),
        }
    }
}

/// A table view: how to draw it, the query behind it and the visible page.
#[derive(Debug, Clone, Serialize)]
pub struct TableView<T, S> {
    pub table: DataTableConfig,
    pub query: QueryView<S>,
    #[serde(flatten)]
    pub page: TablePage<T>,
}

/// Send an export as a file download.
pub fn csv_response(export: CsvExport) -> Response {
    let disposition = export.content_disposition();
    (
        [
            (header::CONTENT_TYPE, export.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.body,
    )
        .into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::UserSortField;

    fn query() -> TableQuery<UserSortField> {
        let mut query = TableQuery::new(5);
        query.set_page(3);
        query
    }

    #[test]
    fn test_filter_change_ignores_requested_page() {
        let mut query = query();
        QueryUpdate {
            filters: vec![("tier", Some("pro"))],
            page: Some(4),
            ..QueryUpdate::default()
        }
        .apply(&mut query)
        .unwrap();
        assert_eq!(query.page(), 1);
        assert_eq!(query.filter("tier"), Some("pro"));
    }

    #[test]
    fn test_unchanged_filter_keeps_requested_page() {
        let mut query = query();
        QueryUpdate {
            search: Some(""),
            filters: vec![("tier", Some("all"))],
            page: Some(2),
            ..QueryUpdate::default()
        }
        .apply(&mut query)
        .unwrap();
        assert_eq!(query.page(), 2);
    }

    #[test]
    fn test_sort_parsing() {
        let mut query = query();
        QueryUpdate {
            sort: Some("last_activity"),
            ..QueryUpdate::default()
        }
        .apply(&mut query)
        .unwrap();
        assert_eq!(query.sort(), UserSortField::LastActivity);
        assert_eq!(query.page(), 3);

        let err = QueryUpdate {
            sort: Some("name"),
            ..QueryUpdate::default()
        }
        .apply(&mut query)
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_csv_response_headers() {
        let response = csv_response(CsvExport {
            filename: "users-last_7_days-x.csv".to_string(),
            content_type: crate::components::csv_export::CSV_CONTENT_TYPE,
            body: "id\n".to_string(),
        });
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "text/csv; charset=utf-8");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"users-last_7_days-x.csv\""
        );
    }
}
