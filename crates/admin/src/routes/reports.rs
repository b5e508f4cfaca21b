//! Reports route handlers: user journeys plus the static report tabs.

use axum::{
    Json, Router,
    extract::{Query, State},
    response::Response,
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use pathway_core::DateRange;

use super::{QueryUpdate, QueryView, TableView, csv_response};
use crate::components::csv_export::{JOURNEY_COLUMNS, export_records};
use crate::components::data_table::journeys_table_config;
use crate::db::seed::JOURNEY_STAGES;
use crate::error::AppError;
use crate::models::{Journey, JourneySortField};
use crate::state::AppState;

/// Build the reports router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reports", get(index))
        .route("/reports/export", get(export))
}

/// Report tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportsTab {
    #[default]
    Journeys,
    Disputes,
    Mail,
    Issues,
}

impl ReportsTab {
    const ALL: [Self; 4] = [Self::Journeys, Self::Disputes, Self::Mail, Self::Issues];

    const fn label(self) -> &'static str {
        match self {
            Self::Journeys => "User Journeys",
            Self::Disputes => "Disputes & Letters",
            Self::Mail => "Mailing Logs",
            Self::Issues => "Issues & Support",
        }
    }
}

/// Table parameters for the journey list and its export.
#[derive(Debug, Default, Deserialize)]
pub struct ReportsParams {
    pub tab: Option<ReportsTab>,
    pub search: Option<String>,
    pub stage: Option<String>,
    pub sort: Option<String>,
    pub page: Option<usize>,
    pub range: Option<DateRange>,
}

impl ReportsParams {
    fn update(&self) -> QueryUpdate<'_> {
        QueryUpdate {
            search: self.search.as_deref(),
            filters: vec![("stage", self.stage.as_deref())],
            sort: self.sort.as_deref(),
            page: self.page,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TabOption {
    pub value: ReportsTab,
    pub label: &'static str,
}

/// Dispute case shown on the disputes tab.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisputeRow {
    pub id: &'static str,
    pub user: &'static str,
    pub case_id: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub status: &'static str,
    pub last_updated: &'static str,
}

const DISPUTES: &[DisputeRow] = &[
    DisputeRow {
        id: "1",
        user: "John Doe",
        case_id: "D-123",
        kind: "Charge-off dispute",
        status: "open",
        last_updated: "2024-05-20",
    },
    DisputeRow {
        id: "2",
        user: "Jane Smith",
        case_id: "D-124",
        kind: "Late payment removal",
        status: "mailed",
        last_updated: "2024-05-18",
    },
    DisputeRow {
        id: "3",
        user: "Mary Williams",
        case_id: "D-125",
        kind: "Collection removal",
        status: "resolved",
        last_updated: "2024-05-10",
    },
];

/// Content of the selected tab.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TabContent {
    Journeys(TableView<Journey, JourneySortField>),
    Disputes { rows: &'static [DisputeRow] },
    Card {
        title: &'static str,
        subtitle: &'static str,
    },
}

/// Reports view-model.
#[derive(Debug, Clone, Serialize)]
pub struct ReportsView {
    pub tab: ReportsTab,
    pub tabs: Vec<TabOption>,
    pub content: TabContent,
}

/// Reports view.
///
/// GET /reports
#[instrument(skip(state))]
async fn index(
    State(state): State<AppState>,
    Query(params): Query<ReportsParams>,
) -> Result<Json<ReportsView>, AppError> {
    let tab = params.tab.unwrap_or_default();
    let content = match tab {
        ReportsTab::Journeys => {
            let mut query = state.queries().journeys.write().await;
            params.update().apply(&mut query)?;
            let journeys = state.journeys().read().await;
            TabContent::Journeys(TableView {
                table: journeys_table_config(JOURNEY_STAGES),
                query: QueryView::from(&*query),
                page: query.apply(journeys.list()).cloned(),
            })
        }
        ReportsTab::Disputes => TabContent::Disputes { rows: DISPUTES },
        ReportsTab::Mail => TabContent::Card {
            title: "Mailing Logs",
            subtitle: "Monitor outgoing letters & emails and catch failures quickly.",
        },
        ReportsTab::Issues => TabContent::Card {
            title: "User Issues & Support",
            subtitle: "Track support tickets, channels, and advisor workload.",
        },
    };

    Ok(Json(ReportsView {
        tab,
        tabs: ReportsTab::ALL
            .into_iter()
            .map(|value| TabOption {
                value,
                label: value.label(),
            })
            .collect(),
        content,
    }))
}

/// CSV of every journey matching the current filters.
///
/// GET /reports/export
#[instrument(skip(state))]
async fn export(
    State(state): State<AppState>,
    Query(params): Query<ReportsParams>,
) -> Result<Response, AppError> {
    let mut query = state.queries().journeys.write().await;
    params.update().apply(&mut query)?;

    let journeys = state.journeys().read().await;
    let export = export_records(
        query.filtered(journeys.list()),
        JOURNEY_COLUMNS,
        "journeys",
        params.range.unwrap_or_default(),
        state.clock().now(),
    )?;
    info!(filename = %export.filename, "Journey export built");
    Ok(csv_response(export))
}
