//! Analytics route handlers.
//!
//! Charts are demo series. The dataset export is real: it builds the CSV the
//! export dialog downloads.

use axum::{
    Json, Router,
    extract::{Query, State},
    response::Response,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use pathway_core::{DateRange, Email};

use super::csv_response;
use crate::components::csv_export::export_analytics;
use crate::components::{DatasetSelection, ExportError, ExportFormat};
use crate::error::AppError;
use crate::models::ValidationError;
use crate::state::AppState;

/// Build the analytics router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/analytics", get(index))
        .route("/analytics/export", post(export))
}

/// Query parameters for the analytics view.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsQuery {
    pub range: Option<DateRange>,
}

/// Chart point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Point {
    pub label: &'static str,
    pub value: u32,
}

const fn point(label: &'static str, value: u32) -> Point {
    Point { label, value }
}

/// A titled chart.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Chart {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub points: &'static [Point],
}

const DAILY_ACTIVE: Chart = Chart {
    title: "Daily Active Users (DAU)",
    subtitle: "vs. last 7 days",
    points: &[
        point("Mon", 1200),
        point("Tue", 1400),
        point("Wed", 1350),
        point("Thu", 1500),
        point("Fri", 1600),
        point("Sat", 1300),
        point("Sun", 1482),
    ],
};

const WEEKLY_ACTIVE: Chart = Chart {
    title: "Weekly Active Users (WAU)",
    subtitle: "Last 4 weeks",
    points: &[
        point("Week 1", 8500),
        point("Week 2", 9100),
        point("Week 3", 8900),
        point("Week 4", 8930),
    ],
};

const MEMBERSHIP: Chart = Chart {
    title: "Membership Distribution",
    subtitle: "Breakdown of user tiers",
    points: &[
        point("Premium (50%)", 50),
        point("Enterprise (30%)", 30),
        point("Free (20%)", 20),
    ],
};

const ENGAGEMENT: Chart = Chart {
    title: "System Engagement",
    subtitle: "Usage in the last 7 days",
    points: &[
        point("Imports", 2600),
        point("Letters", 7200),
        point("Disputes", 2800),
    ],
};

const TOP_ARTICLES: Chart = Chart {
    title: "Content Performance",
    subtitle: "Top 5 Articles · Views in the last 7 days",
    points: &[
        point("Intro to Credit", 4200),
        point("Fixing Errors", 3800),
        point("Building Score", 2900),
        point("Debt Mgt.", 2100),
        point("Loans 101", 1500),
    ],
};

/// Analytics view-model.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsView {
    pub range: DateRange,
    pub ranges: Vec<RangeOption>,
    pub charts: [Chart; 5],
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RangeOption {
    pub value: DateRange,
    pub label: &'static str,
}

/// Analytics view.
///
/// GET /analytics
#[instrument]
async fn index(Query(query): Query<AnalyticsQuery>) -> Json<AnalyticsView> {
    Json(AnalyticsView {
        range: query.range.unwrap_or_default(),
        ranges: DateRange::ALL
            .iter()
            .map(|range| RangeOption {
                value: *range,
                label: range.label(),
            })
            .collect(),
        charts: [DAILY_ACTIVE, WEEKLY_ACTIVE, MEMBERSHIP, ENGAGEMENT, TOP_ARTICLES],
    })
}

/// Export dialog body.
#[derive(Debug, Default, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub format: ExportFormat,
    #[serde(default)]
    pub range: DateRange,
    #[serde(default)]
    pub datasets: DatasetSelection,
    /// Address to send a link to. Delivery is not wired up; the request is
    /// only logged.
    #[serde(default)]
    pub email: Option<String>,
}

/// Build the analytics dataset CSV.
///
/// POST /analytics/export
#[instrument(skip(state, body), fields(format = %body.format.as_str(), range = %body.range))]
async fn export(
    State(state): State<AppState>,
    Json(body): Json<ExportRequest>,
) -> Result<Response, AppError> {
    let recipient = match body.email.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => {
            Some(Email::parse(raw).map_err(|e| ValidationError::new(e.to_string()))?)
        }
        _ => None,
    };

    let export = match export_analytics(body.format, body.range, body.datasets, state.clock().now()) {
        Ok(export) => export,
        Err(err @ ExportError::Unsupported(_)) => return Err(AppError::BadRequest(err.to_string())),
        Err(err) => return Err(err.into()),
    };

    if let Some(recipient) = recipient {
        warn!(recipient = %recipient, filename = %export.filename, "Export link delivery is not available");
    }
    info!(filename = %export.filename, "Analytics export built");
    Ok(csv_response(export))
}
