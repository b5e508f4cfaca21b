//! Dashboard route handler.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use pathway_core::{DateRange, TicketStatus, UserStatus, Visibility};

use crate::state::AppState;

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/dashboard", get(index))
}

/// Query parameters for the dashboard.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub range: Option<DateRange>,
}

/// One KPI card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub id: &'static str,
    pub label: &'static str,
    pub value: usize,
}

/// Activity feed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivityView {
    pub title: &'static str,
    pub time_ago: &'static str,
}

/// Chart point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UsagePoint {
    pub label: &'static str,
    pub value: u32,
}

/// Dashboard view-model.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub range: DateRange,
    pub range_label: &'static str,
    pub stats: Vec<StatCard>,
    pub usage: &'static [UsagePoint],
    pub recent_activity: &'static [ActivityView],
}

const USAGE: &[UsagePoint] = &[
    UsagePoint { label: "Day 1", value: 620 },
    UsagePoint { label: "Day 2", value: 580 },
    UsagePoint { label: "Day 3", value: 610 },
    UsagePoint { label: "Day 4", value: 540 },
    UsagePoint { label: "Day 5", value: 670 },
    UsagePoint { label: "Day 6", value: 430 },
    UsagePoint { label: "Day 7", value: 890 },
];

const RECENT_ACTIVITY: &[ActivityView] = &[
    ActivityView { title: "New user 'john.doe' signed up.", time_ago: "5m ago" },
    ActivityView { title: "Dispute #123 was opened.", time_ago: "12m ago" },
    ActivityView { title: "VIP membership activated for 'jane.smith'.", time_ago: "28m ago" },
    ActivityView { title: "Dispute #121 was resolved.", time_ago: "45m ago" },
    ActivityView { title: "3 new letters generated automatically.", time_ago: "1h ago" },
];

/// Dashboard overview.
///
/// GET /dashboard
#[instrument(skip(state))]
async fn index(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Json<DashboardView> {
    let range = query.range.unwrap_or_default();
    let mut stats = Vec::with_capacity(5);

    {
        let users = state.users().read().await;
        stats.push(StatCard {
            id: "total_users",
            label: "Total Users",
            value: users.len(),
        });
        stats.push(StatCard {
            id: "active_users",
            label: "Active Users",
            value: users
                .list()
                .iter()
                .filter(|u| u.status == UserStatus::Active)
                .count(),
        });
    }
    {
        let journeys = state.journeys().read().await;
        stats.push(StatCard {
            id: "journeys_in_progress",
            label: "Journeys In Progress",
            value: journeys.list().iter().filter(|j| j.progress < 100).count(),
        });
    }
    {
        let tickets = state.tickets().read().await;
        stats.push(StatCard {
            id: "open_tickets",
            label: "Open Tickets",
            value: tickets
                .list()
                .iter()
                .filter(|t| t.status == TicketStatus::Open)
                .count(),
        });
    }
    {
        let content = state.content().read().await;
        stats.push(StatCard {
            id: "published_content",
            label: "Published Content",
            value: content
                .list()
                .iter()
                .filter(|c| c.visibility == Visibility::Visible)
                .count(),
        });
    }

    Json(DashboardView {
        range,
        range_label: range.label(),
        stats,
        usage: USAGE,
        recent_activity: RECENT_ACTIVITY,
    })
}
