//! Support desk route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use pathway_core::{DateRange, MessageId, TicketId};

use super::{QueryUpdate, QueryView, TableView, csv_response};
use crate::components::csv_export::{TICKET_COLUMNS, export_records};
use crate::components::data_table::tickets_table_config;
use crate::error::AppError;
use crate::models::{ReplyForm, Ticket, TicketForm, TicketSortField};
use crate::state::AppState;

/// Range the support desk reports on unless told otherwise.
pub const DEFAULT_SUPPORT_RANGE: DateRange = DateRange::Last30Days;

/// Build the support router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/support", get(index).post(create))
        .route("/support/export", get(export))
        .route("/support/{id}", post(update))
        .route("/support/{id}/reply", post(reply))
        .route("/support/{id}/delete", post(delete))
}

/// Table parameters for the ticket list and its export.
#[derive(Debug, Default, Deserialize)]
pub struct SupportParams {
    pub search: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub sort: Option<String>,
    pub page: Option<usize>,
    pub range: Option<DateRange>,
}

impl SupportParams {
    fn update(&self) -> QueryUpdate<'_> {
        QueryUpdate {
            search: self.search.as_deref(),
            filters: vec![
                ("status", self.status.as_deref()),
                ("priority", self.priority.as_deref()),
            ],
            sort: self.sort.as_deref(),
            page: self.page,
        }
    }

    fn range(&self) -> DateRange {
        self.range.unwrap_or(DEFAULT_SUPPORT_RANGE)
    }
}

/// Support view-model.
#[derive(Debug, Clone, Serialize)]
pub struct SupportView {
    pub range: DateRange,
    #[serde(flatten)]
    pub tickets: TableView<Ticket, TicketSortField>,
}

/// Ticket table.
///
/// GET /support
#[instrument(skip(state))]
async fn index(
    State(state): State<AppState>,
    Query(params): Query<SupportParams>,
) -> Result<Json<SupportView>, AppError> {
    let mut query = state.queries().tickets.write().await;
    params.update().apply(&mut query)?;

    let tickets = state.tickets().read().await;
    Ok(Json(SupportView {
        range: params.range(),
        tickets: TableView {
            table: tickets_table_config(),
            query: QueryView::from(&*query),
            page: query.apply(tickets.list()).cloned(),
        },
    }))
}

/// CSV of every ticket matching the current filters.
///
/// GET /support/export
#[instrument(skip(state))]
async fn export(
    State(state): State<AppState>,
    Query(params): Query<SupportParams>,
) -> Result<Response, AppError> {
    let mut query = state.queries().tickets.write().await;
    params.update().apply(&mut query)?;

    let tickets = state.tickets().read().await;
    let export = export_records(
        query.filtered(tickets.list()),
        TICKET_COLUMNS,
        "support-tickets",
        params.range(),
        state.clock().now(),
    )?;
    info!(filename = %export.filename, "Ticket export built");
    Ok(csv_response(export))
}

/// Open a ticket.
///
/// POST /support
#[instrument(skip(state, form))]
async fn create(
    State(state): State<AppState>,
    Json(form): Json<TicketForm>,
) -> Result<(StatusCode, Json<Ticket>), AppError> {
    let today = state.today();
    let mut tickets = state.tickets().write().await;
    let ticket = form.into_ticket(tickets.next_id(state.clock()), &today);
    let ticket = tickets.insert(ticket)?.clone();
    info!(ticket_id = %ticket.id, "Ticket created");
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// Edit a ticket.
///
/// POST /support/{id}
#[instrument(skip(state, form))]
async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<TicketForm>,
) -> Result<Json<Ticket>, AppError> {
    let today = state.today();
    let mut tickets = state.tickets().write().await;
    let ticket = tickets.update(&TicketId::from(id), |ticket| {
        form.apply_to(ticket, &today);
        ticket.clone()
    })?;
    info!(ticket_id = %ticket.id, status = %ticket.status, "Ticket updated");
    Ok(Json(ticket))
}

/// Append a reply to a ticket thread.
///
/// POST /support/{id}/reply
#[instrument(skip(state, form))]
async fn reply(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<ReplyForm>,
) -> Result<Json<Ticket>, AppError> {
    let today = state.today();
    let message_id = MessageId::from_millis(state.clock().now().timestamp_millis());
    let message = form.into_message(message_id, &today)?;
    let mut tickets = state.tickets().write().await;
    let ticket = tickets.update(&TicketId::from(id), |ticket| {
        ticket.messages.push(message);
        ticket.last_updated = today;
        ticket.clone()
    })?;
    info!(ticket_id = %ticket.id, replies = ticket.messages.len(), "Reply added");
    Ok(Json(ticket))
}

/// Delete a ticket.
///
/// POST /support/{id}/delete
#[instrument(skip(state))]
async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let removed = state.tickets().write().await.remove(&TicketId::from(id))?;
    info!(ticket_id = %removed.id, "Ticket deleted");
    Ok(StatusCode::NO_CONTENT)
}
