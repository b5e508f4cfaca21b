//! User management route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    routing::{get, post},
};
use serde::Deserialize;
use tracing::{info, instrument};

use pathway_core::{DateRange, UserId};

use super::{QueryUpdate, QueryView, TableView, csv_response};
use crate::components::csv_export::{USER_COLUMNS, export_records};
use crate::components::data_table::users_table_config;
use crate::error::AppError;
use crate::models::{User, UserForm, UserSortField};
use crate::state::AppState;

/// Build the users router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(index).post(create))
        .route("/users/export", get(export))
        .route("/users/{id}", post(update))
        .route("/users/{id}/toggle-status", post(toggle_status))
        .route("/users/{id}/delete", post(delete))
}

/// Table parameters for the user list and its export.
#[derive(Debug, Default, Deserialize)]
pub struct UsersParams {
    pub search: Option<String>,
    pub tier: Option<String>,
    pub status: Option<String>,
    pub sort: Option<String>,
    pub page: Option<usize>,
    pub range: Option<DateRange>,
}

impl UsersParams {
    fn update(&self) -> QueryUpdate<'_> {
        QueryUpdate {
            search: self.search.as_deref(),
            filters: vec![("tier", self.tier.as_deref()), ("status", self.status.as_deref())],
            sort: self.sort.as_deref(),
            page: self.page,
        }
    }
}

/// User table.
///
/// GET /users
#[instrument(skip(state))]
async fn index(
    State(state): State<AppState>,
    Query(params): Query<UsersParams>,
) -> Result<Json<TableView<User, UserSortField>>, AppError> {
    let mut query = state.queries().users.write().await;
    params.update().apply(&mut query)?;

    let users = state.users().read().await;
    Ok(Json(TableView {
        table: users_table_config(),
        query: QueryView::from(&*query),
        page: query.apply(users.list()).cloned(),
    }))
}

/// CSV of every user matching the current filters.
///
/// GET /users/export
#[instrument(skip(state))]
async fn export(
    State(state): State<AppState>,
    Query(params): Query<UsersParams>,
) -> Result<Response, AppError> {
    let mut query = state.queries().users.write().await;
    params.update().apply(&mut query)?;

    let users = state.users().read().await;
    let rows = query.filtered(users.list());
    let export = export_records(
        rows,
        USER_COLUMNS,
        "users",
        params.range.unwrap_or_default(),
        state.clock().now(),
    )?;
    info!(filename = %export.filename, "User export built");
    Ok(csv_response(export))
}

/// Add a user.
///
/// POST /users
#[instrument(skip(state, form))]
async fn create(
    State(state): State<AppState>,
    Json(form): Json<UserForm>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let today = state.today();
    let mut users = state.users().write().await;
    let user = form.into_user(users.next_id(state.clock()), &today)?;
    let user = users.insert(user)?.clone();
    info!(user_id = %user.id, "User created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Edit a user.
///
/// POST /users/{id}
#[instrument(skip(state, form))]
async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<UserForm>,
) -> Result<Json<User>, AppError> {
    let id = UserId::from(id);
    let mut users = state.users().write().await;
    users.update(&id, |user| form.apply_to(user).map(|()| user.clone()))?
        .map(Json)
        .map_err(AppError::from)
}

/// Flip a user between active and inactive.
///
/// POST /users/{id}/toggle-status
#[instrument(skip(state))]
async fn toggle_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, AppError> {
    let id = UserId::from(id);
    let mut users = state.users().write().await;
    let user = users.update(&id, |user| {
        user.status = user.status.toggled();
        user.clone()
    })?;
    info!(user_id = %user.id, status = %user.status, "User status toggled");
    Ok(Json(user))
}

/// Delete a user.
///
/// POST /users/{id}/delete
#[instrument(skip(state))]
async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let removed = state.users().write().await.remove(&UserId::from(id))?;
    info!(user_id = %removed.id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}
