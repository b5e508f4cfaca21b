//! Content-control route handlers.
//!
//! Items are listed one kind at a time; the selected tab becomes a `kind`
//! filter on the content table query.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use pathway_core::{ContentId, ContentKind};

use super::{QueryUpdate, QueryView, TableView};
use crate::components::data_table::content_table_config;
use crate::error::AppError;
use crate::models::{ContentForm, ContentItem, ContentSortField};
use crate::state::AppState;

/// Build the content-control router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/content-control", get(index).post(create))
        .route("/content-control/{id}", post(update))
        .route("/content-control/{id}/toggle-visibility", post(toggle_visibility))
        .route("/content-control/{id}/delete", post(delete))
}

/// Tab caption for a content kind.
const fn tab_label(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Article => "Articles",
        ContentKind::Lesson => "Lessons",
        ContentKind::Video => "Videos",
        ContentKind::Link => "Credit Resource Links",
        ContentKind::Page => "Static Pages",
    }
}

/// Table parameters for the content list.
#[derive(Debug, Default, Deserialize)]
pub struct ContentParams {
    pub tab: Option<String>,
    pub search: Option<String>,
    pub visibility: Option<String>,
    pub tier: Option<String>,
    pub page: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentTab {
    pub value: &'static str,
    pub label: &'static str,
}

/// Content-control view-model.
#[derive(Debug, Clone, Serialize)]
pub struct ContentView {
    pub tab: &'static str,
    pub tabs: Vec<ContentTab>,
    #[serde(flatten)]
    pub items: TableView<ContentItem, ContentSortField>,
}

/// Create body: the form plus the kind being created.
#[derive(Debug, Deserialize)]
pub struct NewContent {
    #[serde(default = "default_kind")]
    pub kind: ContentKind,
    #[serde(flatten)]
    pub form: ContentForm,
}

const fn default_kind() -> ContentKind {
    ContentKind::Article
}

/// Content items of the selected kind.
///
/// GET /content-control
#[instrument(skip(state))]
async fn index(
    State(state): State<AppState>,
    Query(params): Query<ContentParams>,
) -> Result<Json<ContentView>, AppError> {
    let kind = match params.tab.as_deref() {
        Some(tab) => ContentKind::from_tab(tab)
            .ok_or_else(|| AppError::BadRequest(format!("unknown content tab: {tab}")))?,
        None => default_kind(),
    };

    let mut query = state.queries().content.write().await;
    QueryUpdate {
        search: params.search.as_deref(),
        filters: vec![
            ("kind", Some(kind.as_str())),
            ("visibility", params.visibility.as_deref()),
            ("tier", params.tier.as_deref()),
        ],
        sort: None,
        page: params.page,
    }
    .apply(&mut query)?;

    let content = state.content().read().await;
    Ok(Json(ContentView {
        tab: kind.tab(),
        tabs: ContentKind::ALL
            .iter()
            .map(|kind| ContentTab {
                value: kind.tab(),
                label: tab_label(*kind),
            })
            .collect(),
        items: TableView {
            table: content_table_config(),
            query: QueryView::from(&*query),
            page: query.apply(content.list()).cloned(),
        },
    }))
}

/// Create a content item.
///
/// POST /content-control
#[instrument(skip(state, body), fields(kind = %body.kind))]
async fn create(
    State(state): State<AppState>,
    Json(body): Json<NewContent>,
) -> Result<(StatusCode, Json<ContentItem>), AppError> {
    let today = state.today();
    let mut content = state.content().write().await;
    let item = body
        .form
        .into_item(content.next_id(state.clock()), body.kind, &today)?;
    let item = content.insert(item)?.clone();
    info!(content_id = %item.id, "Content created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// Edit title, category, visibility and tier.
///
/// POST /content-control/{id}
#[instrument(skip(state, form))]
async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<ContentForm>,
) -> Result<Json<ContentItem>, AppError> {
    let today = state.today();
    let mut content = state.content().write().await;
    content
        .update(&ContentId::from(id), |item| {
            form.apply_to(item, &today).map(|()| item.clone())
        })?
        .map(Json)
        .map_err(AppError::from)
}

/// Show or hide an item.
///
/// POST /content-control/{id}/toggle-visibility
#[instrument(skip(state))]
async fn toggle_visibility(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ContentItem>, AppError> {
    let mut content = state.content().write().await;
    let item = content.update(&ContentId::from(id), |item| {
        item.visibility = item.visibility.toggled();
        item.clone()
    })?;
    info!(content_id = %item.id, visibility = %item.visibility, "Visibility toggled");
    Ok(Json(item))
}

/// Delete an item.
///
/// POST /content-control/{id}/delete
#[instrument(skip(state))]
async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let removed = state.content().write().await.remove(&ContentId::from(id))?;
    info!(content_id = %removed.id, "Content deleted");
    Ok(StatusCode::NO_CONTENT)
}
