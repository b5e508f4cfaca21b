//! Navigation menu for the signed-in role.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use tracing::instrument;

use pathway_core::{Role, Theme};

use crate::middleware::{CurrentIdentity, MenuItem, menu_items, visible_menu_items};
use crate::state::AppState;

/// Build the menu router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/menu", get(menu))
}

/// Shell view-model: who is signed in and what they can open.
#[derive(Debug, Clone, Serialize)]
pub struct MenuResponse {
    pub email: String,
    pub role: Role,
    pub theme: Theme,
    pub items: Vec<MenuItem>,
}

/// Menu entries visible to the current role.
///
/// GET /api/menu
#[instrument(skip(identity, state))]
async fn menu(
    CurrentIdentity(identity): CurrentIdentity,
    State(state): State<AppState>,
) -> Json<MenuResponse> {
    let theme = state.theme().read().await.theme();
    Json(MenuResponse {
        email: identity.email.to_string(),
        role: identity.role,
        theme,
        items: visible_menu_items(identity.role, &menu_items()),
    })
}
