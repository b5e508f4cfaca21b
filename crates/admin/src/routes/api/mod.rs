//! JSON API endpoints consumed by the dashboard shell.
//!
//! Everything under `/api/` needs a signed-in identity; the guard answers
//! `401` instead of redirecting.

pub mod menu;

use axum::Router;

use crate::state::AppState;

/// Build the complete API router.
pub fn router() -> Router<AppState> {
    Router::new().merge(menu::router())
}
