//! HTTP middleware for the dashboard.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (`http_request` span with status and latency)
//! 3. View guard ([`auth::require_view_access`])

pub mod auth;

pub use auth::{
    AccessDecision, CurrentIdentity, MenuItem, View, authorize, menu_items, require_view_access,
    visible_for, visible_menu_items,
};
