//! Paramount Credit Pathway admin dashboard library.
//!
//! Serves JSON view-models for the operator dashboard: users, analytics,
//! reports, content control, settings, help and the support desk. Records are
//! seeded in memory; only the signed-in identity and the theme survive a
//! restart, through a [`storage::KeyValueStore`].
//!
//! # Security
//!
//! Sign-in is a local role switch with no credential check. Bind to loopback
//! and keep it off shared networks.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod clock;
pub mod components;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;

use axum::Router;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::require_view_access;
use crate::state::AppState;

/// Build the full application: routes, access guard, tracing and Sentry.
pub fn app(state: AppState) -> Router {
    routes::routes()
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_view_access,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}
