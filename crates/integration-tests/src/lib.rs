//! Integration tests for the Pathway admin dashboard.
//!
//! Each test builds the full application (routes, access guard, tracing and
//! Sentry layers) in process and drives it with `tower::ServiceExt::oneshot`.
//! No server or network is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pathway-integration-tests
//! ```

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use tower::ServiceExt;

use pathway_admin::clock::FixedClock;
use pathway_admin::config::AdminConfig;
use pathway_admin::state::AppState;
use pathway_admin::storage::{KeyValueStore, MemoryStore};
use pathway_core::Role;

/// Instant every test app reports as "now".
#[must_use]
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 21, 9, 30, 0)
        .single()
        .expect("valid test timestamp")
}

/// An application under test plus the state behind it.
#[derive(Clone)]
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Parse the body as JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("response body is JSON")
    }

    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    /// A header as a string.
    #[must_use]
    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

/// Build an app over an empty in-memory store.
#[must_use]
pub fn test_app() -> TestApp {
    test_app_with_store(Arc::new(MemoryStore::new()))
}

/// Build an app over `store`, with the clock fixed at [`test_now`].
#[must_use]
pub fn test_app_with_store(store: Arc<dyn KeyValueStore>) -> TestApp {
    let state = AppState::new(
        AdminConfig::default(),
        store,
        Arc::new(FixedClock(test_now())),
    )
    .expect("seed data is valid");
    TestApp {
        router: pathway_admin::app(state.clone()),
        state,
    }
}

impl TestApp {
    /// Send a request and buffer the response.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body is readable");
        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
    }

    /// POST with no body.
    pub async fn post(&self, uri: &str) -> TestResponse {
        self.send(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
    }

    /// POST an `application/x-www-form-urlencoded` body.
    pub async fn post_form(&self, uri: &str, body: &str) -> TestResponse {
        self.send(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_owned()))
                .expect("valid request"),
        )
        .await
    }

    /// POST a JSON body.
    pub async fn post_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("valid request"),
        )
        .await
    }

    /// Sign in through the login form.
    pub async fn login(&self, email: &str, role: Role) -> TestResponse {
        self.post_form("/login", &format!("email={email}&role={role}"))
            .await
    }
}
