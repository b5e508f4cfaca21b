//! Read-only views: dashboard, analytics, settings and help.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::{Value, json};

use pathway_admin::storage::{KeyValueStore, MemoryStore, keys};
use pathway_core::Role;
use pathway_integration_tests::{TestApp, test_app, test_app_with_store};

async fn superadmin() -> TestApp {
    let app = test_app();
    app.login("admin@pathway.test", Role::SuperAdmin).await;
    app
}

fn stat(view: &Value, id: &str) -> u64 {
    view["stats"]
        .as_array()
        .unwrap()
        .iter()
        .find(|card| card["id"] == id)
        .and_then(|card| card["value"].as_u64())
        .unwrap()
}

#[tokio::test]
async fn test_dashboard_counts_follow_records() {
    let app = superadmin().await;

    let before = app.get("/dashboard?range=this_quarter").await.json();
    assert_eq!(before["range"], "this_quarter");
    assert_eq!(before["range_label"], "This Quarter");
    assert_eq!(stat(&before, "total_users"), 5);
    assert_eq!(stat(&before, "active_users"), 4);

    app.post_json(
        "/users",
        &json!({"name": "New", "email": "new@pathway.test", "tier": "Core", "status": "inactive"}),
    )
    .await;

    let after = app.get("/dashboard").await.json();
    assert_eq!(after["range"], "last_7_days");
    assert_eq!(stat(&after, "total_users"), 6);
    assert_eq!(stat(&after, "active_users"), 4);
}

#[tokio::test]
async fn test_analytics_charts() {
    let app = superadmin().await;

    let view = app.get("/analytics?range=last_30_days").await.json();
    assert_eq!(view["range"], "last_30_days");
    let charts = view["charts"].as_array().unwrap();
    assert_eq!(charts.len(), 5);
    assert_eq!(charts[0]["points"].as_array().unwrap().len(), 7);
    assert_eq!(charts[0]["points"][6]["value"], 1482);
}

#[tokio::test]
async fn test_settings_show_identity_and_masked_keys() {
    let app = superadmin().await;

    let view = app.get("/settings").await.json();
    assert_eq!(view["email"], "admin@pathway.test");
    assert_eq!(view["role"], "Super Admin");
    for key in view["api_keys"].as_array().unwrap() {
        assert!(key["masked"].as_str().unwrap().contains('•'));
    }
}

#[tokio::test]
async fn test_theme_toggle_is_persisted() {
    let store = Arc::new(MemoryStore::new());
    let app = test_app_with_store(store.clone());
    app.login("admin@pathway.test", Role::SuperAdmin).await;

    assert_eq!(app.get("/settings/theme").await.json()["theme"], "light");

    let toggled = app.post("/settings/theme?theme=toggle").await.json();
    assert_eq!(toggled["theme"], "dark");
    assert_eq!(store.get(keys::THEME).unwrap().as_deref(), Some("dark"));

    let set = app.post("/settings/theme?theme=light").await.json();
    assert_eq!(set["theme"], "light");

    assert_eq!(
        app.post("/settings/theme?theme=blue").await.status,
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn test_stored_theme_wins_at_startup() {
    let store = Arc::new(MemoryStore::with_entries([(keys::THEME, "dark")]));
    let app = test_app_with_store(store);
    app.login("admin@pathway.test", Role::SuperAdmin).await;

    assert_eq!(app.get("/api/menu").await.json()["theme"], "dark");
}

#[tokio::test]
async fn test_help_view() {
    let app = superadmin().await;

    let view = app.get("/help").await.json();
    assert_eq!(view["faqs"].as_array().unwrap().len(), 8);
    assert_eq!(view["contact_email"], "support@paramount-credit.com");
    assert_eq!(view["quick_links"][0]["path"], "/users");
}
