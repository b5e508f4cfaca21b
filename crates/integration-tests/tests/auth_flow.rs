//! Sign-in, sign-out and role-gated navigation through the full router.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use axum::http::StatusCode;
use pathway_admin::storage::{FileStore, KeyValueStore, MemoryStore, keys};
use pathway_core::Role;
use pathway_integration_tests::{test_app, test_app_with_store};

#[tokio::test]
async fn test_signed_out_views_redirect_to_login() {
    let app = test_app();

    for path in ["/dashboard", "/users", "/support", "/settings", "/help"] {
        let resp = app.get(path).await;
        assert_eq!(resp.status, StatusCode::SEE_OTHER, "{path}");
        assert_eq!(resp.location(), Some("/login"), "{path}");
    }
}

#[tokio::test]
async fn test_login_view_is_public() {
    let app = test_app();

    let resp = app.get("/login").await;
    assert_eq!(resp.status, StatusCode::OK);
    let roles = resp.json()["roles"].as_array().unwrap().len();
    assert_eq!(roles, 2);
}

#[tokio::test]
async fn test_superadmin_login_lands_on_dashboard() {
    let app = test_app();

    let resp = app.login("admin@pathway.test", Role::SuperAdmin).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/dashboard"));

    assert_eq!(app.get("/users").await.status, StatusCode::OK);
    assert_eq!(app.get("/support").await.status, StatusCode::OK);

    // Already signed in: the login view steps aside
    assert_eq!(app.get("/login").await.location(), Some("/dashboard"));
}

#[tokio::test]
async fn test_support_role_is_limited_to_support_views() {
    let app = test_app();

    let resp = app.login("alice@x.com", Role::Support).await;
    assert_eq!(resp.location(), Some("/support"));

    let users = app.get("/users").await;
    assert_eq!(users.status, StatusCode::SEE_OTHER);
    assert_eq!(users.location(), Some("/dashboard"));

    assert_eq!(app.get("/support").await.status, StatusCode::OK);
    assert_eq!(app.get("/dashboard").await.status, StatusCode::OK);

    for path in ["/analytics", "/reports", "/content-control", "/settings", "/help"] {
        assert_eq!(app.get(path).await.location(), Some("/dashboard"), "{path}");
    }
}

#[tokio::test]
async fn test_logout_revokes_access() {
    let app = test_app();
    app.login("alice@x.com", Role::SuperAdmin).await;

    let resp = app.post("/logout").await;
    assert_eq!(resp.location(), Some("/login"));

    assert_eq!(app.get("/dashboard").await.location(), Some("/login"));

    // Idempotent
    assert_eq!(app.post("/logout").await.location(), Some("/login"));
}

#[tokio::test]
async fn test_blank_email_is_rejected() {
    let app = test_app();

    let resp = app.post_form("/login", "email=%20%20&role=superadmin").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.body.contains("Please enter your email."));
    assert_eq!(app.get("/dashboard").await.location(), Some("/login"));
}

#[tokio::test]
async fn test_login_persists_identity() {
    let store = Arc::new(MemoryStore::new());
    let app = test_app_with_store(store.clone());

    app.login("alice@x.com", Role::Support).await;
    assert_eq!(
        store.get(keys::USER).unwrap().as_deref(),
        Some(r#"{"email":"alice@x.com","role":"support"}"#)
    );

    app.post("/logout").await;
    assert_eq!(store.get(keys::USER).unwrap(), None);
}

#[tokio::test]
async fn test_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let first = test_app_with_store(Arc::new(FileStore::in_dir(dir.path())));
    first.login("ops@pathway.test", Role::SuperAdmin).await;

    let second = test_app_with_store(Arc::new(FileStore::in_dir(dir.path())));
    assert_eq!(second.get("/users").await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_corrupt_stored_identity_means_signed_out() {
    let store = Arc::new(MemoryStore::with_entries([(keys::USER, "{not json")]));
    let app = test_app_with_store(store);

    assert_eq!(app.get("/dashboard").await.location(), Some("/login"));
}

#[tokio::test]
async fn test_profile_update_changes_email() {
    let app = test_app();
    assert_eq!(
        app.post_form("/profile", "email=new%40pathway.test").await.status,
        StatusCode::UNAUTHORIZED
    );

    app.login("old@pathway.test", Role::SuperAdmin).await;
    let resp = app.post_form("/profile", "email=new%40pathway.test").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json()["email"], "new@pathway.test");

    let menu = app.get("/api/menu").await.json();
    assert_eq!(menu["email"], "new@pathway.test");
}

#[tokio::test]
async fn test_api_requires_sign_in() {
    let app = test_app();
    assert_eq!(app.get("/api/menu").await.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_menu_matches_role() {
    let app = test_app();

    app.login("alice@x.com", Role::Support).await;
    let menu = app.get("/api/menu").await.json();
    let paths: Vec<_> = menu["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["path"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(paths, ["/dashboard", "/support"]);

    // Every listed entry can actually be opened
    for path in &paths {
        assert_eq!(app.get(path).await.status, StatusCode::OK, "{path}");
    }
}

#[tokio::test]
async fn test_unknown_paths_fall_back_to_dashboard() {
    let app = test_app();

    let resp = app.get("/does-not-exist").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/dashboard"));
}

#[tokio::test]
async fn test_health_is_open() {
    let app = test_app();

    let resp = app.get("/health").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, "ok");
}
