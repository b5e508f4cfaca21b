//! Table views: filtering, search, sorting, pagination and record edits.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use serde_json::{Value, json};

use pathway_core::Role;
use pathway_integration_tests::{TestApp, test_app};

async fn superadmin() -> TestApp {
    let app = test_app();
    app.login("admin@pathway.test", Role::SuperAdmin).await;
    app
}

fn rows(view: &Value) -> &Vec<Value> {
    view["rows"].as_array().unwrap()
}

fn new_user(n: usize) -> Value {
    json!({
        "name": format!("Extra User {n}"),
        "email": format!("extra{n}@pathway.test"),
        "tier": "Core",
        "status": "active",
    })
}

#[tokio::test]
async fn test_tier_filter_keeps_matching_users() {
    let app = superadmin().await;

    let view = app.get("/users?tier=Pro").await.json();
    assert_eq!(view["total"], 2);
    assert!(rows(&view).iter().all(|user| user["tier"] == "Pro"));
    assert_eq!(view["query"]["filters"]["tier"], "Pro");
}

#[tokio::test]
async fn test_query_state_is_kept_between_requests() {
    let app = superadmin().await;

    app.get("/users?status=inactive").await;
    let view = app.get("/users").await.json();
    assert_eq!(view["total"], 1);
    assert_eq!(rows(&view)[0]["status"], "inactive");

    let cleared = app.get("/users?status=all").await.json();
    assert_eq!(cleared["total"], 5);
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let app = superadmin().await;

    let view = app.get("/users?search=JANE").await.json();
    assert_eq!(view["total"], 1);
    assert_eq!(rows(&view)[0]["email"], "jane.smith@email.com");
}

#[tokio::test]
async fn test_pagination_clamps_to_last_page() {
    let app = superadmin().await;
    for n in 0..7 {
        let resp = app.post_json("/users", &new_user(n)).await;
        assert_eq!(resp.status, StatusCode::CREATED);
    }

    let view = app.get("/users?page=3").await.json();
    assert_eq!(view["total"], 12);
    assert_eq!(view["page_size"], 5);
    assert_eq!(view["total_pages"], 3);
    assert_eq!(view["page"], 3);
    assert_eq!(rows(&view).len(), 2);
    assert_eq!(view["range_start"], 11);
    assert_eq!(view["range_end"], 12);

    let past_end = app.get("/users?page=9").await.json();
    assert_eq!(past_end["page"], 3);
}

#[tokio::test]
async fn test_filter_change_returns_to_first_page() {
    let app = superadmin().await;
    for n in 0..7 {
        app.post_json("/users", &new_user(n)).await;
    }
    app.get("/users?page=3").await;

    let view = app.get("/users?tier=Core&page=3").await.json();
    assert_eq!(view["page"], 1);
}

#[tokio::test]
async fn test_sort_orders_most_recent_first() {
    let app = superadmin().await;

    let view = app.get("/users?sort=last_activity").await.json();
    let dates: Vec<_> = rows(&view)
        .iter()
        .map(|user| user["lastActivity"].as_str().unwrap().to_owned())
        .collect();
    let mut sorted = dates.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(dates, sorted);
    assert_eq!(view["query"]["sort"], "last_activity");
}

#[tokio::test]
async fn test_unknown_sort_is_rejected() {
    let app = superadmin().await;
    assert_eq!(app.get("/users?sort=name").await.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_user_lifecycle() {
    let app = superadmin().await;

    let created = app.post_json("/users", &new_user(1)).await;
    assert_eq!(created.status, StatusCode::CREATED);
    let user = created.json();
    let id = user["id"].as_str().unwrap().to_owned();
    assert_eq!(user["dateJoined"], "2024-05-21");

    let toggled = app.post(&format!("/users/{id}/toggle-status")).await.json();
    assert_eq!(toggled["status"], "inactive");

    let mut edit = new_user(1);
    edit["name"] = json!("Renamed");
    let edited = app.post_json(&format!("/users/{id}"), &edit).await.json();
    assert_eq!(edited["name"], "Renamed");
    assert_eq!(edited["dateJoined"], "2024-05-21");

    let deleted = app.post(&format!("/users/{id}/delete")).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    let again = app.post(&format!("/users/{id}/delete")).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_form_requires_name_and_email() {
    let app = superadmin().await;

    let resp = app
        .post_json("/users", &json!({"name": " ", "email": "", "tier": "Core", "status": "active"}))
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body, "Name and email are required.");
}

#[tokio::test]
async fn test_journeys_filter_by_stage() {
    let app = superadmin().await;

    let all = app.get("/reports").await.json();
    assert_eq!(all["content"]["kind"], "journeys");
    let stage = rows(&all["content"])[0]["stage"].as_str().unwrap().to_owned();

    let filtered = app
        .get(&format!("/reports?stage={}", stage.replace(' ', "%20")))
        .await
        .json();
    assert!(rows(&filtered["content"]).iter().all(|j| j["stage"] == stage.as_str()));
}

#[tokio::test]
async fn test_reports_static_tabs() {
    let app = superadmin().await;

    let disputes = app.get("/reports?tab=disputes").await.json();
    assert_eq!(disputes["content"]["rows"].as_array().unwrap().len(), 3);

    let mail = app.get("/reports?tab=mail").await.json();
    assert_eq!(mail["content"]["kind"], "card");
}

#[tokio::test]
async fn test_support_agent_replies_to_ticket() {
    let app = test_app();
    app.login("agent@pathway.test", Role::Support).await;

    let created = app
        .post_json("/support", &json!({"subject": "Cannot log in", "user": "sam@x.com"}))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let ticket = created.json();
    assert_eq!(ticket["status"], "open");
    let id = ticket["id"].as_str().unwrap().to_owned();

    let replied = app
        .post_json(&format!("/support/{id}/reply"), &json!({"text": "Reset sent"}))
        .await
        .json();
    let messages = replied["messages"].as_array().unwrap();
    assert_eq!(messages.last().unwrap()["text"], "Reset sent");
    assert_eq!(replied["lastUpdated"], "2024-05-21");

    let blank = app
        .post_json(&format!("/support/{id}/reply"), &json!({"text": "  "}))
        .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);

    let open = app.get("/support?status=open").await.json();
    assert!(rows(&open).iter().all(|t| t["status"] == "open"));
    assert_eq!(open["range"], "last_30_days");
}

#[tokio::test]
async fn test_content_tabs_filter_by_kind() {
    let app = superadmin().await;

    let videos = app.get("/content-control?tab=videos").await.json();
    assert_eq!(videos["tab"], "videos");
    assert!(rows(&videos).iter().all(|item| item["kind"] == "video"));

    assert_eq!(
        app.get("/content-control?tab=podcasts").await.status,
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn test_content_visibility_toggle() {
    let app = superadmin().await;

    let created = app
        .post_json(
            "/content-control",
            &json!({"kind": "lesson", "title": "Budgeting", "category": "Basics", "tier": "free"}),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let item = created.json();
    let id = item["id"].as_str().unwrap().to_owned();
    let before = item["visibility"].as_str().unwrap().to_owned();

    let toggled = app
        .post(&format!("/content-control/{id}/toggle-visibility"))
        .await
        .json();
    assert_ne!(toggled["visibility"].as_str().unwrap(), before);

    let lessons = app.get("/content-control?tab=lessons").await.json();
    assert!(rows(&lessons).iter().any(|row| row["id"] == id.as_str()));
}
