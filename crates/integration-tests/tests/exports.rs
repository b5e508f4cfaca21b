//! CSV downloads from the table views and the analytics export dialog.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::{StatusCode, header};
use serde_json::json;

use pathway_core::Role;
use pathway_integration_tests::{TestApp, test_app};

async fn signed_in(role: Role) -> TestApp {
    let app = test_app();
    app.login("ops@pathway.test", role).await;
    app
}

fn parse(body: &str) -> Vec<Vec<String>> {
    csv::Reader::from_reader(body.as_bytes())
        .records()
        .map(|record| record.unwrap().iter().map(str::to_owned).collect())
        .collect()
}

#[tokio::test]
async fn test_users_export_headers() {
    let app = signed_in(Role::SuperAdmin).await;

    let resp = app.get("/users/export?range=this_month").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(
        resp.header(header::CONTENT_TYPE),
        Some("text/csv; charset=utf-8")
    );
    assert_eq!(
        resp.header(header::CONTENT_DISPOSITION),
        Some("attachment; filename=\"users-this_month-2024-05-21T09-30-00-000Z.csv\"")
    );
    assert!(
        resp.body
            .starts_with("id,name,email,tier,status,dateJoined,lastActivity,phone,address\n")
    );
}

#[tokio::test]
async fn test_export_covers_every_filtered_row() {
    let app = signed_in(Role::SuperAdmin).await;
    for n in 0..7 {
        app.post_json(
            "/users",
            &json!({
                "name": format!("Bulk {n}"),
                "email": format!("bulk{n}@pathway.test"),
                "tier": "Core",
                "status": "active",
            }),
        )
        .await;
    }

    // The visible page holds 5 rows; the export holds the whole filtered set
    let resp = app.get("/users/export?tier=Core").await;
    let rows = parse(&resp.body);
    assert_eq!(rows.len(), 8);
    assert!(rows.iter().all(|row| row.get(3).map(String::as_str) == Some("Core")));
}

#[tokio::test]
async fn test_ticket_export_quotes_embedded_commas() {
    let app = signed_in(Role::Support).await;
    app.post_json(
        "/support",
        &json!({"subject": "Hello, \"World\"", "user": "sam@x.com", "message": "line one"}),
    )
    .await;

    let resp = app.get("/support/export?search=hello").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(r#""Hello, ""World""""#));
    assert!(
        resp.header(header::CONTENT_DISPOSITION)
            .unwrap()
            .contains("support-tickets-last_30_days-")
    );

    let rows = parse(&resp.body);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][1], "Hello, \"World\"");
    assert_eq!(rows[0][2], "sam@x.com");
}

#[tokio::test]
async fn test_support_cannot_export_users() {
    let app = signed_in(Role::Support).await;

    let resp = app.get("/users/export").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/dashboard"));
}

#[tokio::test]
async fn test_journey_export_uses_journey_columns() {
    let app = signed_in(Role::SuperAdmin).await;

    let resp = app.get("/reports/export").await;
    assert!(
        resp.body
            .starts_with("id,name,email,plan,stage,progress,lastUpdated\n")
    );
    assert!(
        resp.header(header::CONTENT_DISPOSITION)
            .unwrap()
            .contains("journeys-last_7_days-")
    );
}

#[tokio::test]
async fn test_analytics_export_selected_datasets() {
    let app = signed_in(Role::SuperAdmin).await;

    let resp = app
        .post_json(
            "/analytics/export",
            &json!({
                "format": "csv",
                "range": "last_30_days",
                "datasets": {"users": true, "disputes": false, "content": false},
            }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(
        resp.body,
        "dataset,id,label,value\n\
         users,u_1,Total Users,1420\n\
         users,u_2,Active Users,893\n\
         ,,range,last_30_days\n"
    );
    assert!(
        resp.header(header::CONTENT_DISPOSITION)
            .unwrap()
            .contains("analytics-export-last_30_days-")
    );
}

#[tokio::test]
async fn test_analytics_pdf_is_rejected() {
    let app = signed_in(Role::SuperAdmin).await;

    let resp = app
        .post_json("/analytics/export", &json!({"format": "pdf"}))
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.body.contains("pdf export is not supported"));
}

#[tokio::test]
async fn test_analytics_export_validates_email() {
    let app = signed_in(Role::SuperAdmin).await;

    let too_long = format!("{}@pathway.test", "a".repeat(300));
    let resp = app
        .post_json("/analytics/export", &json!({"email": too_long}))
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let resp = app
        .post_json("/analytics/export", &json!({"email": "ops@pathway.test"}))
        .await;
    assert_eq!(resp.status, StatusCode::OK);
}
