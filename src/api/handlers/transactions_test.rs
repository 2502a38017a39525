//! Integration tests for the transaction endpoints.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::api::{AppState, routes};
use crate::db::{Database, SqliteDatabase};

/// Create a test app with an in-memory database
pub(super) async fn test_app() -> axum::Router {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    routes::create_router(AppState::new(db))
}

/// Helper to parse JSON response body
pub(super) async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub(super) async fn send_json(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: &Value,
) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub(super) async fn send(app: &axum::Router, method: &str, uri: &str) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Create a transaction and return its id
pub(super) async fn create(app: &axum::Router, body: Value) -> String {
    let response = send_json(app, "POST", "/transactions", &body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn root_returns_liveness_marker() {
    let app = test_app().await;
    let response = send(&app, "GET", "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(json_body(response).await["msg"].is_string());
}

#[tokio::test]
async fn create_returns_stored_record_with_id_and_timestamps() {
    let app = test_app().await;

    let response = send_json(
        &app,
        "POST",
        "/transactions",
        &json!({
            "type": "INCOME",
            "category": "salary",
            "amount": 1500.0,
            "date": "2024-03-01",
            "description": "  march pay  "
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert!(body["id"].is_string());
    // Kind is normalized to lowercase, description trimmed
    assert_eq!(body["type"], "income");
    assert_eq!(body["category"], "salary");
    assert_eq!(body["amount"], json!(1500.0));
    assert_eq!(body["description"], "march pay");
    assert!(body["createdAt"].is_string());
    assert!(body["updatedAt"].is_string());
}

#[tokio::test]
async fn create_rejects_invalid_payloads() {
    let app = test_app().await;

    let cases = [
        json!({"type": "income", "category": "salary", "amount": 0.0, "date": "2024-03-01"}),
        json!({"type": "income", "category": "salary", "amount": -5.0, "date": "2024-03-01"}),
        json!({"type": "income", "category": "a", "amount": 10.0, "date": "2024-03-01"}),
        json!({"type": "transfer", "category": "salary", "amount": 10.0, "date": "2024-03-01"}),
        json!({"type": "income", "category": "salary", "amount": 10.0, "date": "not-a-date"}),
        json!({
            "type": "income",
            "category": "salary",
            "amount": 10.0,
            "date": "2024-03-01",
            "description": "x".repeat(201)
        }),
    ];

    for case in cases {
        let response = send_json(&app, "POST", "/transactions", &case).await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "payload should be rejected: {}",
            case
        );
        assert!(json_body(response).await["error"].is_string());
    }
}

#[tokio::test]
async fn create_rejects_structurally_malformed_bodies_with_json_error() {
    let app = test_app().await;

    // Missing required field
    let response = send_json(
        &app,
        "POST",
        "/transactions",
        &json!({"type": "income", "category": "salary", "date": "2024-03-01"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(response).await["error"].is_string());

    // Wrong JSON type for a field
    let response = send_json(
        &app,
        "POST",
        "/transactions",
        &json!({"type": "income", "category": "salary", "amount": "ten", "date": "2024-03-01"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(response).await["error"].is_string());

    // Unparsable body
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/transactions")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(response).await["error"].is_string());
}

#[tokio::test]
async fn list_returns_everything_newest_date_first() {
    let app = test_app().await;

    create(
        &app,
        json!({"type": "income", "category": "salary", "amount": 100.0, "date": "2024-03-01"}),
    )
    .await;
    create(
        &app,
        json!({"type": "expense", "category": "food", "amount": 20.0, "date": "2024-03-03"}),
    )
    .await;
    create(
        &app,
        json!({"type": "expense", "category": "rent", "amount": 800.0, "date": "2024-03-02"}),
    )
    .await;

    let response = send(&app, "GET", "/transactions").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let categories: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|tx| tx["category"].as_str().unwrap())
        .collect();
    assert_eq!(categories, vec!["food", "rent", "salary"]);
}

#[tokio::test]
async fn list_filters_by_kind_case_insensitively_and_category() {
    let app = test_app().await;

    create(
        &app,
        json!({"type": "income", "category": "salary", "amount": 100.0, "date": "2024-03-01"}),
    )
    .await;
    create(
        &app,
        json!({"type": "expense", "category": "food", "amount": 20.0, "date": "2024-03-02"}),
    )
    .await;

    let response = send(&app, "GET", "/transactions?type=INCOME").await;
    let body = json_body(response).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["type"], "income");

    let response = send(&app, "GET", "/transactions?category=food").await;
    let body = json_body(response).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["category"], "food");

    // Unknown type value is rejected, not ignored
    let response = send(&app, "GET", "/transactions?type=transfer").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_treats_empty_query_values_as_no_filter() {
    let app = test_app().await;

    create(
        &app,
        json!({"type": "income", "category": "salary", "amount": 100.0, "date": "2024-03-01"}),
    )
    .await;
    create(
        &app,
        json!({"type": "expense", "category": "food", "amount": 20.0, "date": "2024-03-02"}),
    )
    .await;

    let response = send(
        &app,
        "GET",
        "/transactions?type=&category=&dateFrom=&dateTo=",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn list_date_range_is_inclusive_with_end_of_day_upper_bound() {
    let app = test_app().await;

    create(
        &app,
        json!({"type": "income", "category": "salary", "amount": 100.0, "date": "2024-03-01"}),
    )
    .await;
    // Mid-day timestamp on the upper-bound day must still match
    create(
        &app,
        json!({"type": "expense", "category": "food", "amount": 20.0, "date": "2024-03-02T10:00:00Z"}),
    )
    .await;
    create(
        &app,
        json!({"type": "expense", "category": "rent", "amount": 800.0, "date": "2024-03-03"}),
    )
    .await;

    let response = send(
        &app,
        "GET",
        "/transactions?dateFrom=2024-03-01&dateTo=2024-03-02",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let categories: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|tx| tx["category"].as_str().unwrap())
        .collect();
    assert_eq!(categories, vec!["food", "salary"]);

    let response = send(&app, "GET", "/transactions?dateFrom=not-a-date").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_distinguishes_malformed_and_unknown_ids() {
    let app = test_app().await;

    let response = send(&app, "GET", "/transactions/not-a-uuid").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(
        &app,
        "GET",
        "/transactions/00000000-0000-4000-8000-000000000000",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_returns_created_record() {
    let app = test_app().await;
    let id = create(
        &app,
        json!({"type": "income", "category": "salary", "amount": 100.0, "date": "2024-03-01"}),
    )
    .await;

    let response = send(&app, "GET", &format!("/transactions/{}", id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["category"], "salary");
}

#[tokio::test]
async fn update_is_a_full_replace() {
    let app = test_app().await;
    let id = create(
        &app,
        json!({
            "type": "expense",
            "category": "food",
            "amount": 20.0,
            "date": "2024-03-02",
            "description": "weekly shop"
        }),
    )
    .await;

    let fetched = json_body(send(&app, "GET", &format!("/transactions/{}", id)).await).await;
    let created_at = fetched["createdAt"].as_str().unwrap().to_string();

    // Omitted description reverts to the empty default, nothing is merged.
    let response = send_json(
        &app,
        "PUT",
        &format!("/transactions/{}", id),
        &json!({"type": "income", "category": "refund", "amount": 5.0, "date": "2024-03-03"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["type"], "income");
    assert_eq!(body["category"], "refund");
    assert_eq!(body["description"], "");
    assert_eq!(body["createdAt"], created_at.as_str());
}

#[tokio::test]
async fn update_error_statuses() {
    let app = test_app().await;
    let valid = json!({"type": "income", "category": "salary", "amount": 5.0, "date": "2024-03-03"});

    let response = send_json(&app, "PUT", "/transactions/not-a-uuid", &valid).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send_json(
        &app,
        "PUT",
        "/transactions/00000000-0000-4000-8000-000000000000",
        &valid,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Validation re-runs on update
    let id = create(&app, valid.clone()).await;
    let response = send_json(
        &app,
        "PUT",
        &format!("/transactions/{}", id),
        &json!({"type": "income", "category": "salary", "amount": 0.0, "date": "2024-03-03"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// Drives the router from a spawned task, which requires every handler
// future to be Send. This fails to compile if a repository accessor loses
// its Send + Sync bound.
#[tokio::test]
async fn requests_can_be_served_from_spawned_tasks() {
    let app = test_app().await;
    create(
        &app,
        json!({"type": "income", "category": "salary", "amount": 100.0, "date": "2024-03-01"}),
    )
    .await;

    let handle = tokio::spawn(async move {
        let response = send(&app, "GET", "/transactions").await;
        assert_eq!(response.status(), StatusCode::OK);
        json_body(response).await
    });
    let body = handle.await.unwrap();
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn delete_acknowledges_then_get_returns_not_found() {
    let app = test_app().await;
    let id = create(
        &app,
        json!({"type": "expense", "category": "food", "amount": 20.0, "date": "2024-03-02"}),
    )
    .await;

    let response = send(&app, "DELETE", &format!("/transactions/{}", id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"ok": true}));

    let response = send(&app, "GET", &format!("/transactions/{}", id)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, "DELETE", &format!("/transactions/{}", id)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, "DELETE", "/transactions/not-a-uuid").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
