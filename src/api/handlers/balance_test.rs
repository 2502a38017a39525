//! Integration tests for the balance endpoint.

use axum::http::StatusCode;
use serde_json::json;

use super::transactions_test::{create, json_body, send, test_app};

#[tokio::test]
async fn balance_on_empty_store_is_all_zeros() {
    let app = test_app().await;

    let response = send(&app, "GET", "/balance").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({"totalIncome": 0.0, "totalExpense": 0.0, "balance": 0.0})
    );
}

#[tokio::test]
async fn balance_sums_amounts_per_kind() {
    let app = test_app().await;

    create(
        &app,
        json!({"type": "income", "category": "salary", "amount": 100.0, "date": "2024-03-01"}),
    )
    .await;
    create(
        &app,
        json!({"type": "expense", "category": "food", "amount": 40.0, "date": "2024-03-02"}),
    )
    .await;

    let response = send(&app, "GET", "/balance").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["totalIncome"], json!(100.0));
    assert_eq!(body["totalExpense"], json!(40.0));
    assert_eq!(body["balance"], json!(60.0));
}

#[tokio::test]
async fn balance_respects_the_date_window() {
    let app = test_app().await;

    create(
        &app,
        json!({"type": "income", "category": "salary", "amount": 100.0, "date": "2024-03-01"}),
    )
    .await;
    // Mid-day timestamp on the upper-bound day still counts
    create(
        &app,
        json!({"type": "expense", "category": "food", "amount": 40.0, "date": "2024-03-02T10:00:00Z"}),
    )
    .await;
    create(
        &app,
        json!({"type": "expense", "category": "rent", "amount": 800.0, "date": "2024-04-01"}),
    )
    .await;

    let response = send(&app, "GET", "/balance?dateFrom=2024-03-01&dateTo=2024-03-02").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["totalIncome"], json!(100.0));
    assert_eq!(body["totalExpense"], json!(40.0));
    assert_eq!(body["balance"], json!(60.0));

    // Window covering only the income
    let response = send(&app, "GET", "/balance?dateTo=2024-03-01").await;
    let body = json_body(response).await;
    assert_eq!(body["totalIncome"], json!(100.0));
    assert_eq!(body["totalExpense"], json!(0.0));
    assert_eq!(body["balance"], json!(100.0));
}

#[tokio::test]
async fn balance_rejects_unparsable_dates() {
    let app = test_app().await;

    let response = send(&app, "GET", "/balance?dateFrom=not-a-date").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(response).await["error"].is_string());
}
