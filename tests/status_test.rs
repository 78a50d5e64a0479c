mod common;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use payrelay_core::domain::TransactionStatus;
use payrelay_core::ports::TransactionStore;

#[tokio::test]
async fn status_returns_exactly_the_stored_record() {
    let store = common::memory_store();
    store.insert(&common::pending_tx("PREF123", "M1")).await.unwrap();
    let app = common::app("http://unused.invalid", store);

    let response = app
        .oneshot(common::get("/transaction-status/PREF123"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(
        body,
        json!({
            "machine_id": "M1",
            "status": "pending",
            "items": [{"name": "Soda", "quantity": 2, "price": 15.0}]
        })
    );
    // No extraneous fields beyond the persisted record shape.
    assert_eq!(body.as_object().unwrap().len(), 3);
}

#[tokio::test]
async fn status_reflects_settled_transactions() {
    let store = common::memory_store();
    store.insert(&common::pending_tx("PREF123", "M1")).await.unwrap();
    store
        .update_status("PREF123", TransactionStatus::Paid)
        .await
        .unwrap();
    let app = common::app("http://unused.invalid", store);

    let response = app
        .oneshot(common::get("/transaction-status/PREF123"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["status"], "paid");
}

#[tokio::test]
async fn absent_transaction_is_a_clean_404() {
    let app = common::app("http://unused.invalid", common::memory_store());

    let response = app
        .oneshot(common::get("/transaction-status/UNKNOWN"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = common::body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("not found"));
}
