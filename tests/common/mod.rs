#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::Request,
    response::Response,
};
use rust_decimal::Decimal;
use std::sync::Arc;

use payrelay_core::adapters::InMemoryTransactionStore;
use payrelay_core::domain::{OrderItem, Transaction, TransactionStatus};
use payrelay_core::mercadopago::PreferenceClient;
use payrelay_core::ports::{StoreError, StoreResult, TransactionStore};
use payrelay_core::webhook_auth;
use payrelay_core::{AppState, create_app};

pub const TEST_SECRET: &str = "test-webhook-secret";
pub const NOTIFICATION_URL: &str = "https://relay.example.com/payment-webhook";

/// Builds the router against an in-memory store and the given provider
/// base URL (normally a mockito server).
pub fn app(provider_url: &str, store: Arc<dyn TransactionStore>) -> Router {
    let state = AppState {
        store,
        payments: PreferenceClient::new(provider_url.to_string(), "TEST-TOKEN".to_string()),
        notification_url: NOTIFICATION_URL.to_string(),
        webhook_secret: TEST_SECRET.to_string(),
    };
    create_app(state)
}

pub fn memory_store() -> Arc<InMemoryTransactionStore> {
    Arc::new(InMemoryTransactionStore::new())
}

pub fn soda_items() -> Vec<OrderItem> {
    vec![OrderItem {
        name: "Soda".to_string(),
        quantity: 2,
        price: Decimal::from(15),
    }]
}

pub fn pending_tx(id: &str, machine_id: &str) -> Transaction {
    Transaction::new(id.to_string(), machine_id.to_string(), soda_items())
}

pub fn json_post(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Webhook delivery signed the way the provider is configured to sign:
/// hex HMAC-SHA256 of the raw body in `x-signature`.
pub fn signed_webhook(body: &serde_json::Value) -> Request<Body> {
    let raw = body.to_string();
    let signature = webhook_auth::sign(TEST_SECRET, raw.as_bytes());
    Request::builder()
        .method("POST")
        .uri("/payment-webhook")
        .header("content-type", "application/json")
        .header("x-signature", signature)
        .body(Body::from(raw))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Store whose writes always fail; reads behave as an empty store. Used to
/// exercise the orphaned-preference gap.
pub struct FailingStore;

#[async_trait]
impl TransactionStore for FailingStore {
    async fn insert(&self, _tx: &Transaction) -> StoreResult<()> {
        Err(StoreError::Backend("write refused".to_string()))
    }

    async fn get(&self, _id: &str) -> StoreResult<Option<Transaction>> {
        Ok(None)
    }

    async fn update_status(&self, id: &str, _status: TransactionStatus) -> StoreResult<()> {
        Err(StoreError::NotFound(id.to_string()))
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
