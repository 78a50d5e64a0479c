pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod mercadopago;
pub mod ports;
pub mod use_cases;
pub mod validation;
pub mod webhook_auth;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::mercadopago::PreferenceClient;
use crate::ports::TransactionStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TransactionStore>,
    pub payments: PreferenceClient,
    pub notification_url: String,
    pub webhook_secret: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::root,
        handlers::health,
        handlers::payments::create_payment,
        handlers::webhook::payment_webhook,
        handlers::status::transaction_status,
    ),
    components(schemas(
        handlers::HealthStatus,
        handlers::payments::CreatePaymentRequest,
        handlers::payments::PaymentCreatedResponse,
        handlers::status::TransactionView,
        domain::OrderItem,
        domain::TransactionStatus,
    )),
    tags(
        (name = "Payments", description = "Payment initiation and confirmation"),
        (name = "Health", description = "Liveness and store connectivity")
    )
)]
pub struct ApiDoc;

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/create-payment", post(handlers::payments::create_payment))
        .route("/payment-webhook", post(handlers::webhook::payment_webhook))
        .route(
            "/transaction-status/:transaction_id",
            get(handlers::status::transaction_status),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
