use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::AppState;
use crate::domain::OrderItem;
use crate::error::AppError;
use crate::use_cases::CreatePayment;
use crate::validation;

/// Accepted request shape. Decoding is done by hand in the handler so any
/// malformed body maps to a 400 instead of a framework rejection.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct CreatePaymentRequest {
    pub machine_id: String,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentCreatedResponse {
    pub payment_url: String,
    pub qr_data: String,
}

#[utoipa::path(
    post,
    path = "/create-payment",
    request_body = CreatePaymentRequest,
    responses(
        (status = 200, description = "Preference created, transaction pending", body = PaymentCreatedResponse),
        (status = 400, description = "Malformed order"),
        (status = 401, description = "Provider rejected credentials"),
        (status = 500, description = "Provider or store failure")
    ),
    tag = "Payments"
)]
pub async fn create_payment(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let (machine_id, items) = validation::decode_create_payment(&payload)?;

    let created = CreatePayment::new(
        state.payments.clone(),
        state.store.clone(),
        state.notification_url.clone(),
    )
    .execute(machine_id, items)
    .await?;

    Ok(Json(PaymentCreatedResponse {
        payment_url: created.payment_url,
        qr_data: created.qr_data,
    }))
}
