use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use serde_json::Value;

use crate::AppState;
use crate::error::AppError;
use crate::use_cases::ReconcileNotification;
use crate::validation;
use crate::webhook_auth::{self, SIGNATURE_HEADER};

/// Provider-initiated payment notification. Deliveries are at-least-once
/// and unordered; the reconciler absorbs duplicates and conflicts, so a
/// 200 here only means the delivery was consumed.
#[utoipa::path(
    post,
    path = "/payment-webhook",
    responses(
        (status = 200, description = "Notification applied (or idempotently ignored)"),
        (status = 400, description = "Malformed notification envelope"),
        (status = 401, description = "Missing or invalid signature"),
        (status = 404, description = "Unknown transaction, delivery dropped"),
        (status = 500, description = "Store failure")
    ),
    tag = "Payments"
)]
pub async fn payment_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("missing webhook signature".to_string()))?;

    if !webhook_auth::verify_signature(&state.webhook_secret, &body, signature) {
        return Err(AppError::Unauthorized(
            "invalid webhook signature".to_string(),
        ));
    }

    let payload: Value = serde_json::from_slice(&body)
        .map_err(|_| AppError::Validation("notification body must be JSON".to_string()))?;
    let (preference_id, reported_status) = validation::decode_notification(&payload)?;

    ReconcileNotification::new(state.store.clone())
        .execute(&preference_id, &reported_status)
        .await?;

    Ok(StatusCode::OK)
}
