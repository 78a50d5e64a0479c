use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::AppState;
use crate::domain::{OrderItem, Transaction, TransactionStatus};
use crate::error::AppError;

/// Exactly the stored record: `machine_id`, `status`, `items`. Store
/// bookkeeping (timestamps) is deliberately not exposed.
#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionView {
    pub machine_id: String,
    pub status: TransactionStatus,
    pub items: Vec<OrderItem>,
}

impl From<Transaction> for TransactionView {
    fn from(tx: Transaction) -> Self {
        Self {
            machine_id: tx.machine_id,
            status: tx.status,
            items: tx.items,
        }
    }
}

#[utoipa::path(
    get,
    path = "/transaction-status/{transaction_id}",
    params(
        ("transaction_id" = String, Path, description = "Provider preference id")
    ),
    responses(
        (status = 200, description = "Current transaction record", body = TransactionView),
        (status = 404, description = "Unknown transaction")
    ),
    tag = "Payments"
)]
pub async fn transaction_status(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
) -> Result<Json<TransactionView>, AppError> {
    let tx = state
        .store
        .get(&transaction_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Transaction {transaction_id} not found")))?;

    Ok(Json(tx.into()))
}
