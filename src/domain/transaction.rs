//! Transaction domain entity and its status lifecycle.
//! Framework-agnostic; the store and handlers depend on this, never the
//! other way around.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Lifecycle of a transaction. `Pending` is the sole initial state;
/// `Paid` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Paid,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Paid => "paid",
            TransactionStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TransactionStatus::Paid | TransactionStatus::Failed)
    }

    /// Maps the status string reported by the payment provider to a local
    /// outcome. Only the literal `"approved"` counts as paid; everything
    /// else (rejected, cancelled, expired, unknown values) is a failure.
    pub fn from_provider_status(reported: &str) -> Self {
        if reported == "approved" {
            TransactionStatus::Paid
        } else {
            TransactionStatus::Failed
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TransactionStatus::Pending),
            "paid" => Ok(TransactionStatus::Paid),
            "failed" => Ok(TransactionStatus::Failed),
            other => Err(format!("unknown transaction status: {other}")),
        }
    }
}

/// Result of applying a reported outcome to the current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Current status is `Pending`; move to the reported outcome.
    Apply(TransactionStatus),
    /// Already terminal with the same outcome. Duplicate delivery.
    AlreadyApplied,
    /// Already terminal with a different outcome. The stored status wins.
    Conflict,
}

/// Pure transition function for the transaction state machine.
///
/// Terminal states are monotonic: once a transaction is `paid` or `failed`,
/// later notifications never move it, so duplicated or reordered webhook
/// deliveries cannot corrupt a settled record.
pub fn next_status(current: TransactionStatus, reported: TransactionStatus) -> Transition {
    match current {
        TransactionStatus::Pending => Transition::Apply(reported),
        terminal if terminal == reported => Transition::AlreadyApplied,
        _ => Transition::Conflict,
    }
}

/// One purchased item, captured verbatim at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub name: String,
    pub quantity: u32,
    #[schema(value_type = f64)]
    pub price: Decimal,
}

/// Local record tracking a payment preference's lifecycle. Keyed by the
/// provider-assigned preference id; this system never generates ids.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub machine_id: String,
    pub status: TransactionStatus,
    pub items: Vec<OrderItem>,
}

impl Transaction {
    pub fn new(id: String, machine_id: String, items: Vec<OrderItem>) -> Self {
        Self {
            id,
            machine_id,
            status: TransactionStatus::Pending,
            items,
        }
    }
}
