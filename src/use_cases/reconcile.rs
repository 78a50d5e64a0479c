//! Webhook reconciliation use case. Applies a reported payment outcome to
//! the stored transaction through the monotonic transition function, so
//! duplicated or reordered deliveries leave settled records alone.

use std::sync::Arc;

use crate::domain::{self, Transaction, TransactionStatus, Transition};
use crate::error::AppError;
use crate::ports::TransactionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Transaction moved from pending to the reported outcome.
    Updated(TransactionStatus),
    /// Duplicate delivery of an outcome already recorded.
    AlreadyApplied(TransactionStatus),
    /// Delivery disagreed with a terminal record; the stored status wins.
    ConflictIgnored {
        current: TransactionStatus,
        reported: TransactionStatus,
    },
}

pub struct ReconcileNotification {
    store: Arc<dyn TransactionStore>,
}

impl ReconcileNotification {
    pub fn new(store: Arc<dyn TransactionStore>) -> Self {
        Self { store }
    }

    pub async fn execute(
        &self,
        preference_id: &str,
        reported_status: &str,
    ) -> Result<ReconcileOutcome, AppError> {
        let Some(tx) = self.store.get(preference_id).await? else {
            tracing::info!(
                preference_id = %preference_id,
                reported_status = %reported_status,
                "notification for unknown transaction dropped"
            );
            return Err(AppError::NotFound(format!(
                "Transaction {preference_id} not found"
            )));
        };

        let reported = TransactionStatus::from_provider_status(reported_status);
        let outcome = match domain::transaction::next_status(tx.status, reported) {
            Transition::Apply(next) => {
                self.store.update_status(preference_id, next).await?;
                log_applied(&tx, reported_status, next);
                ReconcileOutcome::Updated(next)
            }
            Transition::AlreadyApplied => {
                tracing::info!(
                    preference_id = %tx.id,
                    status = %tx.status,
                    "duplicate notification, transaction already settled"
                );
                ReconcileOutcome::AlreadyApplied(tx.status)
            }
            Transition::Conflict => {
                tracing::warn!(
                    preference_id = %tx.id,
                    machine_id = %tx.machine_id,
                    current_status = %tx.status,
                    reported_status = %reported_status,
                    "conflicting notification for settled transaction ignored"
                );
                ReconcileOutcome::ConflictIgnored {
                    current: tx.status,
                    reported,
                }
            }
        };

        Ok(outcome)
    }
}

fn log_applied(tx: &Transaction, reported_status: &str, next: TransactionStatus) {
    tracing::info!(
        preference_id = %tx.id,
        machine_id = %tx.machine_id,
        reported_status = %reported_status,
        status = %next,
        "transaction settled from notification"
    );
}
