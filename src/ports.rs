//! Store port. The transaction store is an external keyed-document store;
//! adapters implement this trait against a concrete backend.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Transaction, TransactionStatus};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("transaction {0} not found")]
    NotFound(String),
    #[error("store backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Keyed access to transaction records. One record per provider preference
/// id; a single insert or update call is atomic per key.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Creates the record. The caller owns key uniqueness (provider ids).
    async fn insert(&self, tx: &Transaction) -> StoreResult<()>;

    /// Fetches a record by preference id. An absent key is `Ok(None)`,
    /// never an error.
    async fn get(&self, id: &str) -> StoreResult<Option<Transaction>>;

    /// Partial update of the status field only; `machine_id` and `items`
    /// are left untouched. Fails with `NotFound` if the key is absent.
    async fn update_status(&self, id: &str, status: TransactionStatus) -> StoreResult<()>;

    /// Connectivity probe for health reporting.
    async fn ping(&self) -> StoreResult<()>;
}
