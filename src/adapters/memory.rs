//! In-memory TransactionStore, used by the HTTP-level tests where a real
//! Postgres instance is not available.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{Transaction, TransactionStatus};
use crate::ports::{StoreError, StoreResult, TransactionStore};

#[derive(Clone, Default)]
pub struct InMemoryTransactionStore {
    records: Arc<RwLock<HashMap<String, Transaction>>>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn insert(&self, tx: &Transaction) -> StoreResult<()> {
        self.records
            .write()
            .await
            .insert(tx.id.clone(), tx.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Transaction>> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn update_status(&self, id: &str, status: TransactionStatus) -> StoreResult<()> {
        let mut records = self.records.write().await;
        let tx = records
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        tx.status = status;
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
