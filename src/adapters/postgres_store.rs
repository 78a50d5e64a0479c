//! Postgres implementation of TransactionStore.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use std::str::FromStr;

use crate::config::Config;
use crate::domain::{OrderItem, Transaction, TransactionStatus};
use crate::ports::{StoreError, StoreResult, TransactionStore};

pub async fn create_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
}

/// Postgres-backed transaction store. Rows live in the `transactions`
/// table created by the migrations.
#[derive(Clone)]
pub struct PostgresTransactionStore {
    pool: PgPool,
}

impl PostgresTransactionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionStore for PostgresTransactionStore {
    async fn insert(&self, tx: &Transaction) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO transactions (id, machine_id, status, items)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&tx.id)
        .bind(&tx.machine_id)
        .bind(tx.status.as_str())
        .bind(Json(&tx.items))
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(())
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Transaction>> {
        let row = sqlx::query_as::<_, TransactionRow>(
            "SELECT id, machine_id, status, items FROM transactions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;

        row.map(TransactionRow::into_domain).transpose()
    }

    async fn update_status(&self, id: &str, status: TransactionStatus) -> StoreResult<()> {
        let result =
            sqlx::query("UPDATE transactions SET status = $2, updated_at = now() WHERE id = $1")
                .bind(id)
                .bind(status.as_str())
                .execute(&self.pool)
                .await
                .map_err(|e| StoreError::Backend(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(())
    }
}

/// Internal row type for SQLx. Not exposed outside the adapter.
#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: String,
    machine_id: String,
    status: String,
    items: Json<Vec<OrderItem>>,
}

impl TransactionRow {
    fn into_domain(self) -> StoreResult<Transaction> {
        let status = TransactionStatus::from_str(&self.status)
            .map_err(|e| StoreError::Backend(format!("corrupt row {}: {e}", self.id)))?;

        Ok(Transaction {
            id: self.id,
            machine_id: self.machine_id,
            status,
            items: self.items.0,
        })
    }
}
