//! SQLite store adapter.
#![allow(clippy::collapsible_if)]

use std::str::FromStr;

use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt, stream};
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;

use creditcard_types::{
    CardStore, CardStream, CardTransaction, CreditCard, CreditCardId, RepoError, TransactionStore,
};

use crate::types::{DbCard, DbTransaction};

const CARD_COLUMNS: &str = "id, customer_id, card_type, credit_limit, current_balance, \
     expiration_date, issue_statement_day, maintenance_fee, status";

const TRANSACTION_COLUMNS: &str = "id, customer_id, credit_card_id, type, amount, \
     balance_after_movement, created_at, description";

fn db_err(e: sqlx::Error) -> RepoError {
    RepoError::Database(e.to_string())
}

/// SQLite store implementation. Cloning shares the connection pool.
#[derive(Clone)]
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite store with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        let repo = Self { pool };
        repo.create_schema().await?;
        tracing::debug!("SQLite schema ready");
        Ok(repo)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the database schema. Safe to call more than once.
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        for ddl in [
            include_str!("../migrations/0001_create_credit_cards.sql"),
            include_str!("../migrations/0002_create_creditcard_transactions.sql"),
        ] {
            sqlx::raw_sql(ddl).execute(&self.pool).await.map_err(db_err)?;
        }
        Ok(())
    }
}

#[async_trait]
impl CardStore for SqliteRepo {
    async fn save(&self, card: CreditCard) -> Result<CreditCard, RepoError> {
        let card = card.without_transactions();

        sqlx::query(
            r#"INSERT INTO credit_cards
                (id, customer_id, card_type, credit_limit, current_balance,
                 expiration_date, issue_statement_day, maintenance_fee, status)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
               ON CONFLICT(id) DO UPDATE SET
                 customer_id = excluded.customer_id,
                 card_type = excluded.card_type,
                 credit_limit = excluded.credit_limit,
                 current_balance = excluded.current_balance,
                 expiration_date = excluded.expiration_date,
                 issue_statement_day = excluded.issue_statement_day,
                 maintenance_fee = excluded.maintenance_fee,
                 status = excluded.status"#,
        )
        .bind(card.id.as_str())
        .bind(&card.customer_id)
        .bind(&card.card_type)
        .bind(card.credit_limit.to_string())
        .bind(card.current_balance.to_string())
        .bind(card.expiration_date.to_string())
        .bind(&card.issue_statement_day)
        .bind(card.maintenance_fee.to_string())
        .bind(&card.status)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(card)
    }

    async fn find_by_id(&self, id: &CreditCardId) -> Result<Option<CreditCard>, RepoError> {
        let row: Option<DbCard> = sqlx::query_as(&format!(
            "SELECT {} FROM credit_cards WHERE id = ?",
            CARD_COLUMNS
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(DbCard::into_domain).transpose()
    }

    fn find_all(&self) -> CardStream {
        let pool = self.pool.clone();
        stream::once(async move {
            sqlx::query_as::<_, DbCard>(&format!("SELECT {} FROM credit_cards", CARD_COLUMNS))
                .fetch_all(&pool)
                .await
                .map_err(db_err)
        })
        .map_ok(|rows| stream::iter(rows.into_iter().map(DbCard::into_domain)))
        .try_flatten()
        .boxed()
    }

    async fn delete_by_id(&self, id: &CreditCardId) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM credit_cards WHERE id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn count_by_customer_and_status(
        &self,
        customer_id: &str,
        status: &str,
    ) -> Result<u64, RepoError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM credit_cards WHERE customer_id = ? AND status = ?",
        )
        .bind(customer_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(count as u64)
    }
}

#[async_trait]
impl TransactionStore for SqliteRepo {
    async fn append(&self, transaction: CardTransaction) -> Result<CardTransaction, RepoError> {
        sqlx::query(&format!(
            "INSERT INTO creditcard_transactions ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            TRANSACTION_COLUMNS
        ))
        .bind(transaction.id.as_str())
        .bind(&transaction.customer_id)
        .bind(transaction.credit_card_id.as_str())
        .bind(transaction.transaction_type.as_str())
        .bind(transaction.amount.to_string())
        .bind(transaction.balance_after_movement.to_string())
        .bind(transaction.created_at.to_rfc3339())
        .bind(&transaction.description)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(transaction)
    }

    async fn find_by_credit_card_id(
        &self,
        credit_card_id: &CreditCardId,
    ) -> Result<Vec<CardTransaction>, RepoError> {
        let rows: Vec<DbTransaction> = sqlx::query_as(&format!(
            "SELECT {} FROM creditcard_transactions WHERE credit_card_id = ?",
            TRANSACTION_COLUMNS
        ))
        .bind(credit_card_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter().map(DbTransaction::into_domain).collect()
    }
}
