//! SQLite row types.
//!
//! Decimals, dates and timestamps are stored as TEXT so values round-trip
//! without loss; parsing back into domain types happens here.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use creditcard_types::{
    CardTransaction, CreditCard, CreditCardId, RepoError, TransactionId, TransactionType,
};

/// Card row from database.
#[derive(FromRow)]
pub struct DbCard {
    pub id: String,
    pub customer_id: String,
    pub card_type: Option<String>,
    pub credit_limit: String,
    pub current_balance: String,
    pub expiration_date: String,
    pub issue_statement_day: String,
    pub maintenance_fee: String,
    pub status: Option<String>,
}

/// Ledger row from database.
#[derive(FromRow)]
pub struct DbTransaction {
    pub id: String,
    pub customer_id: String,
    pub credit_card_id: String,
    #[sqlx(rename = "type")]
    pub transaction_type: String,
    pub amount: String,
    pub balance_after_movement: String,
    pub created_at: String,
    pub description: Option<String>,
}

fn decimal(column: &str, raw: &str) -> Result<Decimal, RepoError> {
    Decimal::from_str(raw)
        .map_err(|e| RepoError::Database(format!("Invalid {} '{}': {}", column, raw, e)))
}

impl DbCard {
    pub fn into_domain(self) -> Result<CreditCard, RepoError> {
        let expiration_date = NaiveDate::from_str(&self.expiration_date).map_err(|e| {
            RepoError::Database(format!(
                "Invalid expiration_date '{}': {}",
                self.expiration_date, e
            ))
        })?;

        Ok(CreditCard {
            id: CreditCardId::from(self.id),
            customer_id: self.customer_id,
            card_type: self.card_type,
            credit_limit: decimal("credit_limit", &self.credit_limit)?,
            current_balance: decimal("current_balance", &self.current_balance)?,
            expiration_date,
            issue_statement_day: self.issue_statement_day,
            maintenance_fee: decimal("maintenance_fee", &self.maintenance_fee)?,
            status: self.status,
            transactions: None,
        })
    }
}

impl DbTransaction {
    pub fn into_domain(self) -> Result<CardTransaction, RepoError> {
        let transaction_type =
            TransactionType::from_str(&self.transaction_type).map_err(RepoError::Database)?;
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                RepoError::Database(format!("Invalid created_at '{}': {}", self.created_at, e))
            })?;

        Ok(CardTransaction::from_parts(
            TransactionId::from(self.id),
            self.customer_id,
            CreditCardId::from(self.credit_card_id),
            transaction_type,
            decimal("amount", &self.amount)?,
            decimal("balance_after_movement", &self.balance_after_movement)?,
            created_at,
            self.description,
        ))
    }
}
