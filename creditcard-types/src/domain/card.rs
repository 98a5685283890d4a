//! Credit card domain model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::transaction::CardTransaction;

/// Unique identifier for a CreditCard.
///
/// Opaque to the service: stores may hand out any string, new cards get a
/// random UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct CreditCardId(String);

impl CreditCardId {
    /// Creates a new random CreditCardId.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the owned string value.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Default for CreditCardId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for CreditCardId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for CreditCardId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for CreditCardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CreditCardId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

/// A credit card account.
///
/// `current_balance` is what the balance rules in [`super::balance`] move;
/// it must never exceed `credit_limit` after a successful charge or payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    /// Unique identifier
    pub id: CreditCardId,
    /// Owning customer
    #[schema(example = "C1")]
    pub customer_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "GOLD")]
    pub card_type: Option<String>,
    #[schema(value_type = String, example = "1000.00")]
    pub credit_limit: Decimal,
    #[serde(default)]
    #[schema(value_type = String, example = "200.00")]
    pub current_balance: Decimal,
    pub expiration_date: NaiveDate,
    #[schema(example = "15")]
    pub issue_statement_day: String,
    #[schema(value_type = String, example = "9.90")]
    pub maintenance_fee: Decimal,
    /// Free-form lifecycle label (e.g. active, blocked, closed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "active")]
    pub status: Option<String>,
    /// Ledger entries, attached only when a single card is fetched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Vec<CardTransaction>>,
}

impl CreditCard {
    /// Returns this card with the given ledger entries attached.
    pub fn with_transactions(mut self, transactions: Vec<CardTransaction>) -> Self {
        self.transactions = Some(transactions);
        self
    }

    /// Returns this card with the transient ledger list cleared.
    pub fn without_transactions(mut self) -> Self {
        self.transactions = None;
        self
    }

    /// Builds the record an update should persist.
    ///
    /// Identity fields (`id`, `customer_id`, `card_type`) come from `self`, the
    /// stored card; every other persisted field comes from `input`.
    pub fn merged_with(&self, input: CreditCard) -> CreditCard {
        CreditCard {
            id: self.id.clone(),
            customer_id: self.customer_id.clone(),
            card_type: self.card_type.clone(),
            credit_limit: input.credit_limit,
            current_balance: input.current_balance,
            expiration_date: input.expiration_date,
            issue_statement_day: input.issue_statement_day,
            maintenance_fee: input.maintenance_fee,
            status: input.status,
            transactions: None,
        }
    }

    /// Returns true when the card carries the given customer and status.
    pub fn matches(&self, customer_id: &str, status: &str) -> bool {
        self.customer_id == customer_id && self.status.as_deref() == Some(status)
    }
}
