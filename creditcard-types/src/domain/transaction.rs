//! Ledger entry domain model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::card::{CreditCard, CreditCardId};

/// Unique identifier for a CardTransaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Creates a new random TransactionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for TransactionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of balance movement a ledger entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Charge,
    Payment,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Charge => "charge",
            TransactionType::Payment => "payment",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "charge" => Ok(TransactionType::Charge),
            "payment" => Ok(TransactionType::Payment),
            other => Err(format!("Unknown transaction type: {}", other)),
        }
    }
}

/// A recorded charge or payment against a card.
///
/// Ledger entries are immutable once created and outlive the card they
/// reference: deleting a card leaves its entries in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardTransaction {
    pub id: TransactionId,
    pub customer_id: String,
    pub credit_card_id: CreditCardId,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[schema(value_type = String, example = "50.00")]
    pub amount: Decimal,
    /// Card balance immediately after this movement
    #[schema(value_type = String, example = "950.00")]
    pub balance_after_movement: Decimal,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CardTransaction {
    /// Records a movement of `amount` against `card`, snapshotting the card's
    /// balance as it stands after the movement.
    pub fn record(card: &CreditCard, transaction_type: TransactionType, amount: Decimal) -> Self {
        Self {
            id: TransactionId::new(),
            customer_id: card.customer_id.clone(),
            credit_card_id: card.id.clone(),
            transaction_type,
            amount,
            balance_after_movement: card.current_balance,
            created_at: Utc::now(),
            description: None,
        }
    }

    /// Reconstructs a ledger entry from stored fields.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: TransactionId,
        customer_id: String,
        credit_card_id: CreditCardId,
        transaction_type: TransactionType,
        amount: Decimal,
        balance_after_movement: Decimal,
        created_at: DateTime<Utc>,
        description: Option<String>,
    ) -> Self {
        Self {
            id,
            customer_id,
            credit_card_id,
            transaction_type,
            amount,
            balance_after_movement,
            created_at,
            description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::tests::card;
    use rust_decimal_macros::dec;

    #[test]
    fn test_record_snapshots_card_balance() {
        let c = card(dec!(1000), dec!(950));
        let tx = CardTransaction::record(&c, TransactionType::Payment, dec!(50));

        assert_eq!(tx.credit_card_id, c.id);
        assert_eq!(tx.customer_id, "C1");
        assert_eq!(tx.amount, dec!(50));
        assert_eq!(tx.balance_after_movement, dec!(950));
        assert!(tx.description.is_none());
    }

    #[test]
    fn test_type_serializes_lowercase() {
        let c = card(dec!(1000), dec!(0));
        let tx = CardTransaction::record(&c, TransactionType::Charge, dec!(200));
        let json = serde_json::to_value(&tx).unwrap();

        assert_eq!(json["type"], "charge");
        assert_eq!(json["creditCardId"], "cc-1");
        assert_eq!(json["balanceAfterMovement"], "0");
    }

    #[test]
    fn test_type_from_str() {
        assert_eq!("payment".parse(), Ok(TransactionType::Payment));
        assert!("refund".parse::<TransactionType>().is_err());
    }
}
