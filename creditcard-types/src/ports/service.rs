//! Card service port.
//!
//! The HTTP adapter drives the application through this trait.

use rust_decimal::Decimal;

use crate::domain::{CreditCard, CreditCardId};
use crate::error::AppError;

use super::store::CardStream;

/// Application operations on credit cards.
#[async_trait::async_trait]
pub trait CardService: Send + Sync + 'static {
    /// Persists a card as given.
    async fn save(&self, card: CreditCard) -> Result<CreditCard, AppError>;

    /// Overwrites the mutable fields of an existing card.
    async fn update(&self, card: CreditCard) -> Result<CreditCard, AppError>;

    /// Streams every card. Empty is a valid outcome.
    fn find_all(&self) -> CardStream;

    /// Gets a card with its ledger entries attached.
    async fn find_by_id(&self, id: &CreditCardId) -> Result<CreditCard, AppError>;

    /// Deletes an existing card. Its ledger entries are kept.
    async fn delete(&self, id: &CreditCardId) -> Result<(), AppError>;

    /// Counts the customer's cards in the given status.
    async fn total_credit_cards_by_customer(
        &self,
        customer_id: &str,
        status: &str,
    ) -> Result<u64, AppError>;

    /// Charges the card and records a `charge` ledger entry.
    async fn charge_credit_card(
        &self,
        id: &CreditCardId,
        amount: Decimal,
    ) -> Result<CreditCard, AppError>;

    /// Applies a payment to the card and records a `payment` ledger entry.
    async fn pay_credit_card(
        &self,
        id: &CreditCardId,
        amount: Decimal,
    ) -> Result<CreditCard, AppError>;
}
