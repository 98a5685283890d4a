//! Store port traits.
//!
//! Two independent stores back the service: one for card records and an
//! append-only ledger for their transactions. Adapters (MongoDB, SQLite)
//! implement both.

use futures::stream::BoxStream;

use crate::domain::{CardTransaction, CreditCard, CreditCardId};
use crate::error::RepoError;

/// Lazy stream of cards produced by [`CardStore::find_all`].
///
/// Nothing is read until the stream is first polled. Each call to
/// `find_all` starts a fresh query.
pub type CardStream = BoxStream<'static, Result<CreditCard, RepoError>>;

/// Persistence for card records.
///
/// Each write touches a single document/row; there is no locking across
/// calls.
#[async_trait::async_trait]
pub trait CardStore: Send + Sync + 'static {
    /// Inserts the card, or replaces the stored card with the same id.
    ///
    /// The transient ledger list is never persisted.
    async fn save(&self, card: CreditCard) -> Result<CreditCard, RepoError>;

    /// Gets a card by ID.
    async fn find_by_id(&self, id: &CreditCardId) -> Result<Option<CreditCard>, RepoError>;

    /// Streams every stored card, in no particular order.
    fn find_all(&self) -> CardStream;

    /// Deletes a card by ID. Deleting an absent card is not an error.
    async fn delete_by_id(&self, id: &CreditCardId) -> Result<(), RepoError>;

    /// Counts cards whose customer id AND status both match exactly.
    async fn count_by_customer_and_status(
        &self,
        customer_id: &str,
        status: &str,
    ) -> Result<u64, RepoError>;
}

/// Append-only ledger of card transactions.
#[async_trait::async_trait]
pub trait TransactionStore: Send + Sync + 'static {
    /// Appends a new ledger entry.
    async fn append(&self, transaction: CardTransaction) -> Result<CardTransaction, RepoError>;

    /// Lists every entry recorded against the card, in no particular order.
    async fn find_by_credit_card_id(
        &self,
        credit_card_id: &CreditCardId,
    ) -> Result<Vec<CardTransaction>, RepoError>;
}
