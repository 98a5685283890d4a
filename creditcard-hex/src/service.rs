//! Credit Card Application Service
//!
//! Orchestrates the balance rules with the card and ledger stores.
//! Contains NO infrastructure logic - pure business orchestration.

use rust_decimal::Decimal;

use creditcard_types::{
    AppError, CardService, CardStore, CardStream, CardTransaction, CreditCard, CreditCardId,
    DomainError, TransactionStore, TransactionType, apply_charge, apply_payment,
};

/// Application service for credit card operations.
///
/// Generic over the two store ports - the adapters are injected at compile time.
/// This enables:
/// - Swapping stores without code changes
/// - Testing with in-memory stores
/// - Compile-time checks for port implementation
pub struct CreditCardService<C: CardStore, L: TransactionStore> {
    cards: C,
    ledger: L,
}

impl<C: CardStore, L: TransactionStore> CreditCardService<C, L> {
    /// Creates a new service over the given card store and ledger.
    pub fn new(cards: C, ledger: L) -> Self {
        Self { cards, ledger }
    }

    /// Returns a reference to the card store.
    pub fn cards(&self) -> &C {
        &self.cards
    }

    /// Returns a reference to the ledger store.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    async fn load(&self, id: &CreditCardId) -> Result<CreditCard, AppError> {
        self.cards
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::CardNotFound(id.clone()).into())
    }

    /// Persists the moved card, then appends the ledger entry.
    ///
    /// The card write is not rolled back if the append fails.
    async fn record_movement(
        &self,
        moved: CreditCard,
        transaction_type: TransactionType,
        amount: Decimal,
    ) -> Result<CreditCard, AppError> {
        let saved = self.cards.save(moved).await?;

        tracing::info!("Saving the {} transaction.", transaction_type);
        self.ledger
            .append(CardTransaction::record(&saved, transaction_type, amount))
            .await?;

        Ok(saved.without_transactions())
    }
}

fn ensure_positive(amount: Decimal) -> Result<(), AppError> {
    if amount <= Decimal::ZERO {
        return Err(AppError::BadRequest("Amount must be greater than 0.".into()));
    }
    Ok(())
}

#[async_trait::async_trait]
impl<C: CardStore, L: TransactionStore> CardService for CreditCardService<C, L> {
    // ─────────────────────────────────────────────────────────────────────────────
    // Card Operations
    // ─────────────────────────────────────────────────────────────────────────────

    async fn save(&self, card: CreditCard) -> Result<CreditCard, AppError> {
        self.cards.save(card).await.map_err(Into::into)
    }

    async fn update(&self, card: CreditCard) -> Result<CreditCard, AppError> {
        let stored = self.load(&card.id).await?;
        self.cards
            .save(stored.merged_with(card))
            .await
            .map_err(Into::into)
    }

    fn find_all(&self) -> CardStream {
        self.cards.find_all()
    }

    async fn find_by_id(&self, id: &CreditCardId) -> Result<CreditCard, AppError> {
        let card = self.load(id).await?;
        let transactions = self.ledger.find_by_credit_card_id(id).await?;
        Ok(card.with_transactions(transactions))
    }

    async fn delete(&self, id: &CreditCardId) -> Result<(), AppError> {
        // Verify card exists first
        let _ = self.load(id).await?;

        self.cards.delete_by_id(id).await.map_err(Into::into)
    }

    async fn total_credit_cards_by_customer(
        &self,
        customer_id: &str,
        status: &str,
    ) -> Result<u64, AppError> {
        self.cards
            .count_by_customer_and_status(customer_id, status)
            .await
            .map_err(Into::into)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Balance Operations
    // ─────────────────────────────────────────────────────────────────────────────

    async fn charge_credit_card(
        &self,
        id: &CreditCardId,
        amount: Decimal,
    ) -> Result<CreditCard, AppError> {
        ensure_positive(amount)?;

        let card = self.find_by_id(id).await?;
        let charged = apply_charge(&card, amount)?;
        self.record_movement(charged, TransactionType::Charge, amount)
            .await
    }

    async fn pay_credit_card(
        &self,
        id: &CreditCardId,
        amount: Decimal,
    ) -> Result<CreditCard, AppError> {
        ensure_positive(amount)?;

        let card = self.find_by_id(id).await?;
        let paid = apply_payment(&card, amount)?;
        self.record_movement(paid, TransactionType::Payment, amount)
            .await
    }
}
