//! Domain models for the credit card service.

pub mod balance;
pub mod card;
pub mod transaction;

pub use balance::{apply_charge, apply_payment, round_half_up};
pub use card::{CreditCard, CreditCardId};
pub use transaction::{CardTransaction, TransactionId, TransactionType};
