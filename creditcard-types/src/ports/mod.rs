//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod service;
mod store;

pub use service::CardService;
pub use store::{CardStore, CardStream, TransactionStore};
