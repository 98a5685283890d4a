//! # Credit Card Types
//!
//! Domain types and port traits for the credit card service.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (CreditCard, CardTransaction) and the balance rules
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    CardTransaction, CreditCard, CreditCardId, TransactionId, TransactionType, apply_charge,
    apply_payment,
};
pub use dto::*;
pub use error::{AppError, DomainError, RepoError};
pub use ports::{CardService, CardStore, CardStream, TransactionStore};
