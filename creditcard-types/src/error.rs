//! Error types for the credit card service.

use rust_decimal::Decimal;

use crate::domain::CreditCardId;

/// Domain-level errors (business logic violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid input data: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Insufficient funds in the credit card.")]
    InsufficientFunds {
        current_balance: Decimal,
        amount: Decimal,
    },

    #[error("Cannot pay more than the total amount owed (including credit limit).")]
    PaymentExceedsLimit {
        credit_limit: Decimal,
        total_after_payment: Decimal,
    },

    #[error("Credit card not found: {0}")]
    CardNotFound(CreditCardId),
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Entity not found")]
    NotFound,
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid input data")]
    Validation(Vec<String>),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Insufficient funds in the credit card.")]
    InsufficientFunds {
        current_balance: Decimal,
        amount: Decimal,
    },

    #[error("Cannot pay more than the total amount owed (including credit limit).")]
    PaymentExceedsLimit {
        credit_limit: Decimal,
        total_after_payment: Decimal,
    },

    /// Raised by the customer directory when the owning customer is unknown.
    #[error("Customer not found.")]
    CustomerNotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(errors) => AppError::Validation(errors),
            DomainError::InsufficientFunds {
                current_balance,
                amount,
            } => AppError::InsufficientFunds {
                current_balance,
                amount,
            },
            DomainError::PaymentExceedsLimit {
                credit_limit,
                total_after_payment,
            } => AppError::PaymentExceedsLimit {
                credit_limit,
                total_after_payment,
            },
            DomainError::CardNotFound(id) => {
                AppError::NotFound(format!("Credit card not found: {}", id))
            }
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(e) => e.into(),
            RepoError::NotFound => AppError::NotFound("Resource not found".into()),
            RepoError::Database(e) => AppError::Internal(e),
        }
    }
}
