//! # Credit Card Hex
//!
//! Application service layer and HTTP adapter for the credit card service.
//!
//! ## Architecture
//!
//! - `service/` - Application service (orchestrates balance rules and stores)
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The service is generic over `C: CardStore` and `L: TransactionStore`,
//! the HTTP adapter over `S: CardService`, allowing different
//! implementations to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;


pub use service::CreditCardService;
