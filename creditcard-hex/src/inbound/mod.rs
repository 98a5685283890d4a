//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the application layer.

mod error;
mod handlers;
mod server;

pub use error::ApiError;
pub use server::HttpServer;
