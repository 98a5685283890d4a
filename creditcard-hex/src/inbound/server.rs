//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use creditcard_types::CardService;

use super::handlers::{self, AppState};

/// HTTP Server for the credit card API.
pub struct HttpServer<S: CardService> {
    state: Arc<AppState<S>>,
}

impl<S: CardService> HttpServer<S> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: S) -> Self {
        Self {
            state: Arc::new(AppState { service }),
        }
    }

    /// Builds the Axum router with all routes.
    ///
    /// Every `/creditcards/{id}` route shares the one parameter name; the
    /// count route reads it as a customer id.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api-docs/openapi.json", get(handlers::openapi))
            .route(
                "/creditcards",
                get(handlers::list_cards::<S>)
                    .post(handlers::create_card::<S>)
                    .put(handlers::update_card::<S>),
            )
            .route(
                "/creditcards/{id}",
                get(handlers::get_card::<S>)
                    .put(handlers::update_card_by_id::<S>)
                    .delete(handlers::delete_card::<S>),
            )
            .route(
                "/creditcards/{id}/count",
                get(handlers::count_by_customer::<S>),
            )
            .route("/creditcards/{id}/charge", post(handlers::charge::<S>))
            .route("/creditcards/{id}/pay", post(handlers::pay::<S>))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
