//! # Credit Card Client SDK
//!
//! A typed Rust client for the credit card API.

use creditcard_types::{CreditCard, CreditCardDto, CreditCardId};
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Credit card API client.
pub struct CreditCardClient {
    base_url: String,
    http: Client,
}

impl CreditCardClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self.http.get(self.url("/health")).send().await?;
        Ok(resp.status().is_success())
    }

    /// Lists all cards. An empty store yields an empty list.
    pub async fn list_cards(&self) -> Result<Vec<CreditCard>, ClientError> {
        let resp = self.http.get(self.url("/creditcards")).send().await?;
        if resp.status() == StatusCode::NO_CONTENT {
            return Ok(Vec::new());
        }
        handle_response(resp).await
    }

    /// Gets a card by ID, with its transactions.
    pub async fn get_card(&self, id: &CreditCardId) -> Result<CreditCard, ClientError> {
        let resp = self
            .http
            .get(self.url(&format!("/creditcards/{}", id)))
            .send()
            .await?;
        handle_response(resp).await
    }

    /// Creates a card. The server assigns an id when the payload has none.
    pub async fn create_card(&self, card: &CreditCardDto) -> Result<CreditCard, ClientError> {
        let resp = self
            .http
            .post(self.url("/creditcards"))
            .json(card)
            .send()
            .await?;
        handle_response(resp).await
    }

    /// Updates the card named by the payload's id.
    pub async fn update_card(&self, card: &CreditCardDto) -> Result<CreditCard, ClientError> {
        let resp = self
            .http
            .put(self.url("/creditcards"))
            .json(card)
            .send()
            .await?;
        handle_response(resp).await
    }

    /// Deletes a card. Its transactions stay on the server.
    pub async fn delete_card(&self, id: &CreditCardId) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(self.url(&format!("/creditcards/{}", id)))
            .send()
            .await?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(api_error(resp).await)
        }
    }

    /// Counts a customer's cards in the given status.
    pub async fn count_by_customer(
        &self,
        customer_id: &str,
        status: &str,
    ) -> Result<u64, ClientError> {
        let resp = self
            .http
            .get(self.url(&format!("/creditcards/{}/count", customer_id)))
            .query(&[("status", status)])
            .send()
            .await?;
        handle_response(resp).await
    }

    /// Charges `amount` to a card.
    pub async fn charge(
        &self,
        id: &CreditCardId,
        amount: Decimal,
    ) -> Result<CreditCard, ClientError> {
        self.movement(id, "charge", amount).await
    }

    /// Pays `amount` towards a card.
    pub async fn pay(&self, id: &CreditCardId, amount: Decimal) -> Result<CreditCard, ClientError> {
        self.movement(id, "pay", amount).await
    }

    async fn movement(
        &self,
        id: &CreditCardId,
        action: &str,
        amount: Decimal,
    ) -> Result<CreditCard, ClientError> {
        let resp = self
            .http
            .post(self.url(&format!("/creditcards/{}/{}", id, action)))
            .query(&[("amount", amount.to_string())])
            .send()
            .await?;
        handle_response(resp).await
    }
}

async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    if resp.status().is_success() {
        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    } else {
        Err(api_error(resp).await)
    }
}

async fn api_error(resp: reqwest::Response) -> ClientError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    ClientError::Api {
        status,
        message: error_message(&body),
    }
}

/// Extracts a readable message from an error body, listing field errors
/// when present.
fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.to_string();
    };

    let message = value
        .get("message")
        .and_then(|m| m.as_str())
        .unwrap_or(body)
        .to_string();

    match value.get("error").and_then(|e| e.as_array()) {
        Some(details) => {
            let details: Vec<&str> = details.iter().filter_map(|d| d.as_str()).collect();
            format!("{}: {}", message, details.join(", "))
        }
        None => message,
    }
}
