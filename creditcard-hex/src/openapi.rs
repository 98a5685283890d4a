//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use creditcard_types::domain::{
    CardTransaction, CreditCard, CreditCardId, TransactionId, TransactionType,
};
use creditcard_types::dto::{AmountQuery, CreditCardDto, StatusQuery};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// List all credit cards
#[utoipa::path(
    get,
    path = "/creditcards",
    tag = "creditcards",
    responses(
        (status = 200, description = "List of credit cards", body = Vec<CreditCard>),
        (status = 204, description = "No credit cards stored")
    )
)]
async fn list_cards() {}

/// Get a credit card with its transactions
#[utoipa::path(
    get,
    path = "/creditcards/{id}",
    tag = "creditcards",
    params(
        ("id" = String, Path, description = "Credit card ID")
    ),
    responses(
        (status = 200, description = "Credit card with transactions attached", body = CreditCard),
        (status = 404, description = "Credit card not found")
    )
)]
async fn get_card() {}

/// Create a credit card
#[utoipa::path(
    post,
    path = "/creditcards",
    tag = "creditcards",
    request_body = CreditCardDto,
    responses(
        (status = 201, description = "Credit card created", body = CreditCard,
            headers(("Location" = String, description = "URI of the created card"))),
        (status = 400, description = "Invalid input data")
    )
)]
async fn create_card() {}

/// Update the credit card named in the payload
#[utoipa::path(
    put,
    path = "/creditcards",
    tag = "creditcards",
    request_body = CreditCardDto,
    responses(
        (status = 200, description = "Credit card updated", body = CreditCard),
        (status = 400, description = "Invalid input data"),
        (status = 404, description = "Credit card not found")
    )
)]
async fn update_card() {}

/// Update a credit card by ID
#[utoipa::path(
    put,
    path = "/creditcards/{id}",
    tag = "creditcards",
    params(
        ("id" = String, Path, description = "Credit card ID")
    ),
    request_body = CreditCardDto,
    responses(
        (status = 200, description = "Credit card updated", body = CreditCard),
        (status = 400, description = "Invalid input data"),
        (status = 404, description = "Credit card not found")
    )
)]
async fn update_card_by_id() {}

/// Delete a credit card (its transactions are kept)
#[utoipa::path(
    delete,
    path = "/creditcards/{id}",
    tag = "creditcards",
    params(
        ("id" = String, Path, description = "Credit card ID")
    ),
    responses(
        (status = 204, description = "Credit card deleted"),
        (status = 404, description = "Credit card not found")
    )
)]
async fn delete_card() {}

/// Count a customer's credit cards in a status
#[utoipa::path(
    get,
    path = "/creditcards/{id}/count",
    tag = "creditcards",
    params(
        ("id" = String, Path, description = "Customer ID"),
        StatusQuery
    ),
    responses(
        (status = 200, description = "Number of matching cards", body = u64, example = json!(2)),
        (status = 400, description = "Missing status")
    )
)]
async fn count_by_customer() {}

/// Charge a credit card
#[utoipa::path(
    post,
    path = "/creditcards/{id}/charge",
    tag = "movements",
    params(
        ("id" = String, Path, description = "Credit card ID"),
        AmountQuery
    ),
    responses(
        (status = 200, description = "Charge applied", body = CreditCard),
        (status = 400, description = "Insufficient funds in the credit card"),
        (status = 404, description = "Credit card not found")
    )
)]
async fn charge() {}

/// Pay a credit card
#[utoipa::path(
    post,
    path = "/creditcards/{id}/pay",
    tag = "movements",
    params(
        ("id" = String, Path, description = "Credit card ID"),
        AmountQuery
    ),
    responses(
        (status = 200, description = "Payment applied", body = CreditCard),
        (status = 400, description = "Payment would exceed the credit limit"),
        (status = 404, description = "Credit card not found")
    )
)]
async fn pay() {}

/// OpenAPI documentation for the credit card API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Credit Card Service API",
        version = "1.0.0",
        description = "Credit card accounts with a ledger of charges and payments.\n\nCharges draw down `currentBalance`; payments raise it up to `creditLimit`. Every successful movement appends an immutable transaction.",
        license(name = "MIT"),
    ),
    paths(
        health,
        list_cards,
        get_card,
        create_card,
        update_card,
        update_card_by_id,
        delete_card,
        count_by_customer,
        charge,
        pay,
    ),
    components(
        schemas(
            CreditCard,
            CreditCardDto,
            CardTransaction,
            CreditCardId,
            TransactionId,
            TransactionType,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "creditcards", description = "Credit card management operations"),
        (name = "movements", description = "Charge and payment operations"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_card_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/creditcards",
            "/creditcards/{id}",
            "/creditcards/{id}/count",
            "/creditcards/{id}/charge",
            "/creditcards/{id}/pay",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
