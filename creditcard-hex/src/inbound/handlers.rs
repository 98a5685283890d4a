//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use futures::TryStreamExt;

use creditcard_types::{
    AmountQuery, AppError, CardService, CreditCard, CreditCardDto, CreditCardId, StatusQuery,
};

use super::error::{ApiError, AtPath};
use crate::openapi::ApiDoc;

/// Application state shared across handlers.
pub struct AppState<S: CardService> {
    pub service: S,
}

/// Unwraps a JSON body, turning a malformed payload into a 400.
fn body<T>(payload: Result<Json<T>, JsonRejection>, uri: &Uri) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::new(AppError::BadRequest(rejection.body_text()), uri))
}

/// Unwraps a query string, turning a missing or malformed parameter into a 400.
fn query<T>(params: Result<Query<T>, QueryRejection>, uri: &Uri) -> Result<T, ApiError> {
    params
        .map(|Query(value)| value)
        .map_err(|rejection| ApiError::new(AppError::BadRequest(rejection.body_text()), uri))
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// OpenAPI document for the HTTP surface.
pub async fn openapi() -> impl IntoResponse {
    use utoipa::OpenApi;
    Json(ApiDoc::openapi())
}

/// List all cards.
#[tracing::instrument(skip(state))]
pub async fn list_cards<S: CardService>(
    State(state): State<Arc<AppState<S>>>,
    uri: Uri,
) -> Result<Response, ApiError> {
    let cards = state
        .service
        .find_all()
        .try_collect::<Vec<CreditCard>>()
        .await
        .at(&uri)?;

    if cards.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    Ok(Json(cards).into_response())
}

/// Get a card by ID, with its ledger entries.
#[tracing::instrument(skip(state, uri), fields(card_id = %id))]
pub async fn get_card<S: CardService>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    uri: Uri,
) -> Result<impl IntoResponse, ApiError> {
    let card = state
        .service
        .find_by_id(&CreditCardId::from(id))
        .await
        .at(&uri)?;
    Ok(Json(card))
}

/// Create a card.
#[tracing::instrument(skip(state, payload))]
pub async fn create_card<S: CardService>(
    State(state): State<Arc<AppState<S>>>,
    uri: Uri,
    payload: Result<Json<CreditCardDto>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let dto = body(payload, &uri)?;
    let id = dto.id.clone().unwrap_or_default();
    let card = dto.into_card(id).at(&uri)?;

    let saved = state.service.save(card).await.at(&uri)?;
    tracing::debug!(card_id = %saved.id, "Card created");

    let location = format!("{}/{}", uri.path().trim_end_matches('/'), saved.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(saved)))
}

/// Update the card named in the payload.
#[tracing::instrument(skip(state, payload))]
pub async fn update_card<S: CardService>(
    State(state): State<Arc<AppState<S>>>,
    uri: Uri,
    payload: Result<Json<CreditCardDto>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let dto = body(payload, &uri)?;
    dto.validate_identified().at(&uri)?;

    let id = dto.id.clone().unwrap_or_default();
    apply_update(&state.service, dto, id, &uri).await
}

/// Update the card named in the path. The path id wins over a body id.
#[tracing::instrument(skip(state, uri, payload), fields(card_id = %id))]
pub async fn update_card_by_id<S: CardService>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    uri: Uri,
    payload: Result<Json<CreditCardDto>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let dto = body(payload, &uri)?;
    apply_update(&state.service, dto, CreditCardId::from(id), &uri).await
}

async fn apply_update<S: CardService>(
    service: &S,
    dto: CreditCardDto,
    id: CreditCardId,
    uri: &Uri,
) -> Result<Json<CreditCard>, ApiError> {
    let card = dto.into_card(id).at(uri)?;
    let updated = service.update(card).await.at(uri)?;
    Ok(Json(updated))
}

/// Delete a card. Its ledger entries are kept.
#[tracing::instrument(skip(state, uri), fields(card_id = %id))]
pub async fn delete_card<S: CardService>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    uri: Uri,
) -> Result<impl IntoResponse, ApiError> {
    state
        .service
        .delete(&CreditCardId::from(id))
        .await
        .at(&uri)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Count a customer's cards in a given status.
#[tracing::instrument(skip(state, uri, params), fields(customer_id = %customer_id))]
pub async fn count_by_customer<S: CardService>(
    State(state): State<Arc<AppState<S>>>,
    Path(customer_id): Path<String>,
    uri: Uri,
    params: Result<Query<StatusQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("Fetching total credit cards by customer");
    let StatusQuery { status } = query(params, &uri)?;

    let total = state
        .service
        .total_credit_cards_by_customer(&customer_id, &status)
        .await
        .at(&uri)?;
    Ok(Json(total))
}

/// Charge a card.
#[tracing::instrument(skip(state, uri, params), fields(card_id = %id))]
pub async fn charge<S: CardService>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    uri: Uri,
    params: Result<Query<AmountQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let AmountQuery { amount } = query(params, &uri)?;

    let card = state
        .service
        .charge_credit_card(&CreditCardId::from(id), amount)
        .await
        .at(&uri)?;
    Ok(Json(card))
}

/// Pay a card.
#[tracing::instrument(skip(state, uri, params), fields(card_id = %id))]
pub async fn pay<S: CardService>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    uri: Uri,
    params: Result<Query<AmountQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let AmountQuery { amount } = query(params, &uri)?;

    let card = state
        .service
        .pay_credit_card(&CreditCardId::from(id), amount)
        .await
        .at(&uri)?;
    Ok(Json(card))
}
