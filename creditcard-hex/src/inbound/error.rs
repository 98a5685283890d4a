//! HTTP error rendering.

use axum::{
    Json,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use creditcard_types::AppError;

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
///
/// Carries the request path so the error body can echo it back.
#[derive(Debug)]
pub struct ApiError {
    pub error: AppError,
    pub path: String,
}

impl ApiError {
    pub fn new(error: impl Into<AppError>, uri: &Uri) -> Self {
        Self {
            error: error.into(),
            path: uri.path().to_string(),
        }
    }
}

/// Attaches the request path to a failed result.
pub trait AtPath<T> {
    fn at(self, uri: &Uri) -> Result<T, ApiError>;
}

impl<T, E: Into<AppError>> AtPath<T> for Result<T, E> {
    fn at(self, uri: &Uri) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::new(e, uri))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message): (StatusCode, Value, String) = match self.error {
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                json!(errors),
                "Invalid input data".to_string(),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!("Invalid request"), msg),
            e @ (AppError::InsufficientFunds { .. } | AppError::PaymentExceedsLimit { .. }) => (
                StatusCode::BAD_REQUEST,
                json!("Invalid request"),
                e.to_string(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!("Resource Not Found"), msg),
            AppError::CustomerNotFound => (
                StatusCode::NOT_FOUND,
                json!("Resource Not Found"),
                "Customer not found.".to_string(),
            ),
            AppError::Internal(msg) => {
                tracing::error!(path = %self.path, "Request failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!("Internal Server Error"),
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "status": status.as_u16(),
            "error": error,
            "message": message,
            "path": self.path,
        });

        (status, Json(body)).into_response()
    }
}
