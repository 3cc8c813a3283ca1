use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::feedback::notice::GENERIC_FAILURE;
use crate::models::ValidationError;
use crate::store::StoreError;

#[derive(Debug)]
pub enum AppError {
    Validation(ValidationError),
    RateLimited(u64),
    Store(StoreError),
    Internal(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Validation(err) => write!(f, "Bad Request: {err}"),
            AppError::RateLimited(secs) => write!(f, "Rate Limited: retry after {secs}s"),
            AppError::Store(err) => write!(f, "Store Error: {err}"),
            AppError::Internal(msg) => write!(f, "Internal Error: {msg}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "Missing fields",
                    "description": "Please fill in all fields before submitting.",
                    "fields": err.missing,
                }),
            ),
            AppError::RateLimited(secs) => (
                StatusCode::TOO_MANY_REQUESTS,
                json!({ "error": format!("Rate limited. Retry after {secs}s") }),
            ),
            AppError::Store(err) => {
                tracing::warn!("Store error: {err}");
                let message = err
                    .user_message()
                    .unwrap_or_else(|| GENERIC_FAILURE.to_string());
                (StatusCode::BAD_GATEWAY, json!({ "error": message }))
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        let mut response = (status, axum::Json(body)).into_response();
        if let AppError::RateLimited(secs) = self {
            response
                .headers_mut()
                .insert("retry-after", HeaderValue::from(secs));
        }
        response
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

impl From<askama::Error> for AppError {
    fn from(err: askama::Error) -> Self {
        AppError::Internal(format!("Template error: {err}"))
    }
}
