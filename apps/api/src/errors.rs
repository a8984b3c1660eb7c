use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::provider::ProviderError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not configured: {0}")]
    NotConfigured(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::NotConfigured(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "NOT_CONFIGURED",
                msg.clone(),
            ),
            AppError::Provider(ProviderError::ProviderUnreachable(e)) => {
                tracing::error!("Analysis provider unreachable: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "PROVIDER_UNREACHABLE",
                    "The analysis provider could not be reached".to_string(),
                )
            }
            AppError::Provider(ProviderError::ProviderStatus { status, body }) => {
                tracing::error!("Analysis provider returned {status}: {body}");
                (
                    StatusCode::BAD_GATEWAY,
                    "PROVIDER_ERROR",
                    format!("Analysis provider error {status}: {body}"),
                )
            }
            AppError::Provider(ProviderError::MalformedResponse(msg)) => {
                tracing::error!("Malformed provider response: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "MALFORMED_PROVIDER_RESPONSE",
                    msg.clone(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
