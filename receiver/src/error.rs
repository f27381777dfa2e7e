//! Request-scoped error taxonomy.
//!
//! Every variant maps to a client error status. Nothing here is fatal to the
//! process and nothing is retried.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

/// Reasons a webhook delivery is rejected.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("Missing X-GitHub-Event header")]
    MissingEventType,

    #[error("Missing signature header")]
    MissingSignature,

    #[error("Unsupported signature format")]
    UnsupportedSignatureFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

impl WebhookError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::MissingSignature | WebhookError::InvalidSignature => {
                StatusCode::UNAUTHORIZED
            }
            WebhookError::MissingEventType
            | WebhookError::UnsupportedSignatureFormat
            | WebhookError::InvalidJson(_)
            | WebhookError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Short machine-readable tag used in responses and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            WebhookError::MissingEventType => "missing_event_type",
            WebhookError::MissingSignature => "missing_signature",
            WebhookError::UnsupportedSignatureFormat => "unsupported_signature_format",
            WebhookError::InvalidSignature => "invalid_signature",
            WebhookError::InvalidJson(_) => "invalid_json",
            WebhookError::InvalidPayload(_) => "invalid_payload",
        }
    }
}

/// Body returned for rejected deliveries.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub detail: String,
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        warn!(
            status = status.as_u16(),
            kind = self.kind(),
            error = %self,
            "webhook_rejected"
        );

        (
            status,
            Json(ErrorResponse {
                status: self.kind(),
                detail: self.to_string(),
            }),
        )
            .into_response()
    }
}
