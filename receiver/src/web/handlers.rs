//! HTTP endpoint handlers.
//!
//! The webhook handler runs the whole pipeline inline:
//! 1. Verify the signature over the raw body (if a secret is configured)
//! 2. Parse the JSON payload
//! 3. Dispatch to the event handler, which logs the event
//! 4. Return 202 Accepted

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::error::WebhookError;
use crate::events::{dispatch, EventKind, WebhookPayload};
use crate::web::signature::verify_signature;
use crate::Config;

/// Header carrying the event type name.
pub const EVENT_HEADER: &str = "X-GitHub-Event";

/// Header carrying the `sha256=<hex>` body signature.
pub const SIGNATURE_HEADER: &str = "X-Hub-Signature-256";

/// Header carrying GitHub's unique delivery id.
pub const DELIVERY_HEADER: &str = "X-GitHub-Delivery";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Fixed greeting response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<MessageResponse> {
    Json(MessageResponse { message: "OK" })
}

/// Root greeting.
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "hello world",
    })
}

// =============================================================================
// GitHub Webhook
// =============================================================================

/// Webhook acknowledgement.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub status: &'static str,
}

/// GitHub webhook endpoint.
pub async fn github_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<WebhookResponse>), WebhookError> {
    let event = header_str(&headers, EVENT_HEADER).ok_or(WebhookError::MissingEventType)?;
    let kind = EventKind::from_header(event);

    info!(
        event = %kind,
        delivery = header_str(&headers, DELIVERY_HEADER),
        body_length = body.len(),
        has_signature = headers.contains_key(SIGNATURE_HEADER),
        "github_webhook_received"
    );

    verify_signature(
        state.config.github_webhook_secret.as_deref(),
        header_str(&headers, SIGNATURE_HEADER),
        &body,
    )?;

    let payload = WebhookPayload::parse(&kind, &body)?;

    dispatch(&kind, &payload);

    Ok((
        StatusCode::ACCEPTED,
        Json(WebhookResponse { status: "accepted" }),
    ))
}

/// Read a header as UTF-8, treating non-UTF-8 values as absent.
fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
