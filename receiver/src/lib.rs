//! Hooklog - GitHub webhook receiver.
//!
//! Verifies `X-Hub-Signature-256` over the raw body, parses the JSON payload
//! and writes one structured log line per recognised event.
//!
//! ## Architecture
//!
//! ```text
//! POST /webhook → verify_signature → WebhookPayload::parse → dispatch → 202 Accepted
//! ```
//!
//! The service is stateless; the only shared value is the [`Config`] read at
//! startup.

pub mod config;
pub mod error;
pub mod events;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use error::WebhookError;
pub use events::{dispatch, is_bot, EventKind, EventRecord, WebhookPayload};
pub use web::{router, AppState};
