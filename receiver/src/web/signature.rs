//! GitHub webhook signature verification.
//!
//! GitHub signs each delivery with HMAC-SHA256 over the raw request body and
//! sends the hex digest in `X-Hub-Signature-256` as `sha256=<hex>`.
//! Reference: https://docs.github.com/en/webhooks/using-webhooks/validating-webhook-deliveries

use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::warn;

use crate::error::WebhookError;

type HmacSha256 = Hmac<Sha256>;

/// Only digest name GitHub uses for `X-Hub-Signature-256`.
const DIGEST_NAME: &str = "sha256";

/// Verify a GitHub webhook signature.
///
/// # Arguments
///
/// * `secret` - The configured webhook secret; `None` skips verification
/// * `signature_header` - The `X-Hub-Signature-256` header value, if sent
/// * `body` - The raw, unparsed request body
///
/// # Errors
///
/// * [`WebhookError::MissingSignature`] if a secret is configured but no header was sent
/// * [`WebhookError::UnsupportedSignatureFormat`] if the header is not `sha256=<hex>`
/// * [`WebhookError::InvalidSignature`] if the digest does not match
pub fn verify_signature(
    secret: Option<&str>,
    signature_header: Option<&str>,
    body: &[u8],
) -> Result<(), WebhookError> {
    let secret = match secret.filter(|s| !s.is_empty()) {
        Some(s) => s,
        None => return Ok(()),
    };

    let header = signature_header
        .filter(|h| !h.is_empty())
        .ok_or(WebhookError::MissingSignature)?;

    let (digest_name, received) = header.split_once('=').unwrap_or((header, ""));
    if digest_name != DIGEST_NAME || received.is_empty() {
        warn!(digest_name = %digest_name, "github_signature_unsupported_format");
        return Err(WebhookError::UnsupportedSignatureFormat);
    }

    let received_bytes = match hex::decode(received) {
        Ok(bytes) => bytes,
        Err(_) => {
            warn!(actual_length = received.len(), "github_signature_not_hex");
            return Err(WebhookError::InvalidSignature);
        }
    };

    let mut mac = keyed_mac(secret)?;
    mac.update(body);

    // verify_slice compares in constant time
    if mac.verify_slice(&received_bytes).is_err() {
        warn!(
            actual_length = received.len(),
            "github_signature_mismatch"
        );
        return Err(WebhookError::InvalidSignature);
    }

    Ok(())
}

/// Compute the `X-Hub-Signature-256` header value for a body.
pub fn compute_signature(secret: &str, body: &[u8]) -> Result<String, WebhookError> {
    let mut mac = keyed_mac(secret)?;
    mac.update(body);
    Ok(format!(
        "{}={}",
        DIGEST_NAME,
        hex::encode(mac.finalize().into_bytes())
    ))
}

fn keyed_mac(secret: &str) -> Result<HmacSha256, WebhookError> {
    HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| {
        warn!("github_signature_invalid_key");
        WebhookError::InvalidSignature
    })
}
