//! Configuration module for environment variable parsing.
//!
//! Configuration is read once at startup and shared read-only with every
//! request handler.

use std::env;
use tracing::warn;

/// Default bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default bind port.
pub const DEFAULT_PORT: u16 = 3000;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared secret used to verify `X-Hub-Signature-256`.
    /// `None` disables signature verification.
    pub github_webhook_secret: Option<String>,

    /// Address the web server binds to
    pub host: String,

    /// Port for the web server to listen on
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            github_webhook_secret: None,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Config {
            github_webhook_secret: lookup("GITHUB_WEBHOOK_SECRET")
                .filter(|s| !s.trim().is_empty()),

            host: lookup("HOST")
                .map(|h| h.trim().to_string())
                .filter(|h| !h.is_empty())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),

            port: parse_port(lookup("PORT")),
        }
    }

    /// Whether incoming webhooks must carry a valid signature.
    pub fn signature_verification_enabled(&self) -> bool {
        self.github_webhook_secret.is_some()
    }
}

/// Parse the port, falling back to the default on absent or invalid input.
fn parse_port(raw: Option<String>) -> u16 {
    let raw = match raw {
        Some(v) => v,
        None => return DEFAULT_PORT,
    };

    match raw.trim().parse::<u16>() {
        Ok(port) => port,
        Err(_) => {
            warn!(env_var = "PORT", value = %raw, "Invalid port, using default");
            DEFAULT_PORT
        }
    }
}
