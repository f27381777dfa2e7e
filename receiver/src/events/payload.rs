//! Webhook payload parsing and defensive field extraction.
//!
//! Parsing validates only the top-level shape each event kind depends on.
//! Everything below that is read through [`WebhookPayload::get`] and friends,
//! which return `None` for absent, null or wrong-typed values instead of
//! failing the request.

use serde_json::Value;

use crate::error::WebhookError;
use crate::events::EventKind;

/// Repository name reported when the payload does not carry one.
pub const UNKNOWN_REPOSITORY: &str = "<unknown>";

/// A parsed webhook body.
///
/// Known event kinds are always JSON objects; unknown kinds may carry any
/// JSON value.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookPayload {
    value: Value,
}

impl WebhookPayload {
    /// Parse and validate a raw request body for the given event kind.
    ///
    /// # Errors
    ///
    /// * [`WebhookError::InvalidJson`] if the body is not valid JSON
    /// * [`WebhookError::InvalidPayload`] if the kind is known and the body is
    ///   not a JSON object, or a required top-level field is missing or has
    ///   the wrong type
    pub fn parse(kind: &EventKind, body: &[u8]) -> Result<Self, WebhookError> {
        let value: Value = serde_json::from_slice(body)?;

        if let Some(subject) = kind.payload_key() {
            validate(&value, subject)?;
        }

        Ok(WebhookPayload { value })
    }

    /// Look up a nested value by key path. Null counts as absent.
    pub fn get(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.value.as_object()?.get(*first)?;
        for key in rest {
            current = current.as_object()?.get(*key)?;
        }
        if current.is_null() {
            None
        } else {
            Some(current)
        }
    }

    pub fn str_at(&self, path: &[&str]) -> Option<&str> {
        self.get(path)?.as_str()
    }

    pub fn u64_at(&self, path: &[&str]) -> Option<u64> {
        self.get(path)?.as_u64()
    }

    pub fn bool_at(&self, path: &[&str]) -> Option<bool> {
        self.get(path)?.as_bool()
    }

    /// Login of the account object found at `path`, if it has a non-empty one.
    pub fn login_at(&self, path: &[&str]) -> Option<String> {
        let mut full: Vec<&str> = path.to_vec();
        full.push("login");
        self.str_at(&full)
            .filter(|login| !login.is_empty())
            .map(str::to_string)
    }

    /// The `action` field, if present.
    pub fn action(&self) -> Option<String> {
        self.str_at(&["action"]).map(str::to_string)
    }

    /// `repository.full_name`, or [`UNKNOWN_REPOSITORY`].
    pub fn repository_name(&self) -> String {
        self.str_at(&["repository", "full_name"])
            .unwrap_or(UNKNOWN_REPOSITORY)
            .to_string()
    }
}

/// Check the required top-level fields of a known event kind.
fn validate(value: &Value, subject: &str) -> Result<(), WebhookError> {
    let fields = match value {
        Value::Object(fields) => fields,
        other => {
            return Err(WebhookError::InvalidPayload(format!(
                "expected a JSON object, got {}",
                json_type_name(other)
            )))
        }
    };

    match fields.get("action") {
        Some(Value::String(_)) => {}
        Some(_) => return Err(invalid_field("action", "must be a string")),
        None => return Err(invalid_field("action", "is required")),
    }

    for key in ["repository", subject] {
        match fields.get(key) {
            Some(Value::Object(_)) => {}
            Some(_) => return Err(invalid_field(key, "must be an object")),
            None => return Err(invalid_field(key, "is required")),
        }
    }

    Ok(())
}

fn invalid_field(field: &str, problem: &str) -> WebhookError {
    WebhookError::InvalidPayload(format!("field `{}` {}", field, problem))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
