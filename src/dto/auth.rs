//! Bodies exchanged with `/auth/login` and `/auth/register`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Successful login payload. The token may be missing on misconfigured backends.
#[derive(Debug, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}

/// Error body of a failed request: `{ "detail": ... }`.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// Human-readable detail. Validation error lists are flattened to their
    /// `msg` entries.
    pub fn message(&self) -> Option<String> {
        let message = match self.detail.as_ref()? {
            Value::Null => return None,
            Value::String(s) => s.trim().to_string(),
            Value::Array(entries) => entries
                .iter()
                .map(|entry| match entry.get("msg").and_then(Value::as_str) {
                    Some(msg) => msg.to_string(),
                    None => entry.to_string(),
                })
                .collect::<Vec<_>>()
                .join("; "),
            other => other.to_string(),
        };
        Some(message).filter(|m| !m.is_empty())
    }
}
