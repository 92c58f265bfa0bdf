//! Wire DTOs exchanged with the back-office API and their mapping to domain types.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

use crate::domain::types::TypeConstraintError;

pub mod alert;
pub mod auth;
pub mod client;
pub mod history;
pub mod page;

/// Errors raised while mapping a response body onto typed entities.
#[derive(Debug, Error)]
pub enum DtoError {
    #[error("unexpected payload shape: {0}")]
    Shape(#[from] serde_json::Error),

    #[error("invalid field value: {0}")]
    Constraint(#[from] TypeConstraintError),
}

pub type DtoResult<T> = Result<T, DtoError>;

/// Accepts an identifier sent either as a JSON string or as a number.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(not_an_id(&other))),
    }
}

/// Optional variant of [`string_or_number`]; `null` maps to `None`.
pub(crate) fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(not_an_id(&other))),
    }
}

fn not_an_id(value: &Value) -> String {
    format!("expected string or number, got {value}")
}
