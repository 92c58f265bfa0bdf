//! Authenticated JSON requests against the back-office API.

use std::future::Future;

use serde_json::Value;
use thiserror::Error;

use crate::dto::DtoError;
use crate::dto::auth::ErrorBody;
use crate::query::RequestDescriptor;

pub mod client;
#[cfg(feature = "client")]
pub mod transport;

pub use client::{AuthenticatedFetchClient, ListFetcher};
#[cfg(feature = "client")]
pub use transport::ReqwestTransport;

/// Message used when a failed response carries no usable `detail`.
pub const REQUEST_FAILED: &str = "request failed";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The request never completed.
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx status. `message` is the server `detail` when present.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// A success status with a body that is not the expected JSON.
    #[error("malformed response: {0}")]
    Decode(String),
}

pub type FetchResult<T> = Result<T, FetchError>;

impl FetchError {
    /// Single user-facing message shown by the presentation layer.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<DtoError> for FetchError {
    fn from(err: DtoError) -> Self {
        FetchError::Decode(err.to_string())
    }
}

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a request to the backend. Adds `Authorization: Bearer <token>` only
/// when `token` is `Some`.
pub trait HttpTransport {
    fn execute(
        &self,
        descriptor: &RequestDescriptor,
        token: Option<&str>,
    ) -> impl Future<Output = FetchResult<RawResponse>>;
}

/// Builds the error for a non-2xx response from its (possibly empty) body.
pub fn http_error(response: &RawResponse) -> FetchError {
    let message = serde_json::from_slice::<ErrorBody>(&response.body)
        .ok()
        .and_then(|body| body.message())
        .unwrap_or_else(|| REQUEST_FAILED.to_string());

    FetchError::Http {
        status: response.status,
        message,
    }
}

/// Normalizes a raw response: non-2xx becomes [`FetchError::Http`], a 2xx
/// body that is not JSON becomes [`FetchError::Decode`].
pub fn interpret_response(response: &RawResponse) -> FetchResult<Value> {
    if !response.is_success() {
        return Err(http_error(response));
    }

    serde_json::from_slice(&response.body).map_err(|err| FetchError::Decode(err.to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn error_detail_becomes_the_message() {
        let response = RawResponse::new(500, r#"{"detail":"db down"}"#);
        let err = interpret_response(&response).unwrap_err();

        assert_eq!(
            err,
            FetchError::Http {
                status: 500,
                message: "db down".to_string(),
            }
        );
        assert_eq!(err.user_message(), "db down");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn missing_or_unparsable_error_body_falls_back() {
        for body in ["", "<html>oops</html>", r#"{"error":"x"}"#] {
            let err = interpret_response(&RawResponse::new(404, body)).unwrap_err();
            assert_eq!(err.user_message(), REQUEST_FAILED);
        }
    }

    #[test]
    fn malformed_success_body_is_fatal() {
        let err = interpret_response(&RawResponse::new(200, "{not json")).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));

        let err = interpret_response(&RawResponse::new(204, "")).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn success_body_is_decoded() {
        let value = interpret_response(&RawResponse::new(200, r#"{"items":[]}"#)).unwrap();

        assert_eq!(value, json!({ "items": [] }));
    }
}
