use std::future::Future;

use serde_json::Value;

use crate::fetch::{FetchResult, HttpTransport, http_error, interpret_response};
use crate::query::RequestDescriptor;
use crate::session::TokenSource;

/// Source of raw list payloads for [`crate::sync::ListSync`].
pub trait ListFetcher {
    fn fetch(&self, descriptor: &RequestDescriptor) -> impl Future<Output = FetchResult<Value>>;
}

/// Wraps a transport with bearer-token injection and uniform error
/// normalization. It neither retries nor caches.
#[derive(Clone, Debug)]
pub struct AuthenticatedFetchClient<T, S> {
    transport: T,
    tokens: S,
}

impl<T, S> AuthenticatedFetchClient<T, S>
where
    T: HttpTransport,
    S: TokenSource,
{
    pub fn new(transport: T, tokens: S) -> Self {
        Self { transport, tokens }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn tokens(&self) -> &S {
        &self.tokens
    }

    /// Issues `descriptor` with an explicit token. A missing token is not an
    /// error; the server decides whether the endpoint is public.
    pub async fn request_with_token(
        &self,
        descriptor: &RequestDescriptor,
        token: Option<&str>,
    ) -> FetchResult<Value> {
        let token = token.filter(|t| !t.trim().is_empty());
        let response = self
            .transport
            .execute(descriptor, token)
            .await
            .map_err(|err| {
                log::error!("Failed to reach {}: {err}", descriptor.path);
                err
            })?;

        interpret_response(&response).map_err(|err| {
            log::error!("Request to {} failed: {err}", descriptor.path);
            err
        })
    }

    /// Issues `descriptor` with the token currently held by the session.
    pub async fn request(&self, descriptor: &RequestDescriptor) -> FetchResult<Value> {
        let token = self.tokens.bearer_token();
        self.request_with_token(descriptor, token.as_deref()).await
    }

    /// Issues `descriptor` and only checks the status; the success body is ignored.
    pub async fn send_with_token(
        &self,
        descriptor: &RequestDescriptor,
        token: Option<&str>,
    ) -> FetchResult<()> {
        let token = token.filter(|t| !t.trim().is_empty());
        let response = self
            .transport
            .execute(descriptor, token)
            .await
            .map_err(|err| {
                log::error!("Failed to reach {}: {err}", descriptor.path);
                err
            })?;

        if response.is_success() {
            Ok(())
        } else {
            let err = http_error(&response);
            log::error!("Request to {} failed: {err}", descriptor.path);
            Err(err)
        }
    }
}

impl<T, S> ListFetcher for AuthenticatedFetchClient<T, S>
where
    T: HttpTransport,
    S: TokenSource,
{
    async fn fetch(&self, descriptor: &RequestDescriptor) -> FetchResult<Value> {
        self.request(descriptor).await
    }
}
