//! Production transport backed by `reqwest`.

use std::time::Duration;

use reqwest::{Client, header};

use crate::fetch::{FetchError, FetchResult, HttpTransport, RawResponse};
use crate::query::{HttpMethod, RequestDescriptor};

#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Creates a transport for `base_url` (e.g. `https://api.example.com`).
    pub fn new(base_url: &str, timeout: Duration) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| FetchError::Network(format!("cannot build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, descriptor: &RequestDescriptor) -> String {
        format!("{}{}", self.base_url, descriptor.path)
    }
}

impl HttpTransport for ReqwestTransport {
    async fn execute(
        &self,
        descriptor: &RequestDescriptor,
        token: Option<&str>,
    ) -> FetchResult<RawResponse> {
        let url = self.url(descriptor);
        let mut request = match descriptor.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        };

        if !descriptor.params.is_empty() {
            request = request.query(&descriptor.params);
        }
        if let Some(body) = &descriptor.body {
            request = request.json(body);
        } else {
            request = request.header(header::CONTENT_TYPE, "application/json");
        }
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        log::debug!("{:?} {}", descriptor.method, descriptor.path_and_query());

        let response = request
            .send()
            .await
            .map_err(|err| FetchError::Network(err.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|err| FetchError::Network(err.to_string()))?;

        Ok(RawResponse::new(status, body.to_vec()))
    }
}
