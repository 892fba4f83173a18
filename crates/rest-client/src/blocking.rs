//! Blocking counterpart of [`RestClient`](crate::RestClient).
//!
//! Must not be created or dropped from inside an async runtime; use the async
//! client there instead.

use crate::error::RestError;
use crate::response::{join_url, normalize_base_url, RawResponse};
use reqwest::blocking::{Client, RequestBuilder, Response};
use std::time::Duration;

/// Blocking REST client. Each call blocks the current thread until the
/// exchange completes or the timeout expires.
pub struct BlockingRestClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl BlockingRestClient {
    /// Create a new blocking client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RestError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RestError::RequestBuild(e.to_string()))?;

        Ok(Self {
            client,
            base_url: normalize_base_url(base_url),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Make a GET request.
    pub fn get(&self, path: &str, headers: &[(&str, &str)]) -> Result<RawResponse, RestError> {
        let url = join_url(&self.base_url, path);
        tracing::debug!(url = %url, "GET request (blocking)");

        let response = with_headers(self.client.get(&url), headers).send()?;
        read_response(response)
    }

    /// Make a POST request with a pre-serialized body.
    pub fn post(
        &self,
        path: &str,
        body: Option<String>,
        headers: &[(&str, &str)],
    ) -> Result<RawResponse, RestError> {
        let url = join_url(&self.base_url, path);
        tracing::debug!(url = %url, has_body = body.is_some(), "POST request (blocking)");

        let mut request = with_headers(self.client.post(&url), headers);
        if let Some(body) = body {
            request = request.body(body);
        }

        read_response(request.send()?)
    }
}

impl std::fmt::Debug for BlockingRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingRestClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn with_headers(mut request: RequestBuilder, headers: &[(&str, &str)]) -> RequestBuilder {
    for (key, value) in headers {
        request = request.header(*key, *value);
    }
    request
}

fn read_response(response: Response) -> Result<RawResponse, RestError> {
    let status = response.status().as_u16();
    let body = response.text()?;

    tracing::debug!(status = status, bytes = body.len(), "Response received");

    Ok(RawResponse { status, body })
}
