//! Async REST client wrapper around reqwest.

use crate::error::RestError;
use crate::response::{join_url, normalize_base_url, RawResponse};
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;

/// Async REST client for making HTTP requests.
///
/// The underlying connection pool is created once and released when the
/// client is dropped.
pub struct RestClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl RestClient {
    /// Create a new REST client with the given base URL.
    ///
    /// # Arguments
    /// * `base_url` - Base URL for all requests (e.g., "https://api.kubera.com")
    /// * `timeout` - Per-request timeout
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

    /// Create a new REST client with [`common::DEFAULT_TIMEOUT`].
    pub fn with_default_timeout(base_url: &str) -> Result<Self, RestError> {
        Self::new(base_url, common::DEFAULT_TIMEOUT)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Make a GET request.
    ///
    /// # Arguments
    /// * `path` - Request path (e.g., "/api/v3/data/portfolio")
    /// * `headers` - Additional headers
    pub async fn get(
        &self,
        path: &str,
        headers: &[(&str, &str)],
    ) -> Result<RawResponse, RestError> {
        let url = self.build_url(path);
        tracing::debug!(url = %url, "GET request");

        let request = with_headers(self.client.get(&url), headers);
        let response = request.send().await?;
        read_response(response).await
    }

    /// Make a POST request.
    ///
    /// # Arguments
    /// * `path` - Request path
    /// * `body` - Pre-serialized request body, sent byte for byte
    /// * `headers` - Additional headers
    pub async fn post(
        &self,
        path: &str,
        body: Option<String>,
        headers: &[(&str, &str)],
    ) -> Result<RawResponse, RestError> {
        let url = self.build_url(path);
        tracing::debug!(url = %url, has_body = body.is_some(), "POST request");

        let mut request = with_headers(self.client.post(&url), headers);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        read_response(response).await
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
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

/// Capture status and body text without judging the status.
async fn read_response(response: Response) -> Result<RawResponse, RestError> {
    let status = response.status().as_u16();
    let body = response.text().await?;

    tracing::debug!(status = status, bytes = body.len(), "Response received");

    Ok(RawResponse { status, body })
}
