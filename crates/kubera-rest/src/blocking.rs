//! Blocking Kubera API client.
//!
//! Same operations, signing and interpretation as [`KuberaClient`](crate::KuberaClient);
//! only the transport differs. Each call blocks the calling thread.

use crate::client::parse_summaries;
use crate::error::KuberaError;
use crate::interpret::interpret;
use crate::request::{HttpMethod, PreparedRequest};
use crate::responses::{PortfolioSummary, UpdateItemRequest};
use auth::{ApiCredentials, CredentialsProvider};
use common::ClientConfig;
use rest_client::BlockingRestClient;
use serde_json::Value;
use std::time::Duration;

/// Kubera API client for synchronous code.
///
/// Must not be created or dropped on an async runtime thread.
pub struct BlockingKuberaClient {
    client: BlockingRestClient,
    credentials: ApiCredentials,
    config: ClientConfig,
}

impl BlockingKuberaClient {
    pub fn new(credentials: ApiCredentials) -> Result<Self, KuberaError> {
        Self::with_config(credentials, ClientConfig::default())
    }

    pub fn with_config(
        credentials: ApiCredentials,
        config: ClientConfig,
    ) -> Result<Self, KuberaError> {
        let client = BlockingRestClient::new(&config.base_url, config.timeout)?;

        Ok(Self {
            client,
            credentials,
            config,
        })
    }

    pub fn from_provider(
        provider: &dyn CredentialsProvider,
        config: ClientConfig,
    ) -> Result<Self, KuberaError> {
        Self::with_config(provider.credentials()?, config)
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.config.timeout
    }

    /// GET /api/v3/data/portfolio
    pub fn get_portfolios(&self) -> Result<Vec<PortfolioSummary>, KuberaError> {
        parse_summaries(self.execute(PreparedRequest::list_portfolios())?)
    }

    /// GET /api/v3/data/portfolio/{id}
    pub fn get_portfolio(&self, portfolio_id: &str) -> Result<Value, KuberaError> {
        self.execute(PreparedRequest::get_portfolio(portfolio_id))
    }

    /// POST /api/v3/data/item/{id}
    pub fn update_item(
        &self,
        item_id: &str,
        updates: &UpdateItemRequest,
    ) -> Result<Value, KuberaError> {
        let request = PreparedRequest::update_item(item_id, updates)?;

        tracing::info!(item_id = %item_id, "Updating item");
        self.execute(request)
    }

    /// Release the connection pool now rather than at end of scope.
    pub fn close(self) {
        tracing::debug!(base_url = %self.config.base_url, "Closing blocking client");
    }

    fn execute(&self, request: PreparedRequest) -> Result<Value, KuberaError> {
        let headers = request.auth_headers(&self.credentials);
        let header_pairs = headers.to_pairs();

        let response = match request.method {
            HttpMethod::Get => self.client.get(&request.path, &header_pairs)?,
            HttpMethod::Post => {
                self.client
                    .post(&request.path, request.body.clone(), &header_pairs)?
            }
        };

        interpret(&response)
    }
}

impl std::fmt::Debug for BlockingKuberaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingKuberaClient")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .field("api_key", &self.credentials.api_key())
            .finish()
    }
}
