//! Async Kubera API client.

use crate::error::KuberaError;
use crate::interpret::interpret;
use crate::request::{HttpMethod, PreparedRequest};
use crate::responses::{PortfolioSummary, UpdateItemRequest};
use auth::{ApiCredentials, CredentialsProvider, LayeredCredentials};
use common::ClientConfig;
use rest_client::RestClient;
use serde_json::Value;
use std::time::Duration;

/// Kubera API client for use inside an async runtime.
///
/// Operations suspend only while the HTTP exchange is in flight and share no
/// mutable state, so any number of them may run concurrently on one client.
/// The connection pool is released when the client is dropped or closed.
pub struct KuberaClient {
    client: RestClient,
    credentials: ApiCredentials,
    config: ClientConfig,
}

impl KuberaClient {
    /// Create a client for the production API with the default timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(credentials: ApiCredentials) -> Result<Self, KuberaError> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a client with an explicit base URL and timeout.
    pub fn with_config(
        credentials: ApiCredentials,
        config: ClientConfig,
    ) -> Result<Self, KuberaError> {
        let client = RestClient::new(&config.base_url, config.timeout)?;

        Ok(Self {
            client,
            credentials,
            config,
        })
    }

    /// Create a client from any credentials source.
    pub fn from_provider(
        provider: &dyn CredentialsProvider,
        config: ClientConfig,
    ) -> Result<Self, KuberaError> {
        Self::with_config(provider.credentials()?, config)
    }

    /// Create a client from the environment, falling back to `~/.env` for
    /// credentials.
    pub fn from_env() -> Result<Self, KuberaError> {
        let provider = LayeredCredentials::new().with_env_file(common::paths::home_env_file());
        Self::from_provider(&provider, ClientConfig::from_env())
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Get the per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.config.timeout
    }

    /// Get the API key (for logging/debugging).
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// List all portfolios.
    ///
    /// GET /api/v3/data/portfolio
    pub async fn get_portfolios(&self) -> Result<Vec<PortfolioSummary>, KuberaError> {
        let value = self.execute(PreparedRequest::list_portfolios()).await?;
        let portfolios = parse_summaries(value)?;

        tracing::debug!(count = portfolios.len(), "Fetched portfolios");
        Ok(portfolios)
    }

    /// Fetch the full detail of one portfolio: assets, debts, insurance,
    /// documents and totals.
    ///
    /// GET /api/v3/data/portfolio/{id}
    pub async fn get_portfolio(&self, portfolio_id: &str) -> Result<Value, KuberaError> {
        self.execute(PreparedRequest::get_portfolio(portfolio_id))
            .await
    }

    /// Update fields of an asset or debt. Fields left unset are untouched.
    ///
    /// POST /api/v3/data/item/{id}
    ///
    /// Requires an API key with update permissions; read-only keys get a 403.
    pub async fn update_item(
        &self,
        item_id: &str,
        updates: &UpdateItemRequest,
    ) -> Result<Value, KuberaError> {
        let request = PreparedRequest::update_item(item_id, updates)?;

        tracing::info!(item_id = %item_id, "Updating item");
        self.execute(request).await
    }

    /// Release the connection pool now rather than at end of scope.
    pub fn close(self) {
        tracing::debug!(base_url = %self.config.base_url, "Closing client");
    }

    async fn execute(&self, request: PreparedRequest) -> Result<Value, KuberaError> {
        let headers = request.auth_headers(&self.credentials);
        let header_pairs = headers.to_pairs();

        let response = match request.method {
            HttpMethod::Get => self.client.get(&request.path, &header_pairs).await?,
            HttpMethod::Post => {
                self.client
                    .post(&request.path, request.body.clone(), &header_pairs)
                    .await?
            }
        };

        interpret(&response)
    }
}

impl std::fmt::Debug for KuberaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KuberaClient")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .field("api_key", &self.credentials.api_key())
            .finish()
    }
}

pub(crate) fn parse_summaries(value: Value) -> Result<Vec<PortfolioSummary>, KuberaError> {
    serde_json::from_value(value).map_err(|e| KuberaError::Parse(e.to_string()))
}
