//! Kubera Data API v3 client.
//!
//! This crate provides a typed client for the Kubera REST API with:
//!
//! - **Request signing**: every call carries `x-api-token`, `x-timestamp` and
//!   `x-signature` headers computed by the `auth` crate
//! - **Envelope unwrapping**: `{"data": ..., "errorCode": 0}` is reduced to its payload
//! - **Classified errors**: authentication, rate limit, validation and generic
//!   API errors, each with a hint in its message
//! - **Async and blocking clients** with identical operations
//!
//! No request is ever retried; rate-limit and transient errors go straight to
//! the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use kubera_rest::{KuberaClient, UpdateItemRequest};
//!
//! let client = KuberaClient::from_env()?;
//!
//! let portfolios = client.get_portfolios().await?;
//! let detail = client.get_portfolio(portfolios[0].id().unwrap_or_default()).await?;
//!
//! let updated = client
//!     .update_item("item123", &UpdateItemRequest::new().value(50000.0))
//!     .await?;
//! ```

mod blocking;
mod client;
mod error;
mod interpret;
mod request;
mod responses;

pub use blocking::BlockingKuberaClient;
pub use client::KuberaClient;
pub use error::{ApiError, ApiErrorKind, KuberaError};
pub use interpret::{interpret, interpret_parts};
pub use request::{item_path, portfolio_path, portfolios_path, API_VERSION};
pub use responses::{PortfolioSummary, UpdateItemRequest};
