//! HTTP transport infrastructure.
//!
//! This crate provides a thin wrapper around `reqwest` with:
//!
//! - An async [`RestClient`] and a [`BlockingRestClient`] with the same surface
//! - Pre-serialized request bodies, sent exactly as given
//! - Header injection for authentication
//! - Raw `(status, body)` results; interpreting the status is left to callers
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_client::RestClient;
//!
//! let client = RestClient::with_default_timeout("https://api.kubera.com")?;
//! let response = client.get("/api/v3/data/portfolio", &[("x-api-token", key)]).await?;
//! println!("{} {}", response.status, response.body);
//! ```

mod blocking;
mod client;
mod error;
mod response;

pub use blocking::BlockingRestClient;
pub use client::RestClient;
pub use error::RestError;
pub use response::RawResponse;
