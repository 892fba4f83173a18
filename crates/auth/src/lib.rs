//! Authentication and signing for the Kubera Data API.
//!
//! This crate provides credential management and request signing for
//! authenticated API calls.
//!
//! # Features
//!
//! - **Secure Credentials**: API secrets are wrapped in `SecretString` to prevent
//!   accidental logging and ensure memory is zeroed on drop.
//! - **HMAC-SHA256 Signing**: Signs `api_key + timestamp + method + path + body`
//!   with the API secret.
//! - **Layered Loading**: Credentials come from explicit values, the process
//!   environment, or a `~/.env` file, in that order.
//!
//! # Example
//!
//! ```rust,ignore
//! use auth::{ApiCredentials, RequestSigner};
//!
//! let credentials = ApiCredentials::from_env()?;
//! let signer = RequestSigner::new(&credentials);
//!
//! let headers = signer.auth_headers("GET", "/api/v3/data/portfolio", None);
//! for (name, value) in headers.to_pairs() {
//!     println!("{name}: {value}");
//! }
//! ```

mod credentials;
mod env_file;
mod error;
mod signer;

pub use credentials::{
    ApiCredentials, CredentialsProvider, LayeredCredentials, API_KEY_VAR, SECRET_VAR,
};
pub use env_file::load_env_file;
pub use error::AuthError;
pub use signer::{
    compact_json, current_timestamp, generate_signature, AuthHeaders, RequestSigner, Signature,
    CONTENT_TYPE_JSON, HEADER_API_TOKEN, HEADER_SIGNATURE, HEADER_TIMESTAMP,
};
