//! Secure API credential management.
//!
//! Uses the `secrecy` crate to prevent accidental logging of the API secret
//! and ensures memory is zeroed on drop.

use crate::env_file::load_env_file;
use crate::error::AuthError;
use secrecy::{ExposeSecret, SecretString};
use std::path::{Path, PathBuf};

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "KUBERA_API_KEY";

/// Environment variable holding the API secret.
pub const SECRET_VAR: &str = "KUBERA_SECRET";

/// API credentials for authenticated requests.
///
/// The secret is wrapped in `SecretString` which:
/// - Prevents accidental Debug/Display printing
/// - Zeros memory on drop via zeroize
#[derive(Clone)]
pub struct ApiCredentials {
    api_key: String,
    secret: SecretString,
}

impl ApiCredentials {
    /// Create credentials from explicit values.
    ///
    /// Useful for testing or when credentials come from other sources.
    pub fn new(api_key: String, secret: String) -> Self {
        Self {
            api_key,
            secret: SecretString::from(secret),
        }
    }

    /// Load credentials from the process environment only.
    ///
    /// Looks for:
    /// - `KUBERA_API_KEY` - The API key (public)
    /// - `KUBERA_SECRET` - The API secret (private)
    ///
    /// # Errors
    /// Returns `AuthError::MissingCredentials` if either variable is unset or empty.
    pub fn from_env() -> Result<Self, AuthError> {
        match (env_value(API_KEY_VAR), env_value(SECRET_VAR)) {
            (Some(api_key), Some(secret)) => Ok(Self::new(api_key, secret)),
            _ => Err(AuthError::MissingCredentials),
        }
    }

    /// Resolve credentials by precedence.
    ///
    /// 1. Explicit values
    /// 2. `KUBERA_API_KEY` / `KUBERA_SECRET` in the process environment
    /// 3. The env file at `env_file`, loaded without overwriting existing variables
    ///
    /// Each half is resolved independently, so an explicit key can be paired
    /// with a secret from the environment. Empty strings count as missing.
    pub fn resolve(
        api_key: Option<String>,
        secret: Option<String>,
        env_file: Option<&Path>,
    ) -> Result<Self, AuthError> {
        let mut api_key = api_key
            .filter(|v| !v.is_empty())
            .or_else(|| env_value(API_KEY_VAR));
        let mut secret = secret
            .filter(|v| !v.is_empty())
            .or_else(|| env_value(SECRET_VAR));

        if api_key.is_none() || secret.is_none() {
            if let Some(path) = env_file {
                load_env_file(path)?;
                api_key = api_key.or_else(|| env_value(API_KEY_VAR));
                secret = secret.or_else(|| env_value(SECRET_VAR));
            }
        }

        match (api_key, secret) {
            (Some(api_key), Some(secret)) => Ok(Self::new(api_key, secret)),
            _ => Err(AuthError::MissingCredentials),
        }
    }

    /// Get the API key (public, safe to log).
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Expose the secret for signing.
    ///
    /// **WARNING**: Only use this for cryptographic operations.
    /// Never log or display the return value.
    pub fn expose_secret(&self) -> &str {
        self.secret.expose_secret()
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &self.api_key)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Source of credentials for a client.
pub trait CredentialsProvider {
    /// Produce credentials, or explain why none are available.
    fn credentials(&self) -> Result<ApiCredentials, AuthError>;
}

impl CredentialsProvider for ApiCredentials {
    fn credentials(&self) -> Result<ApiCredentials, AuthError> {
        Ok(self.clone())
    }
}

/// Explicit values layered over the environment and an optional env file.
#[derive(Default)]
pub struct LayeredCredentials {
    api_key: Option<String>,
    secret: Option<SecretString>,
    env_file: Option<PathBuf>,
}

impl LayeredCredentials {
    /// Provider that consults only the process environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefer this API key over the environment.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Prefer this secret over the environment.
    pub fn with_secret(mut self, secret: Option<String>) -> Self {
        self.secret = secret.map(SecretString::from);
        self
    }

    /// Fall back to this env file when the environment is incomplete.
    pub fn with_env_file(mut self, path: Option<PathBuf>) -> Self {
        self.env_file = path;
        self
    }
}

impl CredentialsProvider for LayeredCredentials {
    fn credentials(&self) -> Result<ApiCredentials, AuthError> {
        ApiCredentials::resolve(
            self.api_key.clone(),
            self.secret.as_ref().map(|s| s.expose_secret().to_string()),
            self.env_file.as_deref(),
        )
    }
}

impl std::fmt::Debug for LayeredCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayeredCredentials")
            .field("api_key", &self.api_key)
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .field("env_file", &self.env_file)
            .finish()
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
