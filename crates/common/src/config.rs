//! Client configuration.
//!
//! Holds the API base URL and the per-request timeout, with defaults that
//! can be overridden from the environment.

use std::fmt;
use std::time::Duration;

/// Production API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.kubera.com";

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable overriding the base URL.
pub const BASE_URL_VAR: &str = "KUBERA_BASE_URL";

/// Environment variable overriding the timeout, in seconds.
pub const TIMEOUT_VAR: &str = "KUBERA_TIMEOUT_SECS";

/// Settings fixed at client construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL, without a trailing slash.
    pub base_url: String,
    /// Bound on each individual HTTP exchange.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Override the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load configuration from `KUBERA_BASE_URL` and `KUBERA_TIMEOUT_SECS`.
    ///
    /// Unset variables keep their defaults. An invalid timeout is logged and
    /// ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(url) = std::env::var(BASE_URL_VAR).ok().filter(|v| !v.is_empty()) {
            config = config.with_base_url(url);
        }

        if let Ok(raw) = std::env::var(TIMEOUT_VAR) {
            match parse_timeout_secs(&raw) {
                Ok(timeout) => config.timeout = timeout,
                Err(e) => tracing::warn!(error = %e, "Ignoring {}", TIMEOUT_VAR),
            }
        }

        config
    }
}

/// Parse a positive number of seconds, fractions allowed.
pub fn parse_timeout_secs(s: &str) -> Result<Duration, ParseTimeoutError> {
    match s.trim().parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs > 0.0 => Ok(Duration::from_secs_f64(secs)),
        _ => Err(ParseTimeoutError(s.to_string())),
    }
}

/// Error parsing a timeout string.
#[derive(Debug, Clone)]
pub struct ParseTimeoutError(String);

impl fmt::Display for ParseTimeoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid timeout '{}', expected a positive number of seconds",
            self.0
        )
    }
}

impl std::error::Error for ParseTimeoutError {}
