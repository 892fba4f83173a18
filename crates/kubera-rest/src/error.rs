//! Kubera API error types.

use auth::AuthError;
use rest_client::RestError;
use thiserror::Error;

const AUTH_HINT: &str = " Check: 1) Credentials are correct, \
     2) IP address is allowed (some API keys have IP restrictions)";

const PERMISSION_HINT: &str = " Note: Update operations require an API key with update \
     permissions enabled. Read-only API keys cannot modify data.";

const RATE_LIMIT_HINT: &str = " Limits: 30 req/min, 100/day (Essential) or 1000/day (Black)";

/// Classification of an error response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Any status without a dedicated kind, including 403 and 5xx.
    Generic,
    /// 401, or credentials that could not be found at all.
    Authentication,
    /// 429.
    RateLimit,
    /// 400.
    Validation,
}

/// An error reported by the API, with its hint already folded into `message`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    pub status_code: Option<u16>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>, status_code: Option<u16>) -> Self {
        Self {
            kind,
            message: message.into(),
            status_code,
        }
    }

    /// Classify a non-200 status and build the user-facing message.
    ///
    /// `detail` is the server's own message, or the raw body when it had none.
    pub fn from_status(status: u16, detail: &str) -> Self {
        let (kind, message) = match status {
            401 => (
                ApiErrorKind::Authentication,
                format!("Authentication failed: {detail}.{AUTH_HINT}"),
            ),
            403 => (
                ApiErrorKind::Generic,
                format!("Permission denied: {detail}.{PERMISSION_HINT}"),
            ),
            429 => (
                ApiErrorKind::RateLimit,
                format!("Rate limit exceeded: {detail}.{RATE_LIMIT_HINT}"),
            ),
            400 => (
                ApiErrorKind::Validation,
                format!("Validation error: {detail}"),
            ),
            _ => (
                ApiErrorKind::Generic,
                format!("API error ({status}): {detail}"),
            ),
        };

        Self::new(kind, message, Some(status))
    }
}

/// Errors that can occur when interacting with the Kubera API.
#[derive(Debug, Error)]
pub enum KuberaError {
    /// The API answered with an error status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Transport failure (network, timeout, etc.); no classified status exists.
    #[error("REST client error: {0}")]
    Rest(#[from] RestError),

    /// Credentials or request body problem before anything was sent.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A 200 response whose body was not the expected JSON.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl KuberaError {
    /// Error kind, for callers that branch on the taxonomy.
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            Self::Api(err) => err.kind,
            Self::Auth(AuthError::MissingCredentials) => ApiErrorKind::Authentication,
            _ => ApiErrorKind::Generic,
        }
    }

    /// HTTP status of a classified API error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(err) => err.status_code,
            _ => None,
        }
    }

    /// Whether the request never produced an HTTP status.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Rest(_))
    }
}
