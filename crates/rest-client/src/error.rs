//! REST client error types.

use thiserror::Error;

/// Transport-level failures. An HTTP error status is not one of these; it is
/// returned as a normal [`RawResponse`](crate::RawResponse).
#[derive(Debug, Error)]
pub enum RestError {
    /// Request timed out.
    #[error("Request timeout")]
    Timeout,

    /// Connection error (network issue).
    #[error("Connection error: {0}")]
    Connection(String),

    /// Failed to build the HTTP client or request.
    #[error("Request build error: {0}")]
    RequestBuild(String),

    /// Failed to read the response body.
    #[error("Response body error: {0}")]
    Body(String),

    /// Any other transport failure.
    #[error("HTTP transport error: {0}")]
    Transport(String),
}

impl RestError {
    /// Check if this error is a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, RestError::Timeout)
    }
}

impl From<reqwest::Error> for RestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RestError::Timeout
        } else if err.is_connect() {
            RestError::Connection(err.to_string())
        } else if err.is_builder() {
            RestError::RequestBuild(err.to_string())
        } else if err.is_body() || err.is_decode() {
            RestError::Body(err.to_string())
        } else {
            RestError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_timeout() {
        assert!(RestError::Timeout.is_timeout());
        assert!(!RestError::Connection("refused".into()).is_timeout());
    }

    #[test]
    fn test_display() {
        assert_eq!(RestError::Timeout.to_string(), "Request timeout");
        assert_eq!(
            RestError::Connection("refused".into()).to_string(),
            "Connection error: refused"
        );
    }
}
