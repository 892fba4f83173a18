use thiserror::Error;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Neither explicit values, the environment, nor the env file supplied credentials.
    #[error(
        "API credentials not found. Please provide api_key and secret, \
         or set KUBERA_API_KEY and KUBERA_SECRET environment variables."
    )]
    MissingCredentials,

    /// The request body could not be serialized to JSON.
    #[error("Failed to serialize request body: {0}")]
    BodySerialization(#[from] serde_json::Error),

    /// The env file exists but could not be read or parsed.
    #[error("Failed to load env file {path}: {message}")]
    EnvFile {
        /// Path of the offending file.
        path: String,
        /// Underlying error.
        message: String,
    },
}
