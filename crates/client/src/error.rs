//! Error types for secret retrieval.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while retrieving a secret payload.
///
/// Messages never include secret values or the session token.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Secrets Manager answered without a string payload (e.g. a binary secret).
    #[error("AWS secret {secret_name} is not available as a string")]
    MissingSecretString { secret_name: String },

    /// The session token needed by the Lambda extension is not set.
    #[error("No session token found in {var} to retrieve secrets")]
    MissingSessionToken { var: &'static str },

    /// The Lambda extension answered with a non-success status.
    #[error("Error occurred while requesting secret {secret_name}. Response status was {status}")]
    ExtensionStatus { secret_name: String, status: u16 },

    /// The secret payload could not be interpreted as a flat JSON object.
    #[error("Invalid secret payload: {0}")]
    InvalidPayload(String),

    /// The configured extension port is not a valid port number.
    #[error("Invalid value for {var}: {value:?} is not a valid port")]
    InvalidExtensionPort { var: &'static str, value: String },

    /// HTTP transport error while talking to the extension.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The Secrets Manager SDK call failed.
    #[error("Secrets Manager request failed: {0}")]
    SecretsManager(String),
}

impl ClientError {
    /// Check if this error came from the remote side rather than local setup.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::ExtensionStatus { .. } | Self::HttpError(_) | Self::SecretsManager(_)
        )
    }
}
