//! Retrieval through the AWS Parameters and Secrets Lambda extension.
//!
//! Responsibilities:
//! - Resolve the extension endpoint (default port, or the port from
//!   `PARAMETERS_SECRETS_EXTENSION_HTTP_PORT`).
//! - Issue the authorized GET and unwrap the `SecretString` field of the response.
//!
//! Does NOT handle:
//! - Direct Secrets Manager calls (see `store.rs`).
//! - Retries or caching; the extension caches on its own side.
//!
//! Invariants:
//! - The session token is checked before any HTTP request is made.
//! - The session token is never logged or included in errors.

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::constants::{
    EXTENSION_HTTP_PORT, EXTENSION_PORT_VAR, EXTENSION_SECRET_ID_PARAM, EXTENSION_SECRETS_PATH,
    EXTENSION_TOKEN_HEADER, SESSION_TOKEN_VAR,
};
use crate::error::{ClientError, Result};
use crate::payload::{SecretMap, parse_secret_payload};

/// Response body returned by the extension's Secrets Manager proxy.
#[derive(Debug, Deserialize)]
struct ExtensionResponse {
    #[serde(rename = "SecretString")]
    secret_string: Option<String>,
}

/// HTTP client for the Lambda secrets extension.
#[derive(Debug, Clone)]
pub struct ExtensionClient {
    http: Client,
    endpoint: String,
}

impl ExtensionClient {
    /// Create a client for the extension on localhost.
    ///
    /// The port is read from `PARAMETERS_SECRETS_EXTENSION_HTTP_PORT` when set,
    /// otherwise the extension default (2773) is used.
    pub fn from_env() -> Result<Self> {
        let port = match std::env::var(EXTENSION_PORT_VAR) {
            Ok(raw) if !raw.trim().is_empty() => {
                raw.trim()
                    .parse::<u16>()
                    .map_err(|_| ClientError::InvalidExtensionPort {
                        var: EXTENSION_PORT_VAR,
                        value: raw.clone(),
                    })?
            }
            _ => EXTENSION_HTTP_PORT,
        };
        Self::with_endpoint(format!("http://localhost:{port}"))
    }

    /// Create a client for an explicit endpoint such as `http://127.0.0.1:2773`.
    ///
    /// Trailing slashes are removed.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        let http = Client::builder().build()?;
        Ok(Self { http, endpoint })
    }

    /// The endpoint this client talks to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch and parse a secret through the extension.
    ///
    /// # Errors
    /// - `ClientError::MissingSessionToken` if `AWS_SESSION_TOKEN` is unset; no request is sent.
    /// - `ClientError::ExtensionStatus` for any non-2xx response.
    /// - `ClientError::InvalidPayload` if the body or its `SecretString` cannot be parsed.
    pub async fn fetch(&self, secret_name: &str) -> Result<SecretMap> {
        let token = session_token()?;
        let url = format!("{}{}", self.endpoint, EXTENSION_SECRETS_PATH);
        tracing::debug!(%url, secret_name, "Requesting secret from Lambda extension");

        let response = self
            .http
            .get(&url)
            .query(&[(EXTENSION_SECRET_ID_PARAM, secret_name)])
            .header(EXTENSION_TOKEN_HEADER, token.expose_secret())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(secret_name, status = status.as_u16(), "Lambda extension refused secret request");
            return Err(ClientError::ExtensionStatus {
                secret_name: secret_name.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed: ExtensionResponse = serde_json::from_str(&body).map_err(|e| {
            ClientError::InvalidPayload(format!("extension response is not valid JSON: {e}"))
        })?;
        let secret_string = parsed.secret_string.ok_or_else(|| ClientError::MissingSecretString {
            secret_name: secret_name.to_string(),
        })?;

        parse_secret_payload(&secret_string)
    }
}

/// Read the Lambda session token, treating empty values as unset.
fn session_token() -> Result<SecretString> {
    match std::env::var(SESSION_TOKEN_VAR) {
        Ok(token) if !token.trim().is_empty() => Ok(SecretString::new(token.into())),
        _ => Err(ClientError::MissingSessionToken {
            var: SESSION_TOKEN_VAR,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_with_endpoint_trims_trailing_slash() {
        let client = ExtensionClient::with_endpoint("http://127.0.0.1:2773/").unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:2773");
    }

    #[test]
    #[serial]
    fn test_from_env_uses_default_port() {
        temp_env::with_vars([(EXTENSION_PORT_VAR, None::<&str>)], || {
            let client = ExtensionClient::from_env().unwrap();
            assert_eq!(client.endpoint(), "http://localhost:2773");
        });
    }

    #[test]
    #[serial]
    fn test_from_env_honours_port_override() {
        temp_env::with_vars([(EXTENSION_PORT_VAR, Some("4000"))], || {
            let client = ExtensionClient::from_env().unwrap();
            assert_eq!(client.endpoint(), "http://localhost:4000");
        });
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_invalid_port() {
        temp_env::with_vars([(EXTENSION_PORT_VAR, Some("not-a-port"))], || {
            let err = ExtensionClient::from_env().unwrap_err();
            assert!(matches!(err, ClientError::InvalidExtensionPort { .. }));
        });
    }

    #[test]
    #[serial]
    fn test_session_token_whitespace_is_missing() {
        temp_env::with_vars([(SESSION_TOKEN_VAR, Some("   "))], || {
            let err = session_token().unwrap_err();
            assert!(matches!(err, ClientError::MissingSessionToken { .. }));
        });
    }
}
