//! Direct retrieval from AWS Secrets Manager.
//!
//! Responsibilities:
//! - Define the [`SecretStore`] seam over the Secrets Manager `GetSecretValue` call.
//! - Construct the SDK client for a region.
//! - Implement the direct retrieval strategy on top of any [`SecretStore`].
//!
//! Does NOT handle:
//! - Retrieval through the Lambda extension (see `extension.rs`).
//! - Retries; SDK defaults apply.

use std::future::Future;

use aws_config::{BehaviorVersion, Region};
use aws_sdk_secretsmanager::error::DisplayErrorContext;

use crate::error::{ClientError, Result};
use crate::payload::{SecretMap, parse_secret_payload};

/// A backend that can return the string payload of a named secret.
///
/// `Ok(None)` means the secret exists but has no string payload.
pub trait SecretStore: Send + Sync {
    fn get_secret_string(
        &self,
        secret_id: &str,
    ) -> impl Future<Output = Result<Option<String>>> + Send;
}

impl SecretStore for aws_sdk_secretsmanager::Client {
    async fn get_secret_string(&self, secret_id: &str) -> Result<Option<String>> {
        let output = self
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|e| ClientError::SecretsManager(DisplayErrorContext(&e).to_string()))?;

        Ok(output.secret_string().map(str::to_owned))
    }
}

/// Build a Secrets Manager client.
///
/// When `region` is `None` the SDK's default region chain applies
/// (`AWS_REGION`, profile, instance metadata).
pub async fn secrets_manager_client(region: Option<&str>) -> aws_sdk_secretsmanager::Client {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = region {
        loader = loader.region(Region::new(region.to_owned()));
    }
    let sdk_config = loader.load().await;
    tracing::debug!(region = ?sdk_config.region(), "Created Secrets Manager client");
    aws_sdk_secretsmanager::Client::new(&sdk_config)
}

/// Fetch and parse a secret directly from the store.
///
/// # Errors
/// - `ClientError::MissingSecretString` if the secret has no string payload.
/// - `ClientError::InvalidPayload` if the payload is not a flat JSON object.
/// - Any error surfaced by the store itself.
pub async fn fetch_secret_direct<S: SecretStore>(store: &S, secret_name: &str) -> Result<SecretMap> {
    tracing::debug!(secret_name, "Requesting secret from Secrets Manager");

    let payload = store
        .get_secret_string(secret_name)
        .await?
        .ok_or_else(|| ClientError::MissingSecretString {
            secret_name: secret_name.to_string(),
        })?;

    parse_secret_payload(&payload)
}
