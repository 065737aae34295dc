//! Secret retrieval for Stowage.
//!
//! This crate fetches named secret payloads either directly from AWS Secrets
//! Manager or through the AWS Parameters and Secrets Lambda extension, which
//! runs as an HTTP sidecar next to the function. Both paths yield the same
//! flat [`SecretMap`].

pub mod constants;
pub mod error;
pub mod extension;
pub mod payload;
pub mod store;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use aws_sdk_secretsmanager::Client as SecretsManagerClient;
pub use error::{ClientError, Result};
pub use extension::ExtensionClient;
pub use payload::{SecretMap, parse_secret_payload};
pub use store::{SecretStore, fetch_secret_direct, secrets_manager_client};
