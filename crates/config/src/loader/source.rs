//! Secret retrieval strategy selection.
//!
//! Each deployment type maps to exactly one strategy; the strategy and its
//! network client are built once, when the loader is constructed.

use stowage_client::{ExtensionClient, SecretMap, SecretStore, fetch_secret_direct};

use crate::types::DeploymentType;

/// Where secrets come from outside of local mode.
#[derive(Debug)]
pub(crate) enum SecretSource<S> {
    /// Direct `GetSecretValue` calls against Secrets Manager.
    Direct(S),
    /// The Lambda Parameters and Secrets extension.
    Extension(ExtensionClient),
}

impl<S: SecretStore> SecretSource<S> {
    pub(crate) fn deployment(&self) -> DeploymentType {
        match self {
            Self::Direct(_) => DeploymentType::Fargate,
            Self::Extension(_) => DeploymentType::Lambda,
        }
    }

    pub(crate) async fn fetch(&self, secret_name: &str) -> stowage_client::Result<SecretMap> {
        match self {
            Self::Direct(store) => fetch_secret_direct(store, secret_name).await,
            Self::Extension(client) => client.fetch(secret_name).await,
        }
    }
}
