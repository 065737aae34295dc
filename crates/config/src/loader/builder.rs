//! Configuration loader implementation.
//!
//! Responsibilities:
//! - Provide a builder for `ConfigLoader` that creates the secret backend client up front.
//! - Assemble raw configuration from local env vars or the secret backend.
//! - Overlay non-secret env vars, decode against the schema, and cache the result.
//!
//! Does NOT handle:
//! - Backend protocol details (see `stowage-client`).
//! - Coercion rules (see `decode.rs`).
//!
//! Invariants / Assumptions:
//! - Non-secret keys always win over same-named secret or local values, even when unset.
//! - A successful load is cached for the lifetime of the loader; concurrent first
//!   calls share one retrieval.
//! - A failed load leaves the cache empty so the next call retries from scratch.
//! - The environment flag must be set outside local mode; it is part of the secret name.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

use std::sync::Arc;

use stowage_client::{ExtensionClient, SecretStore, SecretsManagerClient, secrets_manager_client};
use tokio::sync::OnceCell;

use super::env::{env_var_or_none, read_env_keys};
use super::error::ConfigError;
use super::source::SecretSource;
use super::RawConfig;
use crate::constants::{
    DEFAULT_ENVIRONMENT_VAR, DEFAULT_SECRET_SUFFIX, DOTENV_DISABLED_VAR, LOCAL_ENVIRONMENT,
};
use crate::decode::decode;
use crate::schema::Schema;
use crate::types::DeploymentType;
use crate::value::LoadedConfig;

/// Builder for [`ConfigLoader`].
#[derive(Debug)]
pub struct ConfigLoaderBuilder {
    deployment: DeploymentType,
    service_name: String,
    schema: Schema,
    unsecret_keys: Vec<String>,
    region: Option<String>,
    environment_var: String,
    secret_suffix: String,
    extension_endpoint: Option<String>,
}

impl ConfigLoaderBuilder {
    pub fn new(deployment: DeploymentType, service_name: impl Into<String>, schema: Schema) -> Self {
        Self {
            deployment,
            service_name: service_name.into(),
            schema,
            unsecret_keys: Vec::new(),
            region: None,
            environment_var: DEFAULT_ENVIRONMENT_VAR.to_string(),
            secret_suffix: DEFAULT_SECRET_SUFFIX.to_string(),
            extension_endpoint: None,
        }
    }

    /// Keys always read from the process environment, overriding secret values.
    pub fn unsecret_keys<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.unsecret_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// AWS region of the Secrets Manager client.
    ///
    /// Without it the SDK's default region chain applies.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Name of the environment flag variable (default `APP_ENV`).
    pub fn environment_var(mut self, var: impl Into<String>) -> Self {
        self.environment_var = var.into();
        self
    }

    /// Suffix of the secret name (default `doppler`).
    pub fn secret_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.secret_suffix = suffix.into();
        self
    }

    /// Override the Lambda extension endpoint (primarily for testing).
    pub fn extension_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.extension_endpoint = Some(endpoint.into());
        self
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var(DOTENV_DISABLED_VAR).ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from a `.env` file if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the file is not loaded.
    /// Missing `.env` files are silently ignored.
    ///
    /// # Errors
    ///
    /// - `ConfigError::DotenvParse` if the file has invalid syntax.
    /// - `ConfigError::DotenvIo` if the file exists but cannot be read.
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }
        Self::map_dotenv_result(dotenvy::dotenv().map(|_| ()))?;
        Ok(self)
    }

    /// Load environment variables from a specific `.env` file.
    ///
    /// Same gate and error mapping as [`load_dotenv`](Self::load_dotenv).
    pub fn load_dotenv_from(self, path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }
        Self::map_dotenv_result(dotenvy::from_path(path.as_ref()))?;
        Ok(self)
    }

    fn map_dotenv_result(result: Result<(), dotenvy::Error>) -> Result<(), ConfigError> {
        match result {
            Ok(()) => Ok(()),
            Err(e) if Self::is_not_found(&e) => Ok(()),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    /// Check if a dotenv error indicates the file was not found.
    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Build the loader, creating the backend client for the deployment type.
    ///
    /// `Fargate` creates a Secrets Manager client for the configured region;
    /// `Lambda` creates an HTTP client for the extension.
    pub async fn build(self) -> Result<ConfigLoader, ConfigError> {
        let source = match self.deployment {
            DeploymentType::Fargate => {
                SecretSource::Direct(secrets_manager_client(self.region.as_deref()).await)
            }
            DeploymentType::Lambda => SecretSource::Extension(self.extension_client()?),
        };
        self.finish(source)
    }

    /// Build the loader with a caller-supplied secret store for the direct strategy.
    ///
    /// The store is only used for `Fargate`; `Lambda` still goes through the extension.
    pub fn build_with_store<S: SecretStore>(self, store: S) -> Result<ConfigLoader<S>, ConfigError> {
        let source = match self.deployment {
            DeploymentType::Fargate => SecretSource::Direct(store),
            DeploymentType::Lambda => SecretSource::Extension(self.extension_client()?),
        };
        self.finish(source)
    }

    fn extension_client(&self) -> Result<ExtensionClient, ConfigError> {
        let client = match &self.extension_endpoint {
            Some(endpoint) => ExtensionClient::with_endpoint(endpoint.clone())?,
            None => ExtensionClient::from_env()?,
        };
        Ok(client)
    }

    fn finish<S>(self, source: SecretSource<S>) -> Result<ConfigLoader<S>, ConfigError> {
        if self.service_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "service_name".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if let Some(key) = self.unsecret_keys.iter().find(|k| k.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                var: "unsecret_keys".to_string(),
                message: format!("contains an empty key name {key:?}"),
            });
        }

        tracing::debug!(
            service = %self.service_name,
            deployment = %self.deployment,
            region = ?self.region,
            "Initialized configuration loader"
        );

        Ok(ConfigLoader {
            service_name: self.service_name,
            schema: self.schema,
            unsecret_keys: self.unsecret_keys,
            environment_var: self.environment_var,
            secret_suffix: self.secret_suffix,
            source,
            loaded: OnceCell::new(),
        })
    }
}

/// Loads secret-backed configuration once and caches it.
pub struct ConfigLoader<S = SecretsManagerClient> {
    service_name: String,
    schema: Schema,
    unsecret_keys: Vec<String>,
    environment_var: String,
    secret_suffix: String,
    source: SecretSource<S>,
    loaded: OnceCell<Arc<LoadedConfig>>,
}

impl ConfigLoader {
    /// Start building a loader for `service_name` validated by `schema`.
    pub fn builder(
        deployment: DeploymentType,
        service_name: impl Into<String>,
        schema: Schema,
    ) -> ConfigLoaderBuilder {
        ConfigLoaderBuilder::new(deployment, service_name, schema)
    }
}

impl<S: SecretStore> ConfigLoader<S> {
    /// Load, validate, and cache the configuration.
    ///
    /// The first successful call fetches and decodes; later calls return the
    /// same `Arc` without any I/O.
    ///
    /// # Errors
    ///
    /// - `ConfigError::MissingEnvVar` if the environment flag is unset outside local mode.
    /// - `ConfigError::Retrieval` for missing payloads, a missing session token,
    ///   non-success extension responses, or transport failures.
    /// - `ConfigError::Validation` if the merged values do not satisfy the schema.
    pub async fn load(&self) -> Result<Arc<LoadedConfig>, ConfigError> {
        if let Some(loaded) = self.loaded.get() {
            tracing::debug!(service = %self.service_name, "Returning cached configuration");
            return Ok(Arc::clone(loaded));
        }

        let loaded = self.loaded.get_or_try_init(|| self.load_uncached()).await?;
        Ok(Arc::clone(loaded))
    }

    async fn load_uncached(&self) -> Result<Arc<LoadedConfig>, ConfigError> {
        let raw = self.assemble_raw().await?;
        let config = decode(&self.schema, &raw)?;
        tracing::info!(
            service = %self.service_name,
            keys = config.len(),
            "Configuration loaded"
        );
        Ok(Arc::new(config))
    }

    /// Build the merged raw mapping: base source first, non-secret overlay second.
    async fn assemble_raw(&self) -> Result<RawConfig, ConfigError> {
        let mut raw = if self.is_local() {
            tracing::info!(service = %self.service_name, "Loading configuration from local environment");
            read_env_keys(self.schema.keys())
        } else {
            let secret_name = self.secret_name()?;
            tracing::info!(
                service = %self.service_name,
                deployment = %self.deployment(),
                %secret_name,
                "Loading configuration from secret backend"
            );
            self.source.fetch(&secret_name).await?
        };

        raw.extend(read_env_keys(self.unsecret_keys.iter().map(String::as_str)));
        Ok(raw)
    }

    /// The secret name, `<service>-<environment>/<suffix>`.
    ///
    /// # Errors
    /// `ConfigError::MissingEnvVar` if the environment flag is unset or blank.
    pub fn secret_name(&self) -> Result<String, ConfigError> {
        let environment = self
            .environment_name()
            .ok_or_else(|| ConfigError::MissingEnvVar(self.environment_var.clone()))?;
        Ok(format!(
            "{}-{}/{}",
            self.service_name, environment, self.secret_suffix
        ))
    }

    /// Current value of the environment flag.
    pub fn environment_name(&self) -> Option<String> {
        env_var_or_none(&self.environment_var)
    }

    /// Whether the environment flag selects local mode.
    pub fn is_local(&self) -> bool {
        self.environment_name().as_deref() == Some(LOCAL_ENVIRONMENT)
    }

    pub fn deployment(&self) -> DeploymentType {
        self.source.deployment()
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn unsecret_keys(&self) -> &[String] {
        &self.unsecret_keys
    }

    /// The cached configuration, if a load has succeeded.
    pub fn cached(&self) -> Option<Arc<LoadedConfig>> {
        self.loaded.get().cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.initialized()
    }
}
