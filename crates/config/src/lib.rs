//! Secret-backed configuration loading for Stowage.
//!
//! This crate loads a service's configuration once per process: from plain
//! environment variables in local mode, or from AWS Secrets Manager (directly
//! or through the Lambda extension) otherwise. Designated non-secret keys are
//! always read from the environment and win over secret values. The merged
//! mapping is decoded against a declared [`Schema`].
//!
//! ```rust,ignore
//! use stowage_config::{ConfigLoader, DeploymentType, FieldKind, Schema};
//!
//! let schema = Schema::builder()
//!     .required("DB_URL", FieldKind::Url)
//!     .with_default("LOG_LEVEL", FieldKind::String, "info")
//!     .build()?;
//!
//! let loader = ConfigLoader::builder(DeploymentType::Fargate, "billing", schema)
//!     .unsecret_keys(["LOG_LEVEL"])
//!     .region("eu-west-1")
//!     .build()
//!     .await?;
//!
//! let config = loader.load().await?;
//! ```

pub mod constants;
mod decode;
mod loader;
pub mod logging;
mod schema;
mod types;
mod value;

pub use decode::{FieldError, FieldErrorKind, decode};
pub use loader::{ConfigError, ConfigLoader, ConfigLoaderBuilder, RawConfig, env_var_or_none};
pub use schema::{FieldKind, FieldSpec, Schema, SchemaBuilder};
pub use types::DeploymentType;
pub use value::{ConfigValue, LoadedConfig};

