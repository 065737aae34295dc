//! Error types for configuration loading.
//!
//! Responsibilities:
//! - Define error variants for all configuration loading failures.
//! - Wrap retrieval errors from `stowage-client`.
//!
//! Invariants:
//! - No variant carries a secret value.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::io::ErrorKind;
use thiserror::Error;

use stowage_client::ClientError;

use crate::decode::FieldError;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Secret retrieval failed (missing payload, missing token, upstream status, transport).
    #[error(transparent)]
    Retrieval(#[from] ClientError),

    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("Invalid deployment type {0:?}. Expected \"fargate\" or \"lambda\"")]
    InvalidDeploymentType(String),

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// The merged configuration does not satisfy the schema.
    #[error("Configuration failed schema validation: {}", format_field_errors(.errors))]
    Validation { errors: Vec<FieldError> },

    #[error("Failed to deserialize configuration: {0}")]
    Deserialize(String),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ConfigError {
    /// Field failures when this is a validation error.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation { errors } => errors,
            _ => &[],
        }
    }
}
