//! Deployment types.
//!
//! Responsibilities:
//! - Define the closed set of runtime platforms a loader can target.
//! - Parse and (de)serialize them from their lowercase names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::loader::ConfigError;

/// Runtime platform the process is deployed on.
///
/// Selects how secrets are retrieved outside of local mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentType {
    /// Long-running container; secrets come straight from Secrets Manager.
    Fargate,
    /// Lambda function; secrets come through the Parameters and Secrets extension.
    Lambda,
}

impl DeploymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fargate => "fargate",
            Self::Lambda => "lambda",
        }
    }
}

impl fmt::Display for DeploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeploymentType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fargate" => Ok(Self::Fargate),
            "lambda" => Ok(Self::Lambda),
            _ => Err(ConfigError::InvalidDeploymentType(s.to_string())),
        }
    }
}
