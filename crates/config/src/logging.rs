//! Logging bootstrap for processes that use the loader.
//!
//! The loader itself only emits `tracing` events; this installs a plain
//! `fmt` subscriber filtered by `RUST_LOG` for binaries that have none.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::loader::ConfigError;

/// Default filter when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Install a global `tracing` subscriber with an `EnvFilter` and a `fmt` layer.
///
/// # Errors
/// `ConfigError::Logging` if a global subscriber is already installed.
pub fn init_logging() -> Result<(), ConfigError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer())
        .try_init()
        .map_err(|e| ConfigError::Logging(e.to_string()))
}
