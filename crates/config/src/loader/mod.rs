//! Configuration loader for secret-backed configuration.
//!
//! Responsibilities:
//! - Select local env reads or a secret backend strategy from the environment flag.
//! - Overlay non-secret environment variables on top of the base source.
//! - Decode the merged values against the schema and cache them for the process lifetime.
//!
//! Does NOT handle:
//! - Secret backend protocols (delegated to `stowage-client`).
//! - Rotation, retries, or watching secrets for changes.
//!
//! Invariants / Assumptions:
//! - Non-secret keys take precedence over secret or local values.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy` is called.

use std::collections::BTreeMap;

mod builder;
mod env;
mod error;
mod source;

#[cfg(test)]
mod tests;

pub use builder::{ConfigLoader, ConfigLoaderBuilder};
pub use env::env_var_or_none;
pub use error::ConfigError;

/// Raw key/value mapping before schema decoding; `None` means undefined.
pub type RawConfig = BTreeMap<String, Option<String>>;
