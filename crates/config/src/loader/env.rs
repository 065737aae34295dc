//! Environment variable reads for configuration.
//!
//! Responsibilities:
//! - Read single control variables (the environment flag) with empty/whitespace filtering.
//! - Read a list of configuration keys into a raw configuration mapping.
//!
//! Does NOT handle:
//! - Secret backend retrieval (see `source.rs`).
//! - `.env` file loading (handled by `ConfigLoader::load_dotenv`).
//!
//! Invariants:
//! - `env_var_or_none` treats empty or whitespace-only values as unset and trims the rest.
//! - `read_env_keys` passes values through verbatim; only an unset variable is `None`.
//! - Every requested key appears in the mapping.

use super::RawConfig;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            // No trimming needed, return original to avoid allocation
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Read each key from the process environment, keeping empty and padded values as-is.
pub(crate) fn read_env_keys<'a>(keys: impl IntoIterator<Item = &'a str>) -> RawConfig {
    keys.into_iter()
        .map(|key| (key.to_string(), std::env::var(key).ok()))
        .collect()
}
