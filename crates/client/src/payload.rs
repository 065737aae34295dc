//! Secret payload parsing.
//!
//! Responsibilities:
//! - Turn a JSON-encoded secret string into a flat key/value mapping.
//!
//! Does NOT handle:
//! - Type coercion of values (the schema decoder in `stowage-config` does that).
//!
//! Invariants:
//! - The payload must be a JSON object.
//! - Strings are kept verbatim; numbers and booleans keep their JSON text form.
//! - `null` maps to `None`.
//! - Nested arrays and objects are rejected; error messages name the key, never the value.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{ClientError, Result};

/// Flat mapping from key to an optional string value.
pub type SecretMap = BTreeMap<String, Option<String>>;

/// Parse a JSON-encoded secret payload into a [`SecretMap`].
pub fn parse_secret_payload(payload: &str) -> Result<SecretMap> {
    let value: Value = serde_json::from_str(payload).map_err(|e| {
        ClientError::InvalidPayload(format!(
            "secret is not valid JSON (line {}, column {})",
            e.line(),
            e.column()
        ))
    })?;

    let Value::Object(entries) = value else {
        return Err(ClientError::InvalidPayload(
            "secret must be a JSON object".to_string(),
        ));
    };

    entries
        .into_iter()
        .map(|(key, value)| {
            let flat = match value {
                Value::Null => None,
                Value::String(s) => Some(s),
                Value::Bool(b) => Some(b.to_string()),
                Value::Number(n) => Some(n.to_string()),
                Value::Array(_) | Value::Object(_) => {
                    return Err(ClientError::InvalidPayload(format!(
                        "value for key {key} must be a scalar"
                    )));
                }
            };
            Ok((key, flat))
        })
        .collect()
}
