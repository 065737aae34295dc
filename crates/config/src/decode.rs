//! Schema decoding of raw configuration.
//!
//! Responsibilities:
//! - Coerce raw string values into the kinds declared by a [`Schema`].
//! - Apply defaults for absent keys.
//! - Collect every field failure into a single validation error.
//!
//! Does NOT handle:
//! - Reading values from the environment or the secret backend (see `loader/`).
//!
//! Invariants:
//! - Keys not declared in the schema are dropped.
//! - Error messages name the field and the expected kind, never the raw value.
//! - Integers and floats are parsed from the trimmed value; floats must be finite.

use std::collections::BTreeMap;
use std::fmt;

use secrecy::SecretString;
use url::Url;

use crate::loader::{ConfigError, RawConfig};
use crate::schema::{FieldKind, Schema};
use crate::value::{ConfigValue, LoadedConfig};

/// Why a single field failed to decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// Required key absent after merging.
    Missing,
    /// Value present but not a valid instance of the declared kind.
    Mismatch { expected: String },
}

/// A decoding failure for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub kind: FieldErrorKind,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FieldErrorKind::Missing => write!(f, "{}: missing required value", self.field),
            FieldErrorKind::Mismatch { expected } => write!(f, "{}: expected {}", self.field, expected),
        }
    }
}

/// Coerce one raw value into `kind`.
///
/// On failure returns the expected-kind description.
pub(crate) fn coerce(kind: &FieldKind, raw: &str) -> Result<ConfigValue, String> {
    let mismatch = || kind.to_string();
    match kind {
        FieldKind::String => Ok(ConfigValue::String(raw.to_string())),
        FieldKind::Secret => Ok(ConfigValue::Secret(SecretString::new(raw.into()))),
        FieldKind::Integer => raw
            .trim()
            .parse::<i64>()
            .map(ConfigValue::Integer)
            .map_err(|_| mismatch()),
        FieldKind::Float => match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(ConfigValue::Float(value)),
            _ => Err(mismatch()),
        },
        FieldKind::Boolean => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(ConfigValue::Boolean(true)),
            "false" | "0" => Ok(ConfigValue::Boolean(false)),
            _ => Err(mismatch()),
        },
        FieldKind::Url => Url::parse(raw.trim())
            .map(ConfigValue::Url)
            .map_err(|_| mismatch()),
        FieldKind::OneOf(values) => values
            .iter()
            .find(|v| v.as_str() == raw)
            .map(|v| ConfigValue::String(v.clone()))
            .ok_or_else(mismatch),
    }
}

/// Decode a merged raw mapping against `schema`.
///
/// # Errors
/// `ConfigError::Validation` listing every missing or mistyped field.
pub fn decode(schema: &Schema, raw: &RawConfig) -> Result<LoadedConfig, ConfigError> {
    let mut values = BTreeMap::new();
    let mut errors = Vec::new();

    for field in schema.fields() {
        let present = raw.get(&field.name).and_then(Option::as_deref);
        let Some(value) = present.or(field.default.as_deref()) else {
            if field.required {
                errors.push(FieldError {
                    field: field.name.clone(),
                    kind: FieldErrorKind::Missing,
                });
            }
            continue;
        };

        match coerce(&field.kind, value) {
            Ok(decoded) => {
                values.insert(field.name.clone(), decoded);
            }
            Err(expected) => errors.push(FieldError {
                field: field.name.clone(),
                kind: FieldErrorKind::Mismatch { expected },
            }),
        }
    }

    let ignored = raw.keys().filter(|k| schema.field(k).is_none()).count();
    if ignored > 0 {
        tracing::debug!(ignored, "Dropped keys not declared in the schema");
    }

    if errors.is_empty() {
        Ok(LoadedConfig::from_values(values))
    } else {
        Err(ConfigError::Validation { errors })
    }
}
