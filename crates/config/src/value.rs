//! Decoded configuration values.
//!
//! Responsibilities:
//! - Hold the typed result of a schema decode.
//! - Provide typed accessors and conversion into caller-defined serde structs.
//!
//! Invariants:
//! - Secret values are wrapped in `SecretString` and redacted by `Debug`.
//! - A `LoadedConfig` is never mutated after decoding.

use std::collections::BTreeMap;

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};
use url::Url;

use crate::loader::ConfigError;

/// A single decoded value.
#[derive(Debug, Clone)]
pub enum ConfigValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Url(Url),
    Secret(SecretString),
}

impl ConfigValue {
    fn to_json(&self) -> Value {
        match self {
            Self::String(s) => Value::String(s.clone()),
            Self::Integer(i) => Value::Number((*i).into()),
            // Non-finite floats are rejected at decode time.
            Self::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            Self::Boolean(b) => Value::Bool(*b),
            Self::Url(u) => Value::String(u.to_string()),
            Self::Secret(s) => Value::String(s.expose_secret().to_string()),
        }
    }
}

/// Schema-decoded configuration.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    values: BTreeMap<String, ConfigValue>,
}

impl LoadedConfig {
    pub(crate) fn from_values(values: BTreeMap<String, ConfigValue>) -> Self {
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Keys present after decoding, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// String value of a `String` or `OneOf` field.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.values.get(key)? {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        match self.values.get(key)? {
            ConfigValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        match self.values.get(key)? {
            ConfigValue::Float(f) => Some(*f),
            ConfigValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.values.get(key)? {
            ConfigValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn get_url(&self, key: &str) -> Option<&Url> {
        match self.values.get(key)? {
            ConfigValue::Url(u) => Some(u),
            _ => None,
        }
    }

    pub fn get_secret(&self, key: &str) -> Option<&SecretString> {
        match self.values.get(key)? {
            ConfigValue::Secret(s) => Some(s),
            _ => None,
        }
    }

    /// Deserialize the decoded values into a caller-defined struct.
    ///
    /// Keys map to field names as-is, so use `#[serde(rename = "...")]` or
    /// `#[serde(rename_all = "SCREAMING_SNAKE_CASE")]` for env-style keys.
    /// Secret fields can be typed as `secrecy::SecretString`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        let object: Map<String, Value> = self
            .values
            .iter()
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect();
        serde_json::from_value(Value::Object(object))
            .map_err(|e| ConfigError::Deserialize(self.redact(e.to_string())))
    }

    /// Mask every secret value that appears in `message`.
    fn redact(&self, mut message: String) -> String {
        for value in self.values.values() {
            if let ConfigValue::Secret(secret) = value {
                let exposed = secret.expose_secret();
                if !exposed.is_empty() {
                    message = message.replace(exposed, "[REDACTED]");
                }
            }
        }
        message
    }
}
