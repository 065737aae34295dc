//! Declarative configuration schema.
//!
//! Responsibilities:
//! - Describe the expected configuration keys, their kinds, and whether they are required.
//! - Validate the schema itself at build time (unique names, defaults that decode).
//!
//! Does NOT handle:
//! - Decoding raw values (see `decode.rs`).
//!
//! Invariants:
//! - Field names are unique and non-empty.
//! - Field order is declaration order; local mode reads variables in this order.
//! - A field with a default is never reported as missing.

use std::fmt;

use crate::decode::coerce;
use crate::loader::ConfigError;

/// The type a configuration value decodes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Float,
    Boolean,
    Url,
    /// A string kept in a `SecretString`; never shown by `Debug`.
    Secret,
    /// A string restricted to a fixed set of values.
    OneOf(Vec<String>),
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Integer => f.write_str("integer"),
            Self::Float => f.write_str("number"),
            Self::Boolean => f.write_str("boolean"),
            Self::Url => f.write_str("URL"),
            Self::Secret => f.write_str("secret string"),
            Self::OneOf(values) => write!(f, "one of [{}]", values.join(", ")),
        }
    }
}

/// A single expected configuration key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    /// Raw value used when the key is absent.
    pub default: Option<String>,
}

/// An immutable, ordered set of [`FieldSpec`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Field names in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Builder for [`Schema`].
///
/// # Example
///
/// ```rust
/// use stowage_config::{FieldKind, Schema};
///
/// let schema = Schema::builder()
///     .required("DB_URL", FieldKind::Url)
///     .optional("LOG_LEVEL", FieldKind::String)
///     .with_default("PORT", FieldKind::Integer, "8080")
///     .build()
///     .unwrap();
/// assert_eq!(schema.len(), 3);
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<FieldSpec>,
}

impl SchemaBuilder {
    /// Add a key that must be present after merging.
    pub fn required(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            kind,
            required: true,
            default: None,
        });
        self
    }

    /// Add a key that may be absent.
    pub fn optional(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            kind,
            required: false,
            default: None,
        });
        self
    }

    /// Add a key that falls back to `default` when absent.
    pub fn with_default(
        mut self,
        name: impl Into<String>,
        kind: FieldKind,
        default: impl Into<String>,
    ) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            kind,
            required: false,
            default: Some(default.into()),
        });
        self
    }

    /// Add a prebuilt field.
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// Validate and build the schema.
    ///
    /// # Errors
    /// `ConfigError::InvalidSchema` for empty or duplicate names, an empty
    /// `OneOf` set, or a default that does not decode to the field's kind.
    pub fn build(self) -> Result<Schema, ConfigError> {
        for (index, field) in self.fields.iter().enumerate() {
            if field.name.trim().is_empty() {
                return Err(ConfigError::InvalidSchema(format!(
                    "field #{index} has an empty name"
                )));
            }
            if self.fields[..index].iter().any(|f| f.name == field.name) {
                return Err(ConfigError::InvalidSchema(format!(
                    "field {} is declared more than once",
                    field.name
                )));
            }
            if matches!(&field.kind, FieldKind::OneOf(values) if values.is_empty()) {
                return Err(ConfigError::InvalidSchema(format!(
                    "field {} allows no values",
                    field.name
                )));
            }
            if let Some(default) = &field.default
                && coerce(&field.kind, default).is_err()
            {
                return Err(ConfigError::InvalidSchema(format!(
                    "default for {} is not a valid {}",
                    field.name, field.kind
                )));
            }
        }

        Ok(Schema {
            fields: self.fields,
        })
    }
}
