//! Configuration schema definitions.
//!
//! This module declares the recognized environment surface: for every key, how
//! its raw string is coerced, what default applies when it is absent, and
//! which constraint the coerced value must satisfy. Registration order is
//! preserved so validation reports read in a stable order.

use std::fmt;

use serde_json::Value;
use url::Url;

/// Environment keys recognized by the application schema.
pub const NODE_ENV: &str = "NODE_ENV";
pub const APP_NAME: &str = "APP_NAME";
pub const PORT: &str = "PORT";
pub const WEB_URL: &str = "WEB_URL";

/// Allowed members of the `NODE_ENV` enumeration.
pub const NODE_ENV_VALUES: &[&str] = &["development", "production"];

/// How a raw environment string is coerced into a typed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Taken verbatim.
    String,
    /// Base-10 signed integer. An unparsable value falls back to the default.
    Integer,
    /// Only the literal string `"true"` is true; everything else is false.
    Boolean,
    /// Must parse as an absolute URL.
    Url,
    /// Must be one of the listed strings.
    Enum(&'static [&'static str]),
    /// JSON array. An unparsable value falls back to the default.
    JsonArray,
}

/// A typed configuration value produced by coercion.
///
/// Enum fields resolve to the `String` variant since membership is already
/// checked during coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Boolean(bool),
    Url(Url),
    JsonArray(Vec<Value>),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_url(&self) -> Option<&Url> {
        match self {
            FieldValue::Url(url) => Some(url),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            FieldValue::JsonArray(items) => Some(items),
            _ => None,
        }
    }
}

/// A validation rule applied after coercion. Failures are always fatal, never
/// silently defaulted.
#[derive(Clone, Copy)]
pub struct Constraint {
    /// The rule, quoted verbatim in validation reports.
    pub rule: &'static str,
    /// Predicate over the coerced value.
    pub check: fn(&FieldValue) -> bool,
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraint").field("rule", &self.rule).finish()
    }
}

/// Schema declaration for one configuration key.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Environment variable name, unique within a schema.
    pub key: &'static str,
    pub kind: FieldKind,
    /// Used when the key is absent; a field without one is required.
    pub default: Option<FieldValue>,
    pub constraint: Option<Constraint>,
}

impl FieldSpec {
    pub fn new(key: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            kind,
            default: None,
            constraint: None,
        }
    }

    pub fn with_default(mut self, default: FieldValue) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraint = Some(constraint);
        self
    }
}

/// Duplicate key registered in a schema. This is a defect in schema
/// construction, never a consequence of runtime input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("duplicate configuration key: {key}")]
pub struct DuplicateKeyError {
    pub key: &'static str,
}

/// An ordered set of field specs with unique keys.
#[derive(Debug, Clone, Default)]
pub struct ConfigSchema {
    fields: Vec<FieldSpec>,
}

impl ConfigSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one field. Declaration order is the order of `define_field`
    /// calls and governs both snapshot layout and error reports.
    pub fn define_field(&mut self, spec: FieldSpec) -> Result<(), DuplicateKeyError> {
        if self.fields.iter().any(|f| f.key == spec.key) {
            return Err(DuplicateKeyError { key: spec.key });
        }
        self.fields.push(spec);
        Ok(())
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }
}

fn fits_tcp_port(value: &FieldValue) -> bool {
    matches!(value, FieldValue::Integer(n) if (1..=65535).contains(n))
}

fn default_web_url() -> Url {
    // Compile-time constant, cannot fail to parse.
    Url::parse("http://localhost:3001").expect("default WEB_URL is a valid URL")
}

/// The application schema.
///
/// Adding a configuration key means adding one spec here and one typed field
/// on [`AppConfig`](crate::config::AppConfig).
pub fn app_schema() -> ConfigSchema {
    let mut schema = ConfigSchema::new();
    for spec in [
        FieldSpec::new(NODE_ENV, FieldKind::Enum(NODE_ENV_VALUES))
            .with_default(FieldValue::String("development".into())),
        FieldSpec::new(APP_NAME, FieldKind::String)
            .with_default(FieldValue::String("starter-api".into())),
        FieldSpec::new(PORT, FieldKind::Integer)
            .with_default(FieldValue::Integer(3000))
            .with_constraint(Constraint {
                rule: "must be a positive integer no greater than 65535",
                check: fits_tcp_port,
            }),
        FieldSpec::new(WEB_URL, FieldKind::Url).with_default(FieldValue::Url(default_web_url())),
    ] {
        // The keys above are distinct; a duplicate is a defect in this function.
        schema
            .define_field(spec)
            .expect("duplicate key in application schema");
    }
    schema
}
