//! Coercion and validation of raw values against the schema.
//!
//! # Responsibilities
//! - Coerce raw strings into typed values per field kind
//! - Apply defaults for absent keys; flag absent required keys
//! - Apply constraints and collect every fatal failure before reporting
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - A type-conversion failure with a default present falls back silently;
//!   enum-membership, URL, and constraint failures are always fatal
//! - Validation is a pure function over (schema, raw input)

use std::fmt;

use serde_json::Value;
use url::Url;

use crate::config::schema::{ConfigSchema, FieldKind, FieldSpec, FieldValue};
use crate::config::source::RawEnvironment;

/// One fatal validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// A field with no default was absent from the input.
    #[error("{key}: required but not set")]
    MissingRequired { key: &'static str },

    /// A present value failed its membership, syntax, or constraint rule.
    #[error("{key}: {reason}")]
    ConstraintViolation { key: &'static str, reason: String },
}

impl FieldError {
    pub fn key(&self) -> &'static str {
        match self {
            FieldError::MissingRequired { key } => key,
            FieldError::ConstraintViolation { key, .. } => key,
        }
    }
}

/// Aggregate of every fatal failure collected in one validation pass.
///
/// `Clone` so the cached facade cell can hand copies to later callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    /// Per-field failures in schema declaration order.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed: ")?;
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Typed values for every schema field, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    values: Vec<(&'static str, FieldValue)>,
}

impl ResolvedConfig {
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }
}

/// Validate raw input against a schema.
///
/// Walks fields in declaration order: absent keys take their default (or are
/// recorded as missing), present keys are coerced per kind, then constraints
/// run on the outcome. Fatal failures are collected across the whole schema so
/// one report names every offending field.
pub fn validate(schema: &ConfigSchema, raw: &RawEnvironment) -> Result<ResolvedConfig, ValidationError> {
    let mut values = Vec::with_capacity(schema.fields().len());
    let mut errors = Vec::new();

    for spec in schema.fields() {
        let value = match raw.get(spec.key) {
            None => match spec.default.clone() {
                Some(default) => default,
                None => {
                    errors.push(FieldError::MissingRequired { key: spec.key });
                    continue;
                }
            },
            Some(raw_value) => match coerce(spec, raw_value) {
                Ok(value) => value,
                Err(reason) => {
                    errors.push(FieldError::ConstraintViolation {
                        key: spec.key,
                        reason,
                    });
                    continue;
                }
            },
        };

        if let Some(constraint) = &spec.constraint {
            if !(constraint.check)(&value) {
                errors.push(FieldError::ConstraintViolation {
                    key: spec.key,
                    reason: constraint.rule.to_string(),
                });
                continue;
            }
        }

        values.push((spec.key, value));
    }

    if errors.is_empty() {
        Ok(ResolvedConfig { values })
    } else {
        Err(ValidationError { errors })
    }
}

/// Coerce one raw string per the field kind.
///
/// Integer and JSON-array conversion failures fall back to the declared
/// default without surfacing an error; URL and enum failures are fatal.
fn coerce(spec: &FieldSpec, raw: &str) -> Result<FieldValue, String> {
    match spec.kind {
        FieldKind::String => Ok(FieldValue::String(raw.to_string())),
        FieldKind::Integer => match raw.parse::<i64>() {
            Ok(n) => Ok(FieldValue::Integer(n)),
            Err(_) => match spec.default.clone() {
                Some(default) => Ok(default),
                None => Err("must be a base-10 integer".to_string()),
            },
        },
        FieldKind::Boolean => Ok(FieldValue::Boolean(raw == "true")),
        FieldKind::Url => Url::parse(raw)
            .map(FieldValue::Url)
            .map_err(|_| "must be a syntactically valid URL".to_string()),
        FieldKind::Enum(allowed) => {
            if allowed.contains(&raw) {
                Ok(FieldValue::String(raw.to_string()))
            } else {
                Err(format!("must be one of {{{}}}", allowed.join(", ")))
            }
        }
        FieldKind::JsonArray => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Array(items)) => Ok(FieldValue::JsonArray(items)),
            _ => match spec.default.clone() {
                Some(default) => Ok(default),
                None => Err("must be a JSON array".to_string()),
            },
        },
    }
}
