//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file → .env.local file → process environment
//!     → source.rs (RawEnvironment, last layer wins)
//!     → schema.rs (recognized keys, kinds, defaults, constraints)
//!     → validation.rs (coerce & validate, aggregate failures)
//!     → snapshot.rs (AppConfig, cached once per process)
//!     → shared by reference/clone with all subsystems
//! ```
//!
//! # Design Decisions
//! - The snapshot is immutable once built; the environment is read exactly once
//! - Type-conversion failures fall back to declared defaults silently
//! - Constraint violations are collected across the whole schema and reported
//!   together, so one restart cycle fixes every misconfiguration

pub mod schema;
pub mod snapshot;
pub mod source;
pub mod validation;

pub use schema::{app_schema, ConfigSchema, Constraint, DuplicateKeyError, FieldKind, FieldSpec, FieldValue};
pub use snapshot::{get, AppConfig, EnvName};
pub use source::RawEnvironment;
pub use validation::{validate, FieldError, ResolvedConfig, ValidationError};
