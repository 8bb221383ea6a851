//! The process-wide configuration snapshot.
//!
//! # Responsibilities
//! - Run one validation pass over the process environment
//! - Cache the outcome for the process lifetime
//! - Expose typed, read-only fields to the rest of the service
//!
//! # Design Decisions
//! - `OnceLock` guarantees at-most-once construction: concurrent first calls
//!   all observe the same snapshot, and the environment is never re-read
//! - Subsystems receive the snapshot by reference or clone, never a handle
//!   that could re-derive it

use std::fmt;
use std::sync::OnceLock;

use url::Url;

use crate::config::schema::{self, app_schema};
use crate::config::source::RawEnvironment;
use crate::config::validation::{self, ResolvedConfig, ValidationError};

/// Deployment environment the service runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvName {
    #[default]
    Development,
    Production,
}

impl EnvName {
    pub fn as_str(self) -> &'static str {
        match self {
            EnvName::Development => "development",
            EnvName::Production => "production",
        }
    }
}

impl fmt::Display for EnvName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated, immutable application configuration.
///
/// Constructed from one successful validation pass; a value of this type is
/// proof the environment was acceptable at process start.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub node_env: EnvName,
    pub app_name: String,
    /// Bind port for the HTTP listener.
    pub port: u16,
    /// Allowed origin for cross-origin access control.
    pub web_url: Url,
}

impl AppConfig {
    /// Validate `raw` against the application schema and build the snapshot.
    pub fn from_env(raw: &RawEnvironment) -> Result<Self, ValidationError> {
        let resolved = validation::validate(&app_schema(), raw)?;
        Ok(Self::from_resolved(&resolved))
    }

    fn from_resolved(resolved: &ResolvedConfig) -> Self {
        // A successful validate() pass yields one value per schema field,
        // typed per its kind; anything else is a schema/snapshot mismatch.
        let node_env = match resolved
            .get(schema::NODE_ENV)
            .and_then(|v| v.as_str())
        {
            Some("production") => EnvName::Production,
            _ => EnvName::Development,
        };

        let app_name = resolved
            .get(schema::APP_NAME)
            .and_then(|v| v.as_str())
            .expect("APP_NAME resolved as a string")
            .to_string();

        let port = resolved
            .get(schema::PORT)
            .and_then(|v| v.as_integer())
            .and_then(|n| u16::try_from(n).ok())
            .expect("PORT resolved within the TCP port range");

        let web_url = resolved
            .get(schema::WEB_URL)
            .and_then(|v| v.as_url())
            .expect("WEB_URL resolved as a URL")
            .clone();

        Self {
            node_env,
            app_name,
            port,
            web_url,
        }
    }
}

static CONFIG: OnceLock<Result<AppConfig, ValidationError>> = OnceLock::new();

/// Read the process configuration, validating it on the first call.
///
/// The first caller snapshots the environment (with `.env` overlays) and runs
/// validation; the outcome is cached for the process lifetime. Every later
/// call returns the cached snapshot without touching the environment again,
/// and concurrent first calls all observe the same result.
pub fn get() -> Result<&'static AppConfig, ValidationError> {
    CONFIG
        .get_or_init(|| AppConfig::from_env(&RawEnvironment::from_process()))
        .as_ref()
        .map_err(Clone::clone)
}
