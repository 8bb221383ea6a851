//! Response payloads for the public API.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// RFC 3339 UTC timestamp with millisecond precision.
    pub timestamp: String,
    pub service: &'static str,
    pub version: &'static str,
}

impl HealthResponse {
    pub fn current() -> Self {
        Self {
            status: "ok",
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            service: "api",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Body of `GET /api`.
#[derive(Debug, Clone, Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
}
