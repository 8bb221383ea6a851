//! Starter HTTP API.
//!
//! A thin HTTP service over a typed runtime configuration loader. The process
//! environment (layered over optional `.env` files) is read and validated once
//! at startup; everything downstream receives the immutable snapshot.

pub mod config;
pub mod http;

pub use config::{AppConfig, EnvName};
pub use http::HttpServer;
