//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, middleware, CORS)
//!     → handlers under /api
//!     → response.rs (serialized payloads)
//! ```

pub mod response;
pub mod server;

pub use server::HttpServer;
