//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the axum Router with all handlers under the `/api` prefix
//! - Wire up middleware (tracing, timeout, request ID, CORS)
//! - Restrict cross-origin access to the configured web origin
//! - Serve on the listener bound by the caller
//!
//! # Design Decisions
//! - The server receives the validated AppConfig at construction and reads
//!   `port`/`web_url` once; it never consults the environment itself
//! - CORS allows exactly one origin (the front-end), with credentials

use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::http::response::{HealthResponse, WelcomeResponse};

/// Request timeout for the public API.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP server for the API.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server over a validated configuration.
    pub fn new(config: AppConfig) -> Self {
        let router = Self::build_router(&config);
        Self { router, config }
    }

    /// Build the axum router with all middleware layers.
    fn build_router(config: &AppConfig) -> Router {
        Router::new()
            .route("/api", get(welcome_handler))
            .route("/api/health", get(health_handler))
            .layer(cors_layer(config))
            .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The routing tree, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Cross-origin policy: exactly the configured front-end origin.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origin = config.web_url.origin().ascii_serialization();
    // The origin is derived from a validated absolute URL.
    let origin = HeaderValue::from_str(&origin).expect("validated origin is a valid header value");

    CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

async fn welcome_handler() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the API",
    })
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::current())
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
