//! Service entry point.
//!
//! Startup order is fixed: logging first, then one configuration validation
//! pass, then the listener. A configuration error stops the process with a
//! non-zero status before anything binds.

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use starter_api::config;
use starter_api::http::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "starter_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("starter-api v{} starting", env!("CARGO_PKG_VERSION"));

    // One aggregated report per restart attempt: every offending variable is
    // named, then the process exits without binding a listener.
    let config = match config::get() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(%err, "invalid configuration");
            std::process::exit(1);
        }
    };

    tracing::info!(
        node_env = %config.node_env,
        app_name = %config.app_name,
        port = config.port,
        web_url = %config.web_url,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    let server = HttpServer::new(config.clone());
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
