//! airdash - real-time air-quality dashboard server
//!
//! This is the main entry point for the airdash application.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

use airdash::handlers::router;
use airdash::{init_tracing, log_error, AirKoreaClient, AirdashError, AppState, Config, Result};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::load()?;

    // Initialize tracing with the configured level
    init_tracing(&config.log_level);

    info!("Starting airdash v{}", env!("CARGO_PKG_VERSION"));

    // Validate configuration
    config.validate().map_err(|e| {
        log_error(&e, "configuration");
        e
    })?;

    let client = AirKoreaClient::new(config.api.clone()).map_err(|e| {
        log_error(&e, "api client");
        e
    })?;

    info!(
        base_url = %config.api.base_url,
        cities = config.cities.len(),
        "Using AirKorea data source"
    );

    // Create the server address
    let addr = SocketAddr::from((
        config
            .server
            .host
            .parse::<std::net::IpAddr>()
            .map_err(|e| AirdashError::Config {
                message: format!("Invalid host address: {}", e),
            })?,
        config.server.port,
    ));

    let state = AppState::new_shared(config, Arc::new(client));
    let app = router(state);

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AirdashError::Server {
            message: format!("Failed to bind to address: {}", e),
        })?;

    // Start the server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AirdashError::Server {
            message: format!("Server error: {}", e),
        })?;

    info!("Server has been gracefully shut down");
    Ok(())
}

/// Wait for a shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
