//! Interpreter HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::time::Duration;

use infrastructure::{AppConfig, Environment, TelemetryConfig, build_interpreter, init_logging};
use presentation_http::{
    error::set_expose_internal_errors, routes, spawn_session_cleanup_task, state::AppState,
};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let loaded = AppConfig::load();

    let telemetry = loaded
        .as_ref()
        .map_or_else(|_| TelemetryConfig::default(), |c| c.telemetry.clone());
    init_logging(&telemetry)?;

    info!("Interpreter v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = loaded.unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    set_expose_internal_errors(config.environment != Environment::Production);

    let interpreter = build_interpreter(&config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize interpreter: {e}"))?;

    info!(
        environment = %config.environment,
        host = %config.server.host,
        port = config.server.port,
        languages = interpreter.catalog.len(),
        "Configuration loaded"
    );

    let cleanup_handle = config.sessions.idle_ttl().map(|ttl| {
        spawn_session_cleanup_task(
            interpreter.sessions.clone(),
            ttl,
            config.sessions.cleanup_interval(),
        )
    });

    let state = AppState::new(interpreter.service.clone());
    let app = routes::create_app(state, &config.server);

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    if let Some(handle) = cleanup_handle {
        handle.abort();
    }

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("Waiting up to {:?} for connections to close...", timeout);
    tokio::spawn(async move {
        tokio::time::sleep(timeout).await;
        warn!("Graceful shutdown timed out, exiting");
        std::process::exit(1);
    });
}
