//! SkillSwap real-time gateway.
//!
//! Entry point that loads configuration, initializes logging, wires the
//! realtime engine to its collaborators, and serves the WebSocket and
//! internal HTTP surfaces.

mod error;
mod handlers;
mod middleware;
mod profile;
mod router;
mod state;

use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use skillswap_auth::verifier::JwtVerifier;
use skillswap_core::config::AppConfig;
use skillswap_core::error::AppError;
use skillswap_realtime::{AuthenticationGate, RealtimeEngine};

use crate::profile::HttpProfileStore;
use crate::state::AppState;

#[tokio::main]
async fn main() {
    let env = std::env::var("SKILLSWAP_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting SkillSwap RTC v{}", env!("CARGO_PKG_VERSION"));

    let verifier = Arc::new(JwtVerifier::new(&config.auth));
    let profiles = Arc::new(HttpProfileStore::new(&config.profile)?);
    let gate = Arc::new(AuthenticationGate::new(verifier, profiles));

    let engine = RealtimeEngine::new(config.realtime.clone());

    let state = AppState {
        config: Arc::new(config.clone()),
        engine: engine.clone(),
        gate,
    };
    let app = router::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("SkillSwap RTC listening on {addr}");

    let shutdown_engine = engine.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown");
            if let Err(e) = shutdown_engine.shutdown().await {
                tracing::error!("Engine shutdown error: {e}");
            }
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("SkillSwap RTC shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
