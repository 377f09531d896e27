// Flowstate API server
// Decision: Single process, in-memory state; restart loses all definitions and instances

use anyhow::{Context, Result};
use flowstate_control_plane::{
    build_app,
    config::ServerConfig,
    storage::InMemoryStore,
    telemetry::{init_tracing, TelemetryConfig},
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine; variables may come from the environment
    let _ = dotenvy::dotenv();

    // Configure via environment variables:
    // - RUST_LOG / LOG_LEVEL: Log filter (default: "flowstate_control_plane=debug,tower_http=debug")
    let telemetry_config = TelemetryConfig::from_env();
    init_tracing(&telemetry_config);

    tracing::info!("flowstate-control-plane starting...");

    let config = ServerConfig::from_env();
    if !config.api_prefix.is_empty() {
        tracing::info!(prefix = %config.api_prefix, "API prefix configured");
    }
    if config.cors_allowed_origins.is_empty() {
        tracing::info!("CORS not configured (same-origin requests only)");
    } else {
        tracing::info!(origins = ?config.cors_allowed_origins, "CORS origins configured");
    }

    let store = Arc::new(InMemoryStore::new());
    let app = build_app(&config, store);

    // Start HTTP server
    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("HTTP server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
