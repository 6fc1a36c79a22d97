// src/server.rs
// Process wiring: provider client, router, listener, shutdown

use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::api::http::create_router;
use crate::config::ServiceConfig;
use crate::llm::OpenAiClient;
use crate::state::AppState;

/// Build application state around the one provider client for this process
pub fn build_state(config: &ServiceConfig) -> AppState {
    let client = OpenAiClient::new(&config.provider);
    if !client.has_api_key() {
        warn!("OPENAI_API_KEY is not set - requests will fail until it is provided");
    }
    info!(url = %client.responses_url(), model = %config.provider.model, "Model provider configured");
    AppState::new(Arc::new(client))
}

/// Run the HTTP server until Ctrl+C or SIGTERM
pub async fn run(config: ServiceConfig, host: &str, port: u16) -> Result<()> {
    let state = build_state(&config);
    let app = create_router(state, config.max_body_bytes);

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!("Sentiment service listening on http://{}", listener.local_addr()?);
    info!("Endpoints: POST /comment, GET /health");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler for SIGTERM and Ctrl+C
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections...");
}
