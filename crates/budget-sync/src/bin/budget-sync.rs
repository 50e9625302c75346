//! Budget sync service binary.
//!
//! Standalone HTTP service for Asana webhook handling.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use budget_sync::{config::Config, server, AsanaClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("budget_sync=info".parse()?))
        .init();

    info!("Starting budget sync service...");

    // Load configuration
    let config = Config::default();

    if config.project_gid.is_empty() {
        warn!("ASANA_PROJECT_GID is not set - webhook events cannot trigger aggregation");
    }

    // Initialize Asana client
    let asana_client = if let Some(token) = &config.access_token {
        match AsanaClient::with_base_url(token, &config.api_base_url) {
            Ok(client) => {
                info!("Asana API client configured");
                Some(client)
            }
            Err(e) => {
                warn!(error = %e, "Failed to create Asana client");
                None
            }
        }
    } else {
        warn!("No ASANA_ACCESS_TOKEN configured - outbound API calls are disabled");
        None
    };

    // Build application state
    let state = server::AppState {
        config: config.clone(),
        asana_client,
    };

    // Build router
    let app = server::build_router(state);

    // Bind and serve
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(port = config.port, "Budget sync service listening");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
