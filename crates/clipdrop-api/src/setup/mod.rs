//! Application setup and initialization
//!
//! Everything `main` does before serving lives here, so tests can build the same
//! router without binding a socket.

pub mod routes;
pub mod server;
pub mod storage;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use clipdrop_core::Config;
use std::sync::Arc;
use std::time::Duration;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.log_format())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment(),
        "Configuration loaded and validated successfully"
    );

    tokio::fs::create_dir_all(config.download_dir())
        .await
        .with_context(|| format!("Failed to create DOWNLOAD_DIR {}", config.download_dir()))?;

    let storage = storage::setup_storage(&config).await?;
    let state = Arc::new(AppState::new(config.clone(), storage));

    probe_media_tool(&state).await;

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}

/// Log the media tool version. A missing tool is reported but does not stop
/// startup; `/ready` keeps reporting it.
async fn probe_media_tool(state: &AppState) {
    let tool = state.pipeline.tool();
    match tool.version(Duration::from_secs(10)).await {
        Ok(version) => {
            tracing::info!(program = %tool.program(), version = %version, "Media tool available")
        }
        Err(e) => {
            tracing::warn!(program = %tool.program(), error = %e, "Media tool unavailable")
        }
    }
}
