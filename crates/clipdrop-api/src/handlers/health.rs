//! Liveness and readiness probes

use crate::constants::READINESS_TIMEOUT_SECS;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct LivenessResponse {
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReadinessResponse {
    pub status: String,
    /// `ready`, or why the media tool could not be run
    pub media_tool: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_tool_version: Option<String>,
    pub storage_backend: String,
}

/// Liveness probe - the process is up and serving requests
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is alive", body = LivenessResponse))
)]
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(LivenessResponse {
            status: "alive".to_string(),
        }),
    )
}

/// Readiness probe - the media tool runs
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Ready to accept traffic", body = ReadinessResponse),
        (status = 503, description = "Media tool unavailable", body = ReadinessResponse)
    )
)]
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let storage_backend = state.storage().backend_type().to_string();

    let (status_code, response) = match state
        .pipeline
        .tool()
        .version(Duration::from_secs(READINESS_TIMEOUT_SECS))
        .await
    {
        Ok(version) => (
            StatusCode::OK,
            ReadinessResponse {
                status: "ready".to_string(),
                media_tool: "ready".to_string(),
                media_tool_version: Some(version),
                storage_backend,
            },
        ),
        Err(e) => {
            tracing::error!(error = %e, "Media tool readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                ReadinessResponse {
                    status: "not_ready".to_string(),
                    media_tool: format!("not_ready: {}", e),
                    media_tool_version: None,
                    storage_backend,
                },
            )
        }
    };

    (status_code, Json(response))
}
