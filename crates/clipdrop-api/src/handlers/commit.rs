use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use clipdrop_core::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CommitRequest {
    pub url: Option<String>,
    /// `format_id` from a previous inspect
    pub format: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommitResponse {
    pub success: bool,
    #[serde(rename = "videoUrl")]
    pub video_url: String,
}

fn required(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[utoipa::path(
    post,
    path = "/api/download",
    tag = "videos",
    request_body = CommitRequest,
    responses(
        (status = 200, description = "Video downloaded and published", body = CommitResponse),
        (status = 400, description = "Missing url or format, or invalid JSON", body = ErrorResponse),
        (status = 500, description = "Download or upload failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(operation = "download_video"))]
pub async fn download_video(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CommitRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let (url, format) = match (
        required(request.url.as_deref()),
        required(request.format.as_deref()),
    ) {
        (Some(url), Some(format)) => (url, format),
        _ => {
            return Err(AppError::InvalidInput("URL and format are required".to_string()).into())
        }
    };

    tracing::info!(url = %url, format = %format, "Downloading video");

    let asset = state.pipeline.commit(url, Some(format)).await?;

    Ok(Json(CommitResponse {
        success: true,
        video_url: asset.public_url,
    }))
}
