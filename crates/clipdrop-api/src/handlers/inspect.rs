use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::IntoResponse,
    Json,
};
use clipdrop_core::AppError;
use clipdrop_processing::InspectOutcome;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct InspectQuery {
    /// Video page URL, handed to the media tool as-is
    pub url: Option<String>,
}

/// The format a commit should request
#[derive(Debug, Serialize, ToSchema)]
pub struct FormatSummary {
    pub format_id: String,
    pub ext: String,
    pub resolution: String,
    pub filesize: Option<u64>,
    pub format_note: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VideoDetails {
    pub title: String,
    pub thumbnail: String,
    /// Seconds
    pub duration: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InspectResponse {
    pub format: FormatSummary,
    #[serde(rename = "videoDetails")]
    pub video_details: VideoDetails,
}

impl From<InspectOutcome> for InspectResponse {
    fn from(outcome: InspectOutcome) -> Self {
        let format = outcome.format;
        InspectResponse {
            format: FormatSummary {
                format_id: format.format_id,
                ext: format.container,
                resolution: format.resolution_label,
                filesize: format.file_size_bytes,
                format_note: format.format_note,
            },
            video_details: VideoDetails {
                title: outcome.title,
                thumbnail: outcome.thumbnail_url,
                duration: outcome.duration_seconds,
            },
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/downloader",
    tag = "videos",
    params(InspectQuery),
    responses(
        (status = 200, description = "Best audio+video format and video details", body = InspectResponse),
        (status = 400, description = "Missing URL or no format with both video and audio", body = ErrorResponse),
        (status = 500, description = "Media tool failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, query), fields(operation = "inspect_video"))]
pub async fn inspect_video(
    State(state): State<Arc<AppState>>,
    query: Result<Query<InspectQuery>, QueryRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let Query(query) = query?;
    let url = query
        .url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .ok_or_else(|| AppError::InvalidInput("No URL provided".to_string()))?;

    tracing::info!(url = %url, "Inspecting video");

    let outcome = state.pipeline.inspect(url).await?;

    Ok(Json(InspectResponse::from(outcome)))
}
