//! OpenAPI documentation, served at `/api/openapi.json` and rendered by RapiDoc at `/docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Clipdrop API",
        version = "0.1.0",
        description = "Resolve a video page URL to its best audio+video format, then download that format and publish it to object storage."
    ),
    paths(
        handlers::inspect::inspect_video,
        handlers::commit::download_video,
        handlers::health::health_check,
        handlers::health::readiness_check,
    ),
    components(schemas(
        error::ErrorResponse,
        handlers::inspect::InspectResponse,
        handlers::inspect::FormatSummary,
        handlers::inspect::VideoDetails,
        handlers::commit::CommitRequest,
        handlers::commit::CommitResponse,
        handlers::health::LivenessResponse,
        handlers::health::ReadinessResponse,
    )),
    tags(
        (name = "videos", description = "Inspect and download videos"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
