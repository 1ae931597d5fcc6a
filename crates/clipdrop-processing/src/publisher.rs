use crate::error::{PipelineError, PipelineResult};
use clipdrop_core::models::PublishedAsset;
use clipdrop_storage::{generate_video_key, Storage};
use std::path::Path;

pub const DEFAULT_CONTENT_TYPE: &str = "video/mp4";

/// Upload a local file under a fresh `videos/` key and delete the local copy.
///
/// The whole file is read into memory. If the upload fails the local file is
/// left in place. A failed delete after a successful upload is logged and does
/// not fail the publish.
#[tracing::instrument(skip(storage, local_path), fields(path = %local_path.display(), backend = %storage.backend_type()))]
pub async fn publish(
    storage: &dyn Storage,
    local_path: &Path,
    content_type: &str,
) -> PipelineResult<PublishedAsset> {
    let data = tokio::fs::read(local_path)
        .await
        .map_err(|e| PipelineError::io(local_path, e))?;
    let size = data.len();
    let key = generate_video_key(content_type);

    let public_url = match storage.upload_with_key(&key, data, content_type).await {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!(
                error = %e,
                key = %key,
                path = %local_path.display(),
                "Upload failed, local file kept"
            );
            return Err(PipelineError::StorageUpload {
                key,
                message: e.to_string(),
            });
        }
    };

    if let Err(source) = tokio::fs::remove_file(local_path).await {
        let cleanup = PipelineError::LocalCleanup {
            path: local_path.to_path_buf(),
            source,
        };
        tracing::warn!(error = %cleanup, key = %key, "Published, but local copy was not removed");
    }

    tracing::info!(key = %key, size_bytes = size, url = %public_url, "Video published");

    Ok(PublishedAsset { public_url, key })
}
