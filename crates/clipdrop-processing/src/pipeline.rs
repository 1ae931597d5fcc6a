//! Inspect and commit flows
//!
//! The two flows share nothing but configuration. Commit runs in its own
//! `<download_root>/<uuid>` directory, so concurrent commits never see each
//! other's files.

use crate::acquisition::acquire;
use crate::error::PipelineResult;
use crate::publisher::{publish, DEFAULT_CONTENT_TYPE};
use crate::resolver::resolve;
use crate::selector::select_best;
use crate::tool::MediaTool;
use clipdrop_core::models::{FormatDescriptor, PublishedAsset};
use clipdrop_core::Config;
use clipdrop_storage::Storage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

/// What inspect reports back: the chosen format and the video's details
#[derive(Debug, Clone, PartialEq)]
pub struct InspectOutcome {
    pub format: FormatDescriptor,
    pub title: String,
    pub thumbnail_url: String,
    pub duration_seconds: i64,
}

#[derive(Clone)]
pub struct VideoPipeline {
    tool: MediaTool,
    storage: Arc<dyn Storage>,
    download_root: PathBuf,
}

impl VideoPipeline {
    pub fn new(tool: MediaTool, storage: Arc<dyn Storage>, download_root: impl Into<PathBuf>) -> Self {
        Self {
            tool,
            storage,
            download_root: download_root.into(),
        }
    }

    pub fn from_config(config: &Config, storage: Arc<dyn Storage>) -> Self {
        Self::new(MediaTool::from_config(config), storage, config.download_dir())
    }

    pub fn tool(&self) -> &MediaTool {
        &self.tool
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub fn download_root(&self) -> &Path {
        &self.download_root
    }

    /// Resolve `url` and pick its best audio+video format. Touches neither disk
    /// nor storage.
    pub async fn inspect(&self, url: &str) -> PipelineResult<InspectOutcome> {
        let metadata = resolve(&self.tool, url).await?;
        let format = select_best(&metadata.formats)?.clone();

        tracing::info!(
            format_id = %format.format_id,
            resolution = %format.resolution_label,
            file_size_bytes = ?format.file_size_bytes,
            "Format selected"
        );

        Ok(InspectOutcome {
            format,
            title: metadata.title,
            thumbnail_url: metadata.thumbnail_url,
            duration_seconds: metadata.duration_seconds,
        })
    }

    /// Download `url` in `format_id` and publish it.
    ///
    /// A format id that does not exist for the URL fails in the media tool.
    /// The request directory is removed on success and when acquisition fails;
    /// after a failed upload it is kept along with the acquired file.
    pub async fn commit(&self, url: &str, format_id: Option<&str>) -> PipelineResult<PublishedAsset> {
        let request_dir = self.download_root.join(Uuid::new_v4().to_string());

        let acquired = match acquire(&self.tool, url, format_id, &request_dir).await {
            Ok(acquired) => acquired,
            Err(e) => {
                remove_request_dir(&request_dir).await;
                return Err(e);
            }
        };
        let asset = publish(self.storage.as_ref(), &acquired.local_path, DEFAULT_CONTENT_TYPE).await?;

        remove_request_dir(&request_dir).await;

        Ok(asset)
    }
}

async fn remove_request_dir(dir: &Path) {
    match tokio::fs::remove_dir_all(dir).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(
                error = %e,
                dir = %dir.display(),
                "Failed to remove request directory"
            );
        }
    }
}
