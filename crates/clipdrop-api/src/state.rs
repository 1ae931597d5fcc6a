//! Application state shared by all handlers.

use clipdrop_core::Config;
use clipdrop_processing::VideoPipeline;
use clipdrop_storage::Storage;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub pipeline: VideoPipeline,
}

impl AppState {
    pub fn new(config: Config, storage: Arc<dyn Storage>) -> Self {
        let pipeline = VideoPipeline::from_config(&config, storage);
        Self { config, pipeline }
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        self.pipeline.storage()
    }
}
