//! Storage setup and initialization

use anyhow::Result;
use clipdrop_core::Config;
use clipdrop_storage::{create_storage, Storage};
use std::sync::Arc;

pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage abstraction...");
    let storage = create_storage(config).await?;
    tracing::info!(
        backend = %storage.backend_type(),
        bucket = ?config.s3_bucket(),
        object_acl = ?config.s3_object_acl(),
        "Storage abstraction initialized successfully"
    );
    Ok(storage)
}
