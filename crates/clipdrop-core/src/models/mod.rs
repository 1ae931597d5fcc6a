//! Data models for the application
//!
//! Everything here is produced fresh per request and never persisted; the only
//! durable artifact is the object a [`PublishedAsset`] points at.

mod video;

pub use video::{AcquiredFile, FormatDescriptor, PublishedAsset, VideoMetadata, NONE_CODEC};
