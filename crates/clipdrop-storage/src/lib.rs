//! Clipdrop Storage Library
//!
//! This crate provides the storage abstraction published videos go through, with
//! an S3 implementation (any S3-compatible provider) and a local filesystem one.
//!
//! # Storage key format
//!
//! Published videos are stored under `videos/{unix_millis}-{token}.{ext}`, where
//! `ext` is the subtype of the upload's content type. Keys must not contain `..`
//! or a leading `/`. Key generation lives in the `keys` module.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use clipdrop_core::StorageBackend;
pub use factory::create_storage;
pub use keys::{extension_for_content_type, generate_video_key};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
