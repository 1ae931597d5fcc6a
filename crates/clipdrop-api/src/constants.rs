//! API constants
//!
//! Routes are unversioned; existing clients call `/api/downloader` and
//! `/api/download` directly.

/// Inspect: resolve a URL and report the format a commit would use
pub const INSPECT_PATH: &str = "/api/downloader";

/// Commit: download a format and publish it
pub const COMMIT_PATH: &str = "/api/download";

pub const OPENAPI_PATH: &str = "/api/openapi.json";

/// Timeout for the media tool probe behind `/ready`
pub const READINESS_TIMEOUT_SECS: u64 = 5;

/// Request bodies are small JSON documents
pub const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;
