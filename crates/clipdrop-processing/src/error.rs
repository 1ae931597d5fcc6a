use clipdrop_core::AppError;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Pipeline stage failures
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The media tool could not be spawned, exited non-zero or printed
    /// something we could not parse
    #[error("{program} failed: {message}")]
    ExternalTool { program: String, message: String },

    #[error("{program} timed out after {}s", .timeout.as_secs())]
    ToolTimedOut { program: String, timeout: Duration },

    #[error("No format with both video and audio among {candidates} candidates")]
    NoSuitableFormat { candidates: usize },

    #[error("No output file found in {}", .dir.display())]
    NoFileProduced { dir: PathBuf },

    #[error("Upload of {key} failed: {message}")]
    StorageUpload { key: String, message: String },

    #[error("Failed to remove {}: {source}", .path.display())]
    LocalCleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type PipelineResult<T> = Result<T, PipelineError>;

impl PipelineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        let message = err.to_string();
        match err {
            PipelineError::ExternalTool { .. } => AppError::ExternalTool(message),
            PipelineError::ToolTimedOut { .. } => AppError::ToolTimeout(message),
            PipelineError::NoSuitableFormat { .. } => AppError::NoSuitableFormat(message),
            PipelineError::NoFileProduced { .. } => AppError::NoFileProduced(message),
            PipelineError::StorageUpload { .. } => AppError::Storage(message),
            PipelineError::LocalCleanup { .. } | PipelineError::Io { .. } => {
                AppError::Internal(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipdrop_core::ErrorMetadata;

    #[test]
    fn test_no_suitable_format_maps_to_400() {
        let app: AppError = PipelineError::NoSuitableFormat { candidates: 3 }.into();
        assert_eq!(app.http_status_code(), 400);
        assert_eq!(app.error_code(), "NO_SUITABLE_FORMAT");
    }

    #[test]
    fn test_tool_errors_keep_their_kind() {
        let app: AppError = PipelineError::ToolTimedOut {
            program: "yt-dlp".to_string(),
            timeout: Duration::from_secs(60),
        }
        .into();
        assert_eq!(app.error_code(), "EXTERNAL_TOOL_TIMEOUT");
        assert!(app.to_string().contains("timed out after 60s"));

        let app: AppError = PipelineError::ExternalTool {
            program: "yt-dlp".to_string(),
            message: "ERROR: Unsupported URL".to_string(),
        }
        .into();
        assert_eq!(app.http_status_code(), 500);
        assert!(app.detailed_message().contains("Unsupported URL"));
    }

    #[test]
    fn test_upload_failure_is_storage_error() {
        let app: AppError = PipelineError::StorageUpload {
            key: "videos/1-a.mp4".to_string(),
            message: "access denied".to_string(),
        }
        .into();
        assert_eq!(app.error_code(), "STORAGE_ERROR");
        assert_eq!(app.client_message(), "Failed to upload video");
    }
}
