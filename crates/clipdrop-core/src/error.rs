//! Error types module
//!
//! `AppError` is the error shape handlers render. Crate-level errors
//! (`StorageError`, `PipelineError`) are mapped into it at the HTTP boundary, so the
//! kinds stay distinguishable internally while the external contract stays coarse.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "EXTERNAL_TOOL_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    ///
    /// For `AppError` the message follows the failure kind, not the endpoint: a
    /// media tool failure during a download reads "Failed to process video",
    /// like it does for inspect.
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No suitable format: {0}")]
    NoSuitableFormat(String),

    #[error("External tool error: {0}")]
    ExternalTool(String),

    #[error("External tool timed out: {0}")]
    ToolTimeout(String),

    #[error("No file produced: {0}")]
    NoFileProduced(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::InvalidInput(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Check request parameters and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::NoSuitableFormat(_) => (
            400,
            "NO_SUITABLE_FORMAT",
            false,
            Some("Try a different video URL"),
            false,
            LogLevel::Warn,
        ),
        AppError::ExternalTool(_) => (
            500,
            "EXTERNAL_TOOL_ERROR",
            false,
            Some("Check the URL and format, then try again"),
            false,
            LogLevel::Error,
        ),
        AppError::ToolTimeout(_) => (
            500,
            "EXTERNAL_TOOL_TIMEOUT",
            true,
            Some("Retry after a short delay"),
            false,
            LogLevel::Error,
        ),
        AppError::NoFileProduced(_) => (
            500,
            "NO_FILE_PRODUCED",
            true,
            Some("Retry the download"),
            false,
            LogLevel::Error,
        ),
        AppError::Storage(_) => (
            500,
            "STORAGE_ERROR",
            true,
            Some("Retry after a short delay"),
            false,
            LogLevel::Error,
        ),
        AppError::Internal(_) => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Variant name, used as `error_type` in logs and non-production responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::NoSuitableFormat(_) => "NoSuitableFormat",
            AppError::ExternalTool(_) => "ExternalTool",
            AppError::ToolTimeout(_) => "ToolTimeout",
            AppError::NoFileProduced(_) => "NoFileProduced",
            AppError::Storage(_) => "Storage",
            AppError::Internal(_) => "Internal",
        }
    }

    /// Underlying error text, rendered as `details`. Crate errors are flattened
    /// into the variant's message before they get here.
    pub fn detailed_message(&self) -> String {
        self.to_string()
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::NoSuitableFormat(_) => {
                "No suitable format found with both video and audio".to_string()
            }
            AppError::ExternalTool(_) | AppError::ToolTimeout(_) => {
                "Failed to process video".to_string()
            }
            AppError::NoFileProduced(_) => "Failed to download video".to_string(),
            AppError::Storage(_) => "Failed to upload video".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }
}
