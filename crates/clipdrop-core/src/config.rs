//! Configuration module
//!
//! Configuration is read from environment variables (optionally seeded from a
//! `.env` file) into [`DownloaderConfig`] and exposed through [`Config`] getters.

use std::env;
use std::time::Duration;

use crate::storage_types::StorageBackend;

// Common constants
const SERVER_PORT: u16 = 4000;
const HTTP_CONCURRENCY_LIMIT: usize = 64;
const YTDLP_PATH: &str = "yt-dlp";
const METADATA_TIMEOUT_SECS: u64 = 60;
const DOWNLOAD_TIMEOUT_SECS: u64 = 1800;
const DOWNLOAD_DIR: &str = "./downloads";
const S3_OBJECT_ACL: &str = "public-read";

/// Base configuration for the HTTP server
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub http_concurrency_limit: usize,
    /// `json` switches the log formatter to JSON lines
    pub log_format: String,
}

/// Downloader configuration: media tool, download directory and storage.
#[derive(Clone, Debug)]
pub struct DownloaderConfig {
    pub base: BaseConfig,
    // Media tool
    pub ytdlp_path: String,
    pub ytdlp_extra_args: Vec<String>,
    pub metadata_timeout_secs: u64,
    pub download_timeout_secs: u64,
    /// Root under which each download gets its own directory
    pub download_dir: String,
    // Storage configuration
    pub storage_backend: Option<StorageBackend>,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // S3-compatible providers (MinIO, Spaces, ...)
    pub aws_region: Option<String>,
    pub s3_object_acl: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<DownloaderConfig>);

impl Config {
    fn inner(&self) -> &DownloaderConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_name(&self.inner().base.environment)
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = DownloaderConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.inner().base.http_concurrency_limit
    }

    pub fn log_format(&self) -> &str {
        &self.inner().base.log_format
    }

    pub fn ytdlp_path(&self) -> &str {
        &self.inner().ytdlp_path
    }

    pub fn ytdlp_extra_args(&self) -> &[String] {
        &self.inner().ytdlp_extra_args
    }

    pub fn metadata_timeout(&self) -> Duration {
        Duration::from_secs(self.inner().metadata_timeout_secs)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.inner().download_timeout_secs)
    }

    pub fn download_dir(&self) -> &str {
        &self.inner().download_dir
    }

    pub fn storage_backend(&self) -> Option<StorageBackend> {
        self.inner().storage_backend
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.inner().s3_bucket.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.inner().s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.inner().s3_endpoint.as_deref()
    }

    pub fn aws_region(&self) -> Option<&str> {
        self.inner().aws_region.as_deref()
    }

    pub fn s3_object_acl(&self) -> Option<&str> {
        self.inner().s3_object_acl.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.inner().local_storage_path.as_deref()
    }

    pub fn local_storage_base_url(&self) -> Option<&str> {
        self.inner().local_storage_base_url.as_deref()
    }
}

fn is_production_name(environment: &str) -> bool {
    let environment = environment.to_lowercase();
    environment == "production" || environment == "prod"
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl DownloaderConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        let config = Self::from_vars(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Build a configuration from an arbitrary variable lookup.
    ///
    /// `from_env` passes the process environment; tests pass a map.
    pub fn from_vars<F>(var: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins_str = var("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        if is_production_name(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base = BaseConfig {
            server_port: match var("PORT") {
                Some(port) => port
                    .trim()
                    .parse()
                    .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
                None => SERVER_PORT,
            },
            cors_origins,
            environment,
            http_concurrency_limit: var("HTTP_CONCURRENCY_LIMIT")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(HTTP_CONCURRENCY_LIMIT)
                .max(1),
            log_format: var("LOG_FORMAT")
                .unwrap_or_else(|| "compact".to_string())
                .to_lowercase(),
        };

        let storage_backend = match non_empty(var("STORAGE_BACKEND")) {
            Some(s) => Some(s.parse::<StorageBackend>()?),
            None => None,
        };

        // An explicitly empty S3_OBJECT_ACL disables the ACL header
        let s3_object_acl = match var("S3_OBJECT_ACL") {
            Some(acl) => non_empty(Some(acl)),
            None => Some(S3_OBJECT_ACL.to_string()),
        };

        Ok(DownloaderConfig {
            base,
            ytdlp_path: non_empty(var("YTDLP_PATH")).unwrap_or_else(|| YTDLP_PATH.to_string()),
            ytdlp_extra_args: var("YTDLP_EXTRA_ARGS")
                .unwrap_or_default()
                .split_whitespace()
                .map(String::from)
                .collect(),
            metadata_timeout_secs: var("YTDLP_METADATA_TIMEOUT_SECS")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(METADATA_TIMEOUT_SECS),
            download_timeout_secs: var("YTDLP_DOWNLOAD_TIMEOUT_SECS")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(DOWNLOAD_TIMEOUT_SECS),
            download_dir: non_empty(var("DOWNLOAD_DIR"))
                .unwrap_or_else(|| DOWNLOAD_DIR.to_string()),
            storage_backend,
            s3_bucket: non_empty(var("S3_BUCKET")).or_else(|| non_empty(var("AWS_BUCKET_NAME"))),
            s3_region: non_empty(var("S3_REGION")),
            s3_endpoint: non_empty(var("S3_ENDPOINT")),
            aws_region: non_empty(var("AWS_REGION")),
            s3_object_acl,
            local_storage_path: non_empty(var("LOCAL_STORAGE_PATH")),
            local_storage_base_url: non_empty(var("LOCAL_STORAGE_BASE_URL")),
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.metadata_timeout_secs == 0 || self.download_timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "YTDLP_METADATA_TIMEOUT_SECS and YTDLP_DOWNLOAD_TIMEOUT_SECS must be greater than 0"
            ));
        }

        if self.ytdlp_path.trim().is_empty() {
            return Err(anyhow::anyhow!("YTDLP_PATH must not be empty"));
        }

        // Validate storage backend configuration
        let backend = self.storage_backend.unwrap_or(StorageBackend::S3);
        match backend {
            StorageBackend::S3 => {
                if self.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET (or AWS_BUCKET_NAME) must be set when using S3 storage backend"
                    ));
                }
                if self.s3_region.is_none() && self.aws_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
                if self.local_storage_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_BASE_URL must be set when using local storage backend"
                    ));
                }
            }
        }

        Ok(())
    }
}
