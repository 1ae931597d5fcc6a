//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use clipdrop_core::Config;

/// Validate critical configuration values
///
/// Re-runs the config's own checks (the config may have been built by hand rather
/// than by `Config::from_env`) and adds the ones that only matter for serving.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.is_production() && config.cors_origins().iter().any(|o| o == "*") {
        return Err(anyhow::anyhow!(
            "CORS configured to allow all origins (*) in production - this is a security risk. \
            Please set specific allowed origins via CORS_ORIGINS environment variable."
        ));
    }

    if config.cors_origins().is_empty() {
        return Err(anyhow::anyhow!(
            "CORS_ORIGINS is empty - set '*' or a comma-separated list of origins"
        ));
    }

    if config.download_timeout() < config.metadata_timeout() {
        tracing::warn!(
            metadata_timeout_secs = config.metadata_timeout().as_secs(),
            download_timeout_secs = config.download_timeout().as_secs(),
            "Download timeout is shorter than the metadata timeout"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipdrop_core::DownloaderConfig;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config(Box::new(
            DownloaderConfig::from_vars(|key| vars.get(key).cloned()).unwrap(),
        ))
    }

    #[test]
    fn test_valid_local_config() {
        let config = config(&[
            ("STORAGE_BACKEND", "local"),
            ("LOCAL_STORAGE_PATH", "/tmp/clipdrop"),
            ("LOCAL_STORAGE_BASE_URL", "http://localhost:4000/files"),
        ]);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_missing_bucket_fails() {
        let config = config(&[("AWS_REGION", "us-east-1")]);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_empty_cors_fails() {
        let config = config(&[
            ("CORS_ORIGINS", " , "),
            ("AWS_BUCKET_NAME", "clips"),
            ("AWS_REGION", "us-east-1"),
        ]);
        assert!(validate_config(&config).is_err());
    }
}
