use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue};
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::{
    Attribute, Attributes, ClientOptions, ObjectStore, PutOptions, PutPayload,
    Result as ObjectResult,
};

/// S3 storage implementation
#[derive(Clone)]
pub struct S3Storage {
    store: AmazonS3,
    bucket: String,
    region: String,
    endpoint_url: Option<String>, // Custom endpoint for S3-compatible providers
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    /// * `object_acl` - Canned ACL sent as `x-amz-acl` on every request
    ///   (e.g., "public-read"); `None` for buckets with ACLs disabled
    pub async fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
        object_acl: Option<String>,
    ) -> StorageResult<Self> {
        // Credentials come from the standard AWS_* environment variables.
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region.clone())
            .with_bucket_name(bucket.clone());

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http)
                .with_virtual_hosted_style_request(false);
        }

        if let Some(ref acl) = object_acl {
            let value = HeaderValue::from_str(acl)
                .map_err(|e| StorageError::ConfigError(format!("Invalid S3_OBJECT_ACL: {}", e)))?;
            let mut headers = HeaderMap::new();
            headers.insert(HeaderName::from_static("x-amz-acl"), value);
            builder = builder.with_client_options(ClientOptions::new().with_default_headers(headers));
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        tracing::debug!(
            bucket = %bucket,
            region = %region,
            endpoint = ?endpoint_url,
            object_acl = ?object_acl,
            "S3 storage configured"
        );

        Ok(S3Storage {
            store,
            bucket,
            region,
            endpoint_url,
        })
    }
}

/// Public URL for an object
///
/// For AWS S3: `https://{bucket}.s3.{region}.amazonaws.com/{key}`.
/// With a custom endpoint, path-style: `{endpoint}/{bucket}/{key}`.
pub fn public_object_url(bucket: &str, region: &str, endpoint: Option<&str>, key: &str) -> String {
    match endpoint {
        Some(endpoint) => {
            let base_url = endpoint.trim_end_matches('/');
            format!("{}/{}/{}", base_url, bucket, key)
        }
        None => format!("https://{}.s3.{}.amazonaws.com/{}", bucket, region, key),
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn upload_with_key(
        &self,
        storage_key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<String> {
        let size = data.len() as u64;
        let bytes = Bytes::from(data);
        let location = Path::from(storage_key.to_string());
        let start = std::time::Instant::now();

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());
        let opts = PutOptions {
            attributes,
            ..Default::default()
        };

        let result: ObjectResult<_> = self
            .store
            .put_opts(&location, PutPayload::from(bytes), opts)
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %storage_key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 upload failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        let url = self.public_url(storage_key);

        tracing::info!(
            bucket = %self.bucket,
            key = %storage_key,
            content_type = %content_type,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(url)
    }

    fn public_url(&self, storage_key: &str) -> String {
        public_object_url(
            &self.bucket,
            &self.region,
            self.endpoint_url.as_deref(),
            storage_key,
        )
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_url_aws() {
        assert_eq!(
            public_object_url("clips", "eu-west-1", None, "videos/1-abc.mp4"),
            "https://clips.s3.eu-west-1.amazonaws.com/videos/1-abc.mp4"
        );
    }

    #[test]
    fn test_public_url_custom_endpoint_is_path_style() {
        assert_eq!(
            public_object_url(
                "clips",
                "us-east-1",
                Some("http://localhost:9000/"),
                "videos/1-abc.mp4"
            ),
            "http://localhost:9000/clips/videos/1-abc.mp4"
        );
    }

    #[tokio::test]
    async fn test_rejects_invalid_acl_header() {
        let result = S3Storage::new(
            "clips".to_string(),
            "us-east-1".to_string(),
            Some("http://localhost:9000".to_string()),
            Some("public\nread".to_string()),
        )
        .await;
        assert!(matches!(result, Err(StorageError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_storage_reports_its_urls() {
        let storage = S3Storage::new(
            "clips".to_string(),
            "us-east-1".to_string(),
            Some("http://localhost:9000".to_string()),
            Some("public-read".to_string()),
        )
        .await
        .unwrap();
        assert_eq!(storage.backend_type(), StorageBackend::S3);
        assert_eq!(
            storage.public_url("videos/a.mp4"),
            "http://localhost:9000/clips/videos/a.mp4"
        );
    }
}
