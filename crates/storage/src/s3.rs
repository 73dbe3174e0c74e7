use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::{
    Client,
    config::RequestChecksumCalculation,
    error::DisplayErrorContext,
    presigning::PresigningConfig,
    primitives::ByteStream,
};
use highlight_config::StorageConfig;
use highlight_core::AudioArtifact;
use secrecy::ExposeSecret;
use url::Url;

use crate::{
    ObjectStore, StoredAudioRef,
    error::{Result, StorageError},
};

/// S3-compatible bucket client
pub struct S3Storage {
    client: Client,
    bucket: String,
    key_prefix: String,
    url_ttl: Duration,
}

impl S3Storage {
    /// Build the client from configuration
    ///
    /// Uses the static keys when configured, otherwise the AWS default
    /// credential chain.
    pub async fn from_config(config: &StorageConfig) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()))
            .endpoint_url(config.endpoint.as_str().trim_end_matches('/'))
            .retry_config(aws_config::retry::RetryConfig::disabled());

        if let (Some(access_key), Some(secret_key)) = (&config.access_key_id, &config.secret_access_key) {
            let credentials = aws_credential_types::Credentials::new(
                access_key,
                secret_key.expose_secret(),
                None, // session token
                None, // expiry
                "highlight-config",
            );
            loader = loader.credentials_provider(credentials);
        }

        let sdk_config = loader.load().await;

        // S3-compatible stores reject the aws-chunked checksum trailers sent by default
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.force_path_style)
            .request_checksum_calculation(RequestChecksumCalculation::WhenRequired)
            .build();

        Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
            key_prefix: config.key_prefix.clone().unwrap_or_default(),
            url_ttl: config.url_ttl,
        }
    }

    /// Object key for a staged artifact: its unique file name behind the prefix
    fn object_key(&self, artifact: &AudioArtifact) -> String {
        format!("{}{}", self.key_prefix, artifact.file_name())
    }
}

#[async_trait]
impl ObjectStore for S3Storage {
    async fn store(&self, artifact: &AudioArtifact) -> Result<StoredAudioRef> {
        let key = self.object_key(artifact);

        tracing::debug!(bucket = %self.bucket, %key, bytes = artifact.size(), "uploading audio");

        let body = ByteStream::from_path(artifact.path())
            .await
            .map_err(|e| StorageError::Read(e.to_string()))?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(artifact.content_type())
            .body(body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("audio upload failed: {}", DisplayErrorContext(&e));
                StorageError::Upload(DisplayErrorContext(&e).to_string())
            })?;

        let presigning = PresigningConfig::expires_in(self.url_ttl).map_err(|e| StorageError::Presign(e.to_string()))?;

        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&key)
            .presigned(presigning)
            .await
            .map_err(|e| StorageError::Presign(DisplayErrorContext(&e).to_string()))?;

        let url = Url::parse(presigned.uri()).map_err(|e| StorageError::Presign(e.to_string()))?;

        tracing::info!(%key, "audio uploaded");

        Ok(StoredAudioRef {
            key,
            url,
            expires_in: self.url_ttl,
        })
    }
}
