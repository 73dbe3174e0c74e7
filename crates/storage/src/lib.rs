//! Object storage for synthesized audio
//!
//! Uploads staged artifacts to an S3-compatible bucket and hands out
//! pre-signed retrieval URLs. Objects are never deleted by this service,
//! only the URLs expire.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod s3;

use std::time::Duration;

use async_trait::async_trait;
use highlight_core::AudioArtifact;
use url::Url;

pub use error::{Result, StorageError};
pub use s3::S3Storage;

/// Reference to an uploaded artifact
#[derive(Debug, Clone)]
pub struct StoredAudioRef {
    /// Object key inside the bucket
    pub key: String,
    /// Pre-signed GET URL
    pub url: Url,
    /// Lifetime of `url` from the moment it was signed
    pub expires_in: Duration,
}

/// Persists audio and produces time-limited retrieval URLs
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn store(&self, artifact: &AudioArtifact) -> Result<StoredAudioRef>;
}
