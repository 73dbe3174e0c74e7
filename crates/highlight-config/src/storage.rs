use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

const DEFAULT_STORAGE_ENDPOINT: &str = "https://storage.yandexcloud.net";

/// S3-compatible object storage configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Storage API endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: Url,
    /// Signing region
    #[serde(default = "default_region")]
    pub region: String,
    /// Bucket receiving synthesized audio
    #[serde(default)]
    pub bucket: String,
    /// Static access key id
    ///
    /// When both keys are unset the AWS default credential chain is used
    /// (`AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY`).
    #[serde(default)]
    pub access_key_id: Option<String>,
    /// Static secret access key
    #[serde(default)]
    pub secret_access_key: Option<SecretString>,
    /// Lifetime of generated retrieval URLs
    #[serde(default = "default_url_ttl", with = "crate::duration")]
    pub url_ttl: Duration,
    /// Prefix prepended to object keys
    #[serde(default)]
    pub key_prefix: Option<String>,
    /// Address buckets as `endpoint/bucket/key` instead of `bucket.endpoint/key`
    #[serde(default)]
    pub force_path_style: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            region: default_region(),
            bucket: String::new(),
            access_key_id: None,
            secret_access_key: None,
            url_ttl: default_url_ttl(),
            key_prefix: None,
            force_path_style: false,
        }
    }
}

#[allow(clippy::missing_panics_doc)]
fn default_endpoint() -> Url {
    Url::parse(DEFAULT_STORAGE_ENDPOINT).expect("default storage endpoint is valid")
}

fn default_region() -> String {
    "ru-central1".to_string()
}

const fn default_url_ttl() -> Duration {
    Duration::from_secs(3600)
}
