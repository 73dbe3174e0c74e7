use std::path::PathBuf;

use serde::Deserialize;

/// Cloud tenant settings shared by every stage
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CloudConfig {
    /// Folder the synthesis requests are billed to
    #[serde(default)]
    pub folder_id: String,
    /// Path to the service-account authorized key (JSON)
    ///
    /// Read on every pipeline run, never cached.
    #[serde(default = "default_service_account_key")]
    pub service_account_key: PathBuf,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            folder_id: String::new(),
            service_account_key: default_service_account_key(),
        }
    }
}

fn default_service_account_key() -> PathBuf {
    PathBuf::from("service_account_key.json")
}
