//! Programmatic configuration builder for integration tests

use std::{net::SocketAddr, path::PathBuf, time::Duration};

use highlight_config::{Config, CorsConfig};
use secrecy::SecretString;
use tempfile::TempDir;

use super::cloud::{KEY_ID, MockCloud, SERVICE_ACCOUNT_ID, SERVICE_ACCOUNT_PEM};

/// Builder for constructing test configurations pointed at a [`MockCloud`]
///
/// Owns a scratch directory holding the key file, staged audio and the UI page.
pub struct ConfigBuilder {
    config: Config,
    scratch: TempDir,
}

impl ConfigBuilder {
    pub fn new(cloud: &MockCloud) -> Self {
        let scratch = tempfile::tempdir().expect("scratch dir");
        let key_path = scratch.path().join("service_account_key.json");
        let staging = scratch.path().join("staging");
        std::fs::create_dir_all(&staging).expect("staging dir");
        std::fs::create_dir_all(scratch.path().join("static")).expect("static dir");

        let key = serde_json::json!({
            "id": KEY_ID,
            "service_account_id": SERVICE_ACCOUNT_ID,
            "created_at": "2024-09-15T12:00:00Z",
            "key_algorithm": "RSA_2048",
            "public_key": "-----BEGIN PUBLIC KEY-----\n...\n-----END PUBLIC KEY-----\n",
            "private_key": format!("PLEASE DO NOT REMOVE THIS LINE! Yandex.Cloud SA Key ID <{KEY_ID}>\n{SERVICE_ACCOUNT_PEM}"),
        });
        std::fs::write(&key_path, key.to_string()).expect("key file");

        let mut config = Config::default();

        config.server.listen_address = SocketAddr::from(([127, 0, 0, 1], 0));
        config.server.static_dir = scratch.path().join("static");

        config.cloud.folder_id = "b1gtestfolder".to_string();
        config.cloud.service_account_key = key_path;

        config.iam.token_url = url(&cloud.api_url("/iam/v1/tokens"));

        config.tts.url = url(&cloud.api_url("/speech/v1/tts:synthesize"));
        config.tts.staging_dir = Some(staging);

        config.storage.endpoint = url(&cloud.storage_url());
        config.storage.bucket = "speech".to_string();
        config.storage.access_key_id = Some("YCAJEtestkey".to_string());
        config.storage.secret_access_key = Some(SecretString::from("YCtestsecret"));
        config.storage.force_path_style = true;

        config.stt.recognize_url = url(&cloud.api_url("/speech/stt/v2/longRunningRecognize"));
        config.stt.operation_url = url(&cloud.api_url("/operations/"));
        config.stt.poll_interval = Duration::from_millis(20);
        config.stt.max_attempts = 50;

        Self { config, scratch }
    }

    /// Point the key path at a file that does not exist
    pub fn without_key_file(mut self) -> Self {
        self.config.cloud.service_account_key = self.scratch.path().join("missing.json");
        self
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.config.stt.max_attempts = attempts;
        self
    }

    /// Write `html` as the `/ui/` page
    pub fn with_ui_page(self, html: &str) -> Self {
        std::fs::write(self.config.server.static_dir.join("index.html"), html).expect("ui page");
        self
    }

    /// Write a file served under `/static`
    pub fn with_static_file(self, name: &str, contents: &str) -> Self {
        std::fs::write(self.config.server.static_dir.join(name), contents).expect("static file");
        self
    }

    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = Some(config);
        self
    }

    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config with the directory that backs it
    pub fn build(self) -> TestConfig {
        TestConfig {
            config: self.config,
            scratch: self.scratch,
        }
    }
}

/// Config plus the scratch directory it refers to
pub struct TestConfig {
    pub config: Config,
    pub scratch: TempDir,
}

impl TestConfig {
    pub fn staging_dir(&self) -> PathBuf {
        self.scratch.path().join("staging")
    }
}

fn url(raw: &str) -> url::Url {
    raw.parse().expect("valid URL")
}
