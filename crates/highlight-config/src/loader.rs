use std::{path::Path, time::Duration};

use crate::Config;

/// Longest lifetime S3 accepts for a pre-signed URL
const MAX_URL_TTL: Duration = Duration::from_secs(7 * 24 * 3600);

/// Longest validity window the token endpoint accepts for an assertion
const MAX_ASSERTION_TTL: Duration = Duration::from_secs(3600);

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error naming the first offending key
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_cloud()?;
        self.validate_tts()?;
        self.validate_storage()?;
        self.validate_stt()?;
        Ok(())
    }

    fn validate_cloud(&self) -> anyhow::Result<()> {
        if self.cloud.folder_id.trim().is_empty() {
            anyhow::bail!("cloud.folder_id must not be empty");
        }

        if self.iam.assertion_ttl.is_zero() || self.iam.assertion_ttl > MAX_ASSERTION_TTL {
            anyhow::bail!("iam.assertion_ttl must be between 1s and 1h");
        }

        Ok(())
    }

    fn validate_tts(&self) -> anyhow::Result<()> {
        if !(0.1..=3.0).contains(&self.tts.speed) {
            anyhow::bail!("tts.speed must be between 0.1 and 3.0, got {}", self.tts.speed);
        }

        if self.tts.voice.is_empty() || self.tts.lang.is_empty() {
            anyhow::bail!("tts.voice and tts.lang must not be empty");
        }

        Ok(())
    }

    fn validate_storage(&self) -> anyhow::Result<()> {
        let storage = &self.storage;

        if storage.bucket.trim().is_empty() {
            anyhow::bail!("storage.bucket must not be empty");
        }

        if storage.access_key_id.is_some() != storage.secret_access_key.is_some() {
            anyhow::bail!("storage.access_key_id and storage.secret_access_key must be set together");
        }

        if storage.url_ttl.is_zero() || storage.url_ttl > MAX_URL_TTL {
            anyhow::bail!("storage.url_ttl must be between 1s and 7 days");
        }

        Ok(())
    }

    fn validate_stt(&self) -> anyhow::Result<()> {
        if self.stt.max_attempts == 0 {
            anyhow::bail!("stt.max_attempts must be at least 1");
        }

        if self.stt.poll_interval.is_zero() {
            anyhow::bail!("stt.poll_interval must be greater than zero");
        }

        if self.stt.operation_url.cannot_be_a_base() {
            anyhow::bail!("stt.operation_url must be a hierarchical URL the operation id can be appended to");
        }

        Ok(())
    }
}
