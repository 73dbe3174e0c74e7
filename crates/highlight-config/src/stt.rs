use std::time::Duration;

use serde::Deserialize;
use url::Url;

const DEFAULT_RECOGNIZE_URL: &str = "https://transcribe.api.cloud.yandex.net/speech/stt/v2/longRunningRecognize";
const DEFAULT_OPERATION_URL: &str = "https://operation.api.cloud.yandex.net/operations/";

/// Long-running speech recognition configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SttConfig {
    /// Submission endpoint for asynchronous recognition
    #[serde(default = "default_recognize_url")]
    pub recognize_url: Url,
    /// Operation status endpoint, the operation id is appended
    #[serde(default = "default_operation_url")]
    pub operation_url: Url,
    /// Recognition language
    #[serde(default = "default_language")]
    pub language: String,
    /// Delay between two status queries
    #[serde(default = "default_poll_interval", with = "crate::duration")]
    pub poll_interval: Duration,
    /// Maximum number of status queries before giving up
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Which recognition alternatives contribute words to the alignment
    #[serde(default)]
    pub alternatives: AlternativeSelection,
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            recognize_url: default_recognize_url(),
            operation_url: default_operation_url(),
            language: default_language(),
            poll_interval: default_poll_interval(),
            max_attempts: default_max_attempts(),
            alternatives: AlternativeSelection::default(),
        }
    }
}

/// Alternative selection when flattening recognition chunks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlternativeSelection {
    /// Words of every alternative, in response order
    #[default]
    All,
    /// Only the first (top-ranked) alternative of each chunk
    Best,
}

#[allow(clippy::missing_panics_doc)]
fn default_recognize_url() -> Url {
    Url::parse(DEFAULT_RECOGNIZE_URL).expect("default recognize URL is valid")
}

#[allow(clippy::missing_panics_doc)]
fn default_operation_url() -> Url {
    Url::parse(DEFAULT_OPERATION_URL).expect("default operation URL is valid")
}

fn default_language() -> String {
    "ru-RU".to_string()
}

const fn default_poll_interval() -> Duration {
    Duration::from_secs(5)
}

const fn default_max_attempts() -> u32 {
    720
}
