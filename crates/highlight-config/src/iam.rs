use std::time::Duration;

use serde::Deserialize;
use url::Url;

const DEFAULT_TOKEN_URL: &str = "https://iam.api.cloud.yandex.net/iam/v1/tokens";

/// IAM token exchange configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IamConfig {
    /// Token endpoint, also used as the assertion audience
    #[serde(default = "default_token_url")]
    pub token_url: Url,
    /// Validity window of the signed assertion
    #[serde(default = "default_assertion_ttl", with = "crate::duration")]
    pub assertion_ttl: Duration,
}

impl Default for IamConfig {
    fn default() -> Self {
        Self {
            token_url: default_token_url(),
            assertion_ttl: default_assertion_ttl(),
        }
    }
}

#[allow(clippy::missing_panics_doc)]
fn default_token_url() -> Url {
    Url::parse(DEFAULT_TOKEN_URL).expect("default token URL is valid")
}

const fn default_assertion_ttl() -> Duration {
    Duration::from_secs(60)
}
