use std::{net::SocketAddr, path::PathBuf};

use serde::Deserialize;

use crate::{cors::CorsConfig, health::HealthConfig};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_listen_address")]
    pub listen_address: SocketAddr,
    /// Directory served under `/static` and holding the `/ui/` page
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    #[serde(default)]
    pub health: HealthConfig,
    #[serde(default)]
    pub cors: Option<CorsConfig>,
    #[serde(default)]
    pub descriptor: DescriptorConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: default_listen_address(),
            static_dir: default_static_dir(),
            health: HealthConfig::default(),
            cors: None,
            descriptor: DescriptorConfig::default(),
        }
    }
}

/// Fields reported by the `GET /` service descriptor
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DescriptorConfig {
    #[serde(default = "default_service_name")]
    pub name: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default = "default_documentation_url")]
    pub documentation_url: String,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_url: Option<String>,
}

impl Default for DescriptorConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            description: default_description(),
            documentation_url: default_documentation_url(),
            contact_email: None,
            contact_url: None,
        }
    }
}

fn default_listen_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8000))
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_service_name() -> String {
    "HighlightReader API".to_string()
}

fn default_description() -> String {
    "This API allows you to synthesize text to speech and align spoken words with timestamps.".to_string()
}

fn default_documentation_url() -> String {
    "/ui/".to_string()
}
