#![allow(clippy::must_use_candidate)]

pub mod cloud;
pub mod cors;
mod duration;
mod env;
pub mod health;
pub mod iam;
mod loader;
pub mod server;
pub mod storage;
pub mod stt;
pub mod telemetry;
pub mod tts;

use serde::Deserialize;

pub use cloud::*;
pub use cors::*;
pub use health::*;
pub use iam::*;
pub use server::*;
pub use storage::*;
pub use stt::*;
pub use telemetry::TelemetryConfig;
pub use tts::*;

/// Top-level HighlightReader configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Cloud tenant and service-account settings
    #[serde(default)]
    pub cloud: CloudConfig,
    /// IAM token exchange configuration
    #[serde(default)]
    pub iam: IamConfig,
    /// Speech synthesis configuration
    #[serde(default)]
    pub tts: TtsConfig,
    /// Object storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Speech recognition configuration
    #[serde(default)]
    pub stt: SttConfig,
    /// Logging and tracing configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
