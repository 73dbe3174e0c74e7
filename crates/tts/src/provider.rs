pub mod speechkit;

use async_trait::async_trait;
use highlight_core::{AudioArtifact, BearerToken};

/// Trait for TTS provider implementations
#[async_trait]
pub trait TtsProvider: Send + Sync {
    /// Render `text` to speech and stage the audio on local disk
    async fn synthesize(&self, token: &BearerToken, text: &str) -> crate::error::Result<AudioArtifact>;

    /// Get the provider name
    fn name(&self) -> &str;
}
