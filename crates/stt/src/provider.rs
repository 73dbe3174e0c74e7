pub mod speechkit;

use async_trait::async_trait;
use highlight_core::BearerToken;

use crate::types::{OperationId, OperationStatus};

/// Trait for asynchronous STT provider implementations
#[async_trait]
pub trait SttProvider: Send + Sync {
    /// Start recognition of the audio behind `audio_url`
    async fn submit(&self, token: &BearerToken, audio_url: &str) -> crate::error::Result<OperationId>;

    /// Query the operation once
    ///
    /// A non-success HTTP status is an error, not a pending state.
    async fn operation_status(
        &self,
        token: &BearerToken,
        operation: &OperationId,
    ) -> crate::error::Result<OperationStatus>;

    /// Get the provider name
    fn name(&self) -> &str;
}
