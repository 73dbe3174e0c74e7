#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod authenticator;
mod error;
mod key;

use async_trait::async_trait;
use highlight_core::BearerToken;

pub use authenticator::Authenticator;
pub use error::{IamError, Result};
pub use key::ServiceAccountKey;

/// Source of short-lived bearer tokens for the cloud APIs
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Obtain a fresh token, performing the full exchange every time
    async fn issue_token(&self) -> Result<BearerToken>;
}

#[async_trait]
impl TokenSource for Authenticator {
    async fn issue_token(&self) -> Result<BearerToken> {
        Self::issue_token(self).await
    }
}
