use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IamError>;

/// Errors raised while obtaining an IAM token
#[derive(Debug, Error)]
pub enum IamError {
    /// The authorized key file does not exist
    #[error("service account key file not found: {}", .0.display())]
    KeyFileMissing(PathBuf),

    /// The authorized key file exists but cannot be read
    #[error("failed to read service account key file {}: {source}", path.display())]
    KeyFileUnreadable { path: PathBuf, source: std::io::Error },

    /// The authorized key file is not valid key JSON
    #[error("malformed service account key file: {0}")]
    KeyFileMalformed(String),

    /// The private key is not a usable RSA key
    #[error("invalid service account private key: {0}")]
    InvalidKey(String),

    /// The assertion could not be signed
    #[error("failed to sign token assertion: {0}")]
    Signing(String),

    /// Network or connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Token endpoint rejected the assertion
    #[error("Token endpoint error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    /// Token endpoint answered with an unexpected body
    #[error("invalid token response: {0}")]
    InvalidResponse(String),
}

impl IamError {
    /// Whether the failure happened before any network call
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::KeyFileMissing(_) | Self::KeyFileUnreadable { .. } | Self::KeyFileMalformed(_) | Self::InvalidKey(_)
        )
    }
}
