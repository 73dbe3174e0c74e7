use thiserror::Error;

pub type Result<T> = std::result::Result<T, SttError>;

/// Speech recognition errors
#[derive(Debug, Error)]
pub enum SttError {
    /// Bearer token was rejected
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Provider API returned an error
    #[error("Provider API error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    /// Network or connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Configured endpoint cannot be used for a request
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Response body did not have the expected shape
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Operation completed without a recognition result
    #[error("recognition failed: {0}")]
    OperationFailed(String),

    /// Operation completed but recognized nothing
    #[error("recognition returned no chunks")]
    EmptyResult,

    /// A word carried an unparseable timestamp
    #[error("malformed recognition result: {0}")]
    MalformedResult(String),

    /// Operation was still pending after the last allowed status query
    #[error("operation still pending after {attempts} status queries")]
    PollLimitExceeded { attempts: u32 },

    /// The caller gave up waiting
    #[error("recognition wait cancelled")]
    Cancelled,
}
