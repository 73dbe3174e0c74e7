use thiserror::Error;

pub type Result<T> = std::result::Result<T, TtsError>;

/// Speech synthesis errors
#[derive(Debug, Error)]
pub enum TtsError {
    /// Bearer token was rejected
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Synthesizer refused the request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Provider API returned an error
    #[error("Provider API error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    /// Network or connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Synthesizer answered 200 with no audio
    #[error("synthesizer returned an empty audio body")]
    EmptyAudio,

    /// Audio could not be written to the staging directory
    #[error("failed to stage synthesized audio: {0}")]
    Staging(#[from] std::io::Error),
}
