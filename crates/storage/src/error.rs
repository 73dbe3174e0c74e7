use thiserror::Error;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Object storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Staged file could not be opened for upload
    #[error("failed to read staged audio: {0}")]
    Read(String),

    /// The bucket rejected the upload or could not be reached
    #[error("upload failed: {0}")]
    Upload(String),

    /// The retrieval URL could not be produced
    #[error("failed to generate pre-signed URL: {0}")]
    Presign(String),
}
