use http::StatusCode;

/// Trait for domain errors that can be converted to HTTP responses
///
/// The server layer turns these into `{"detail": ...}` bodies, keeping
/// stage errors decoupled from axum.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Message safe to expose to API consumers
    fn detail(&self) -> String;
}
