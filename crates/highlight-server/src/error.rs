use axum::{
    Json,
    response::{IntoResponse, Response},
};
use highlight_core::HttpError;
use http::StatusCode;
use iam::IamError;
use serde::Serialize;
use storage::StorageError;
use stt::SttError;
use thiserror::Error;
use tts::TtsError;

/// Failure of one pipeline stage
///
/// The display text is the client-facing message; the stage error is kept
/// as the source and only ever logged.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to obtain IAM token")]
    Authentication(#[source] IamError),

    #[error("Failed to synthesize speech")]
    Synthesis(#[source] TtsError),

    #[error("Failed to upload audio file")]
    Upload(#[source] StorageError),

    #[error("Failed to start speech recognition")]
    RecognitionStart(#[source] SttError),

    #[error("Failed to get recognition result")]
    RecognitionResult(#[source] SttError),
}

impl PipelineError {
    /// Stage name used in logs
    pub const fn stage(&self) -> &'static str {
        match self {
            Self::Authentication(_) => "authenticate",
            Self::Synthesis(_) => "synthesize",
            Self::Upload(_) => "upload",
            Self::RecognitionStart(_) => "recognize",
            Self::RecognitionResult(_) => "poll",
        }
    }

    /// Whether the failure comes from local setup rather than a cloud call
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Authentication(e) if e.is_configuration())
    }

    fn cause(&self) -> &dyn std::error::Error {
        match self {
            Self::Authentication(e) => e,
            Self::Synthesis(e) => e,
            Self::Upload(e) => e,
            Self::RecognitionStart(e) | Self::RecognitionResult(e) => e,
        }
    }
}

impl HttpError for PipelineError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn detail(&self) -> String {
        self.to_string()
    }
}

/// Error body shared by every failure response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Build a `{"detail": ...}` response
pub fn detail_response(status: StatusCode, detail: impl Into<String>) -> Response {
    (status, Json(ErrorBody { detail: detail.into() })).into_response()
}

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        if self.is_configuration() {
            tracing::error!(stage = self.stage(), cause = %self.cause(), "{self}, check the service account key");
        } else {
            tracing::warn!(stage = self.stage(), cause = %self.cause(), "{self}");
        }

        detail_response(self.status_code(), self.detail())
    }
}
