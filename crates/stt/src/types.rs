use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle of an asynchronous recognition job
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct OperationId(pub String);

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Observed state of a recognition operation
#[derive(Debug)]
pub enum OperationStatus {
    /// Not done yet
    Pending,
    /// Done with a recognition payload
    Done(RecognitionResponse),
    /// Done without a payload, with the operation error if one was reported
    Failed(Option<OperationError>),
}

/// Error attached to a finished operation
#[derive(Debug, Clone, Deserialize)]
pub struct OperationError {
    #[serde(default)]
    pub code: Option<i32>,
    #[serde(default)]
    pub message: String,
}

impl fmt::Display for OperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{} (code {code})", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Recognition payload of a finished operation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecognitionResponse {
    #[serde(default)]
    pub chunks: Vec<Chunk>,
}

/// One recognized utterance
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
    #[serde(default)]
    pub alternatives: Vec<Alternative>,
    #[serde(default)]
    pub channel_tag: Option<String>,
}

/// A hypothesis for a chunk, best first
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Alternative {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub words: Vec<RecognizedWord>,
}

/// Word with offsets as duration strings (e.g. `"1.200s"`)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognizedWord {
    pub word: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub confidence: Option<f64>,
}

// -- Wire types for the recognition API --

#[derive(Debug, Serialize)]
pub(crate) struct RecognizeRequest<'a> {
    pub config: RecognitionConfig<'a>,
    pub audio: AudioSource<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RecognitionConfig<'a> {
    pub specification: Specification<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Specification<'a> {
    pub language_code: &'a str,
    pub audio_encoding: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate_hertz: Option<u32>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AudioSource<'a> {
    pub uri: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OperationBody {
    #[serde(default)]
    pub id: Option<OperationId>,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub response: Option<RecognitionResponse>,
    #[serde(default)]
    pub error: Option<OperationError>,
}

impl OperationBody {
    pub(crate) fn into_status(self) -> OperationStatus {
        match (self.done, self.response) {
            (false, _) => OperationStatus::Pending,
            (true, Some(response)) => OperationStatus::Done(response),
            (true, None) => OperationStatus::Failed(self.error),
        }
    }
}
