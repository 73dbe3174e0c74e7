use async_trait::async_trait;
use highlight_config::AudioFormat;
use highlight_core::{BearerToken, http_client};
use reqwest::{Client, Response, StatusCode};
use url::Url;

use super::SttProvider;
use crate::{
    error::SttError,
    types::{AudioSource, OperationBody, OperationId, OperationStatus, RecognitionConfig, RecognizeRequest, Specification},
};

/// SpeechKit v2 long-running recognizer
pub struct SpeechKitRecognizer {
    client: Client,
    recognize_url: Url,
    operation_url: Url,
    language: String,
    format: AudioFormat,
}

impl SpeechKitRecognizer {
    pub fn new(recognize_url: Url, operation_url: Url, language: String, format: AudioFormat) -> Self {
        Self {
            client: http_client(),
            recognize_url,
            operation_url,
            language,
            format,
        }
    }

    /// Recognizer for the audio the configured synthesizer produces
    pub fn from_config(config: &highlight_config::Config) -> Self {
        Self::new(
            config.stt.recognize_url.clone(),
            config.stt.operation_url.clone(),
            config.stt.language.clone(),
            config.tts.format,
        )
    }

    /// Encoding name the recognizer expects for the staged audio
    const fn audio_encoding(&self) -> &'static str {
        match self.format {
            AudioFormat::Oggopus => "OGG_OPUS",
            AudioFormat::Mp3 => "MP3",
            AudioFormat::Lpcm => "LINEAR16_PCM",
        }
    }

    /// Status URL of one operation, with the id as a single path segment
    fn operation_url(&self, operation: &OperationId) -> crate::error::Result<Url> {
        let mut url = self.operation_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                SttError::InvalidEndpoint(format!("operation URL '{}' cannot carry a path", self.operation_url))
            })?
            .pop_if_empty()
            .push(&operation.0);

        Ok(url)
    }

    async fn read_operation(response: Response, context: &str) -> crate::error::Result<OperationBody> {
        let status = response.status();

        if status != StatusCode::OK {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::warn!("SpeechKit {context} error ({status}): {error_text}");

            return Err(match status.as_u16() {
                401 => SttError::AuthenticationFailed(error_text),
                _ => SttError::ProviderApiError {
                    status: status.as_u16(),
                    message: error_text,
                },
            });
        }

        response
            .json::<OperationBody>()
            .await
            .map_err(|e| SttError::InvalidResponse(format!("Failed to parse {context} response: {e}")))
    }
}

#[async_trait]
impl SttProvider for SpeechKitRecognizer {
    async fn submit(&self, token: &BearerToken, audio_url: &str) -> crate::error::Result<OperationId> {
        let request = RecognizeRequest {
            config: RecognitionConfig {
                specification: Specification {
                    language_code: &self.language,
                    audio_encoding: self.audio_encoding(),
                    sample_rate_hertz: self.format.sample_rate_hertz(),
                },
            },
            audio: AudioSource { uri: audio_url },
        };

        let response = self
            .client
            .post(self.recognize_url.clone())
            .header(http::header::AUTHORIZATION, token.authorization())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("SpeechKit recognize request failed: {e}");
                SttError::ConnectionError(format!("Failed to send request to SpeechKit: {e}"))
            })?;

        let body = Self::read_operation(response, "recognize").await?;
        let id = body
            .id
            .ok_or_else(|| SttError::InvalidResponse("recognize response carried no operation id".to_string()))?;

        tracing::info!(
            operation = %id,
            language = %self.language,
            encoding = self.audio_encoding(),
            "recognition started"
        );

        Ok(id)
    }

    async fn operation_status(
        &self,
        token: &BearerToken,
        operation: &OperationId,
    ) -> crate::error::Result<OperationStatus> {
        let url = self.operation_url(operation)?;

        let response = self
            .client
            .get(url)
            .header(http::header::AUTHORIZATION, token.authorization())
            .send()
            .await
            .map_err(|e| SttError::ConnectionError(format!("Failed to query operation {operation}: {e}")))?;

        let status = Self::read_operation(response, "operation").await?.into_status();

        tracing::debug!(operation = %operation, done = !matches!(status, OperationStatus::Pending), "operation polled");

        Ok(status)
    }

    fn name(&self) -> &str {
        "speechkit"
    }
}
