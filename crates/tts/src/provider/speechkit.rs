use std::path::PathBuf;

use async_trait::async_trait;
use highlight_core::{AudioArtifact, BearerToken, http_client};
use reqwest::{Client, StatusCode};
use url::Url;

use crate::{error::TtsError, types::VoiceSettings};

use super::TtsProvider;

/// SpeechKit v1 synthesizer
pub struct SpeechKitProvider {
    client: Client,
    url: Url,
    folder_id: String,
    voice: VoiceSettings,
    staging_dir: Option<PathBuf>,
}

impl SpeechKitProvider {
    pub fn new(url: Url, folder_id: String, voice: VoiceSettings, staging_dir: Option<PathBuf>) -> Self {
        Self {
            client: http_client(),
            url,
            folder_id,
            voice,
            staging_dir,
        }
    }

    pub fn from_config(config: &highlight_config::Config) -> Self {
        Self::new(
            config.tts.url.clone(),
            config.cloud.folder_id.clone(),
            VoiceSettings::from(&config.tts),
            config.tts.staging_dir.clone(),
        )
    }

    /// Pick the staged file extension from the response content type
    fn extension_for(&self, content_type: Option<&str>) -> &'static str {
        let essence = content_type.and_then(|ct| ct.split(';').next()).map(str::trim);

        match essence {
            Some("audio/ogg" | "audio/opus") => "ogg",
            Some("audio/mpeg" | "audio/mp3") => "mp3",
            Some("audio/wav" | "audio/x-wav") => "wav",
            _ => self.voice.format.extension(),
        }
    }
}

#[async_trait]
impl TtsProvider for SpeechKitProvider {
    async fn synthesize(&self, token: &BearerToken, text: &str) -> crate::error::Result<AudioArtifact> {
        tracing::debug!(
            "SpeechKit TTS request: voice={}, emotion={}, speed={}, input_len={}",
            self.voice.voice,
            self.voice.emotion,
            self.voice.speed,
            text.len(),
        );

        let speed = self.voice.speed.to_string();
        let sample_rate = self.voice.format.sample_rate_hertz().map(|hz| hz.to_string());
        let mut form = vec![
            ("text", text),
            ("lang", self.voice.lang.as_str()),
            ("voice", self.voice.voice.as_str()),
            ("emotion", self.voice.emotion.as_str()),
            ("speed", speed.as_str()),
            ("folderId", self.folder_id.as_str()),
            ("format", self.voice.format.as_str()),
        ];
        if let Some(hz) = sample_rate.as_deref() {
            form.push(("sampleRateHertz", hz));
        }

        let response = self
            .client
            .post(self.url.clone())
            .header(http::header::AUTHORIZATION, token.authorization())
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("SpeechKit request failed: {e}");
                TtsError::ConnectionError(format!("Failed to send request to SpeechKit: {e}"))
            })?;

        let status = response.status();

        if status != StatusCode::OK {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::warn!("SpeechKit API error ({status}): {error_text}");

            return Err(match status.as_u16() {
                401 => TtsError::AuthenticationFailed(error_text),
                400 => TtsError::InvalidRequest(error_text),
                _ => TtsError::ProviderApiError {
                    status: status.as_u16(),
                    message: error_text,
                },
            });
        }

        let content_type = response
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let audio = response
            .bytes()
            .await
            .map_err(|e| TtsError::ConnectionError(format!("Failed to read SpeechKit response body: {e}")))?;

        if audio.is_empty() {
            return Err(TtsError::EmptyAudio);
        }

        let extension = self.extension_for(content_type.as_deref());
        let content_type = content_type.unwrap_or_else(|| self.voice.format.content_type().to_string());

        let artifact = AudioArtifact::stage(self.staging_dir.as_deref(), extension, content_type, &audio).await?;

        tracing::info!(file = artifact.file_name(), bytes = audio.len(), "speech synthesized");

        Ok(artifact)
    }

    fn name(&self) -> &str {
        "speechkit"
    }
}
