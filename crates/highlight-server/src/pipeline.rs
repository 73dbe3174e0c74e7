use std::sync::Arc;

use highlight_config::{AlternativeSelection, Config};
use iam::{Authenticator, TokenSource};
use serde::Serialize;
use storage::{ObjectStore, S3Storage};
use stt::{PollPolicy, SpeechKitRecognizer, SttProvider, WordTiming};
use tokio_util::sync::CancellationToken;
use tts::{SpeechKitProvider, TtsProvider};

use crate::error::PipelineError;

/// Successful result of `POST /synthesize`
#[derive(Debug, Serialize)]
pub struct Alignment {
    pub audio_url: String,
    pub original_text: String,
    pub words: Vec<WordTiming>,
}

/// Authenticate, synthesize, upload, transcribe and align
///
/// Stages run strictly in order and the first failure aborts the run.
pub struct Pipeline {
    tokens: Arc<dyn TokenSource>,
    synthesizer: Arc<dyn TtsProvider>,
    store: Arc<dyn ObjectStore>,
    recognizer: Arc<dyn SttProvider>,
    poll: PollPolicy,
    alternatives: AlternativeSelection,
    shutdown: CancellationToken,
}

impl Pipeline {
    pub fn new(
        tokens: Arc<dyn TokenSource>,
        synthesizer: Arc<dyn TtsProvider>,
        store: Arc<dyn ObjectStore>,
        recognizer: Arc<dyn SttProvider>,
        poll: PollPolicy,
        alternatives: AlternativeSelection,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            tokens,
            synthesizer,
            store,
            recognizer,
            poll,
            alternatives,
            shutdown,
        }
    }

    /// Wire the cloud-backed stages from configuration
    pub async fn from_config(config: &Config, shutdown: CancellationToken) -> Self {
        Self::new(
            Arc::new(Authenticator::from_config(config)),
            Arc::new(SpeechKitProvider::from_config(config)),
            Arc::new(S3Storage::from_config(&config.storage).await),
            Arc::new(SpeechKitRecognizer::from_config(config)),
            PollPolicy::from(&config.stt),
            config.stt.alternatives,
            shutdown,
        )
    }

    pub async fn run(&self, text: String) -> Result<Alignment, PipelineError> {
        tracing::debug!(chars = text.chars().count(), "requesting IAM token");
        let token = self.tokens.issue_token().await.map_err(PipelineError::Authentication)?;

        tracing::debug!(provider = self.synthesizer.name(), "synthesizing speech");
        let artifact = self
            .synthesizer
            .synthesize(&token, &text)
            .await
            .map_err(PipelineError::Synthesis)?;

        tracing::debug!(file = artifact.file_name(), bytes = artifact.size(), "uploading audio");
        let stored = self.store.store(&artifact).await;

        // Removes the staged file whether or not the upload went through
        drop(artifact);
        let stored = stored.map_err(PipelineError::Upload)?;

        tracing::debug!(provider = self.recognizer.name(), key = %stored.key, "starting recognition");
        let operation = self
            .recognizer
            .submit(&token, stored.url.as_str())
            .await
            .map_err(PipelineError::RecognitionStart)?;

        let response = stt::wait_for_completion(self.recognizer.as_ref(), &token, &operation, self.poll, &self.shutdown)
            .await
            .map_err(PipelineError::RecognitionResult)?;

        let words = stt::align_words(&response.chunks, self.alternatives).map_err(PipelineError::RecognitionResult)?;

        tracing::info!(operation = %operation, words = words.len(), "alignment ready");

        Ok(Alignment {
            audio_url: stored.url.into(),
            original_text: text,
            words,
        })
    }
}
