use std::time::Duration;

use highlight_config::SttConfig;
use highlight_core::BearerToken;
use tokio_util::sync::CancellationToken;

use crate::{
    error::{Result, SttError},
    provider::SttProvider,
    types::{OperationId, OperationStatus, RecognitionResponse},
};

/// How long to wait for a recognition operation
#[derive(Debug, Clone, Copy)]
pub struct PollPolicy {
    /// Pause between two status queries
    pub interval: Duration,
    /// Upper bound on status queries
    pub max_attempts: u32,
}

impl From<&SttConfig> for PollPolicy {
    fn from(config: &SttConfig) -> Self {
        Self {
            interval: config.poll_interval,
            max_attempts: config.max_attempts,
        }
    }
}

/// Poll `operation` until it finishes, fails, runs out of attempts or is cancelled
///
/// The first query is made immediately; each later query follows a pause of
/// `policy.interval`. A finished operation with no chunks is an error.
pub async fn wait_for_completion(
    provider: &dyn SttProvider,
    token: &BearerToken,
    operation: &OperationId,
    policy: PollPolicy,
    cancel: &CancellationToken,
) -> Result<RecognitionResponse> {
    for attempt in 1..=policy.max_attempts {
        let status = tokio::select! {
            () = cancel.cancelled() => return Err(SttError::Cancelled),
            status = provider.operation_status(token, operation) => status?,
        };

        match status {
            OperationStatus::Done(response) if response.chunks.is_empty() => {
                return Err(SttError::EmptyResult);
            }
            OperationStatus::Done(response) => {
                tracing::info!(
                    operation = %operation,
                    attempts = attempt,
                    chunks = response.chunks.len(),
                    "recognition finished"
                );
                return Ok(response);
            }
            OperationStatus::Failed(error) => {
                let message = error.map_or_else(
                    || "operation finished without a response".to_string(),
                    |error| error.to_string(),
                );
                tracing::warn!(operation = %operation, "recognition failed: {message}");
                return Err(SttError::OperationFailed(message));
            }
            OperationStatus::Pending => {
                tracing::debug!(operation = %operation, attempt, "recognition pending");
            }
        }

        if attempt < policy.max_attempts {
            tokio::select! {
                () = cancel.cancelled() => return Err(SttError::Cancelled),
                () = tokio::time::sleep(policy.interval) => {}
            }
        }
    }

    Err(SttError::PollLimitExceeded {
        attempts: policy.max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use std::{
        collections::VecDeque,
        sync::{
            Mutex,
            atomic::{AtomicU32, Ordering},
        },
    };

    use async_trait::async_trait;
    use tokio::time::Instant;

    use super::*;
    use crate::types::{Alternative, Chunk, OperationError};

    /// Replays scripted statuses, reporting `Pending` once the script runs out
    struct ScriptedProvider {
        script: Mutex<VecDeque<OperationStatus>>,
        queries: AtomicU32,
    }

    impl ScriptedProvider {
        fn new(script: Vec<OperationStatus>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                queries: AtomicU32::new(0),
            }
        }

        fn queries(&self) -> u32 {
            self.queries.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SttProvider for ScriptedProvider {
        async fn submit(&self, _token: &BearerToken, _audio_url: &str) -> Result<OperationId> {
            Ok(OperationId("op".to_string()))
        }

        async fn operation_status(&self, _token: &BearerToken, _operation: &OperationId) -> Result<OperationStatus> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(OperationStatus::Pending))
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn done() -> OperationStatus {
        OperationStatus::Done(RecognitionResponse {
            chunks: vec![Chunk {
                alternatives: vec![Alternative::default()],
                channel_tag: None,
            }],
        })
    }

    fn policy(max_attempts: u32) -> PollPolicy {
        PollPolicy {
            interval: Duration::from_secs(5),
            max_attempts,
        }
    }

    async fn wait(provider: &ScriptedProvider, policy: PollPolicy) -> Result<RecognitionResponse> {
        wait_for_completion(
            provider,
            &BearerToken::new("t1.token"),
            &OperationId("op".to_string()),
            policy,
            &CancellationToken::new(),
        )
        .await
    }

    #[tokio::test(start_paused = true)]
    async fn stops_on_first_done_and_waits_between_queries() {
        let provider = ScriptedProvider::new(vec![OperationStatus::Pending, OperationStatus::Pending, done()]);
        let started = Instant::now();

        let response = wait(&provider, policy(720)).await.unwrap();

        assert_eq!(response.chunks.len(), 1);
        assert_eq!(provider.queries(), 3);
        assert_eq!(started.elapsed(), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn done_on_first_query_does_not_sleep() {
        let provider = ScriptedProvider::new(vec![done()]);
        let started = Instant::now();

        wait(&provider, policy(720)).await.unwrap();

        assert_eq!(provider.queries(), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_operation_stops_polling() {
        let provider = ScriptedProvider::new(vec![
            OperationStatus::Pending,
            OperationStatus::Failed(Some(OperationError {
                code: Some(3),
                message: "unsupported audio".to_string(),
            })),
            done(),
        ]);

        let err = wait(&provider, policy(720)).await.unwrap_err();

        assert!(matches!(err, SttError::OperationFailed(message) if message.contains("unsupported audio")));
        assert_eq!(provider.queries(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_without_error_has_generic_message() {
        let provider = ScriptedProvider::new(vec![OperationStatus::Failed(None)]);

        let err = wait(&provider, policy(720)).await.unwrap_err();

        assert!(matches!(err, SttError::OperationFailed(message) if message == "operation finished without a response"));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_chunks_is_an_error() {
        let provider = ScriptedProvider::new(vec![OperationStatus::Done(RecognitionResponse::default())]);

        let err = wait(&provider, policy(720)).await.unwrap_err();

        assert!(matches!(err, SttError::EmptyResult));
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_max_attempts() {
        let provider = ScriptedProvider::new(Vec::new());
        let started = Instant::now();

        let err = wait(&provider, policy(3)).await.unwrap_err();

        assert!(matches!(err, SttError::PollLimitExceeded { attempts: 3 }));
        assert_eq!(provider.queries(), 3);
        assert_eq!(started.elapsed(), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_interrupts_the_wait() {
        let provider = ScriptedProvider::new(Vec::new());
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(12)).await;
            trigger.cancel();
        });

        let err = wait_for_completion(
            &provider,
            &BearerToken::new("t1.token"),
            &OperationId("op".to_string()),
            policy(720),
            &cancel,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, SttError::Cancelled));
        assert_eq!(provider.queries(), 3);
    }
}
