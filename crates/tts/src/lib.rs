#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod provider;
mod types;

pub use error::{Result, TtsError};
pub use provider::{TtsProvider, speechkit::SpeechKitProvider};
pub use types::VoiceSettings;
