#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod alignment;
mod error;
mod poller;
mod provider;
mod types;

pub use alignment::{WordTiming, align_words, offset_to_millis};
pub use error::{Result, SttError};
pub use poller::{PollPolicy, wait_for_completion};
pub use provider::{SttProvider, speechkit::SpeechKitRecognizer};
pub use types::{
    Alternative, Chunk, OperationError, OperationId, OperationStatus, RecognitionResponse, RecognizedWord,
};
