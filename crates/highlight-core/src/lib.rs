//! Primitives shared by the pipeline stages

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod artifact;
mod error;
mod http_client;
mod token;

pub use artifact::AudioArtifact;
pub use error::HttpError;
pub use http_client::http_client;
pub use token::BearerToken;
