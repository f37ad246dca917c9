//! Completion provider integration
//!
//! Implements [`attune_core::CompletionModel`] against OpenAI-compatible
//! chat-completions endpoints. Provider failures are turn-scoped: callers
//! surface them and retry; no session state depends on this crate.

pub mod backend;

pub use backend::{OpenAiBackend, ProviderConfig};

use thiserror::Error;

/// Provider errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

impl From<LlmError> for attune_core::Error {
    fn from(err: LlmError) -> Self {
        attune_core::Error::Completion(err.to_string())
    }
}
