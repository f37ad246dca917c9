//! Coaching session orchestration
//!
//! One [`CoachingSession`] per trainee conversation. Each turn runs the full
//! pipeline: classify the message, move the partner's avoidance level, render
//! the directive prompt, call the completion provider, then derive coaching.
//! A failed provider call leaves the session exactly as it was.

pub mod session;

pub use session::{CoachingSession, TurnReport};

use thiserror::Error;

/// Session errors
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Completion error: {0}")]
    Completion(String),
}

impl From<attune_core::Error> for SessionError {
    fn from(err: attune_core::Error) -> Self {
        SessionError::Completion(err.to_string())
    }
}
