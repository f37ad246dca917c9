//! Error types shared across the workspace

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Workspace-level error
#[derive(Error, Debug)]
pub enum Error {
    #[error("Completion error: {0}")]
    Completion(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Session error: {0}")]
    Session(String),
}
