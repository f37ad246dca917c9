//! Configuration management for the coaching simulator
//!
//! Supports loading configuration from:
//! - TOML files
//! - Environment variables (ATTUNE_ prefix)
//!
//! Persona profiles (the roleplay styles) load from a JSON file keyed by
//! style name, with built-in defaults when no file is supplied. A missing or
//! malformed profile source is a fatal startup error, surfaced before any
//! turn is processed.

pub mod personas;
pub mod settings;

pub use personas::{PersonaProfile, PersonaProfiles};
pub use settings::{
    load_settings, CompletionSettings, PersonaSettings, ServerSettings, Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Unknown persona style: {0}")]
    UnknownStyle(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
