//! Runtime settings
//!
//! Layered loading: an optional TOML file, then `ATTUNE_`-prefixed
//! environment variables (`ATTUNE_COMPLETION__API_KEY` and friends).

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Top-level settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerSettings,
    /// Completion-provider settings
    #[serde(default)]
    pub completion: CompletionSettings,
    /// Persona selection
    #[serde(default)]
    pub persona: PersonaSettings,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Bind host
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8080
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    /// Bind address as host:port
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Completion-provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionSettings {
    /// OpenAI-compatible API base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// API key (usually via ATTUNE_COMPLETION__API_KEY)
    #[serde(default)]
    pub api_key: Option<String>,
    /// Maximum tokens per reply
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Frequency penalty
    #[serde(default = "default_frequency_penalty")]
    pub frequency_penalty: f32,
    /// Presence penalty
    #[serde(default = "default_presence_penalty")]
    pub presence_penalty: f32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}
fn default_model() -> String {
    "gpt-4o-mini".to_string()
}
fn default_max_tokens() -> u32 {
    60
}
fn default_temperature() -> f32 {
    0.7
}
fn default_frequency_penalty() -> f32 {
    0.3
}
fn default_presence_penalty() -> f32 {
    0.1
}
fn default_timeout_seconds() -> u64 {
    30
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            frequency_penalty: default_frequency_penalty(),
            presence_penalty: default_presence_penalty(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Persona selection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaSettings {
    /// Default style for new sessions
    #[serde(default = "default_style")]
    pub style: String,
    /// Optional path to a persona profiles JSON file
    #[serde(default)]
    pub profiles_path: Option<String>,
}

fn default_style() -> String {
    "avoidant".to_string()
}

impl Default for PersonaSettings {
    fn default() -> Self {
        Self {
            style: default_style(),
            profiles_path: None,
        }
    }
}

/// Load settings from an optional file plus environment overrides
pub fn load_settings(path: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = match path {
        Some(path) => builder.add_source(File::with_name(path)),
        None => builder.add_source(File::with_name("attune").required(false)),
    };

    let cfg = builder
        .add_source(Environment::with_prefix("ATTUNE").separator("__"))
        .build()?;

    cfg.try_deserialize().map_err(ConfigError::from)
}
