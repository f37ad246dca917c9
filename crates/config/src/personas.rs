//! Persona profiles keyed by attachment style
//!
//! The base description of each roleplay style, before the engine appends
//! disposition directives. Profiles load once at startup from a JSON file
//! shaped as `{"<style>": {"prompt": "..."}}`; built-in defaults cover the
//! shipped styles when no file is supplied.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One roleplay style
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaProfile {
    /// Base persona description fed to the prompt composer
    pub prompt: String,
    /// Human-readable name shown by callers
    #[serde(default)]
    pub display_name: Option<String>,
}

const AVOIDANT_PROMPT: &str = "\
You are simulating an avoidant attachment partner in a relationship. You tend to:
- Avoid taking on responsibilities when possible
- Deflect requests back to your partner
- Make excuses when asked to do tasks
- Become defensive when pressed
- Prefer independence and autonomy
- Get uncomfortable with emotional pressure

Respond as this partner would in conversation. Keep responses natural and realistic.";

const SECURE_PROMPT: &str = "\
You are simulating a securely attached partner in a relationship. You tend to:
- Communicate openly about needs and feelings
- Take on a fair share of responsibilities
- Stay calm when pressed or challenged
- Acknowledge your partner's perspective

Respond as this partner would in conversation. Keep responses natural and realistic.";

/// All known styles, keyed by style name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaProfiles {
    #[serde(flatten)]
    profiles: HashMap<String, PersonaProfile>,
}

impl Default for PersonaProfiles {
    fn default() -> Self {
        let mut profiles = HashMap::new();
        profiles.insert(
            "avoidant".to_string(),
            PersonaProfile {
                prompt: AVOIDANT_PROMPT.to_string(),
                display_name: Some("Avoidant partner".to_string()),
            },
        );
        profiles.insert(
            "secure".to_string(),
            PersonaProfile {
                prompt: SECURE_PROMPT.to_string(),
                display_name: Some("Secure partner".to_string()),
            },
        );
        Self { profiles }
    }
}

impl PersonaProfiles {
    /// Load profiles from a JSON file.
    ///
    /// Any failure here is fatal configuration: the caller must not start
    /// serving turns against a half-loaded persona source.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;

        let profiles: Self = serde_json::from_str(&raw).map_err(|e| {
            ConfigError::ParseError(format!("{}: {e}", path.display()))
        })?;
        profiles.validate()?;

        tracing::info!(
            path = %path.display(),
            styles = profiles.profiles.len(),
            "loaded persona profiles"
        );
        Ok(profiles)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.profiles.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "profiles".to_string(),
                message: "no persona styles defined".to_string(),
            });
        }
        for (style, profile) in &self.profiles {
            if profile.prompt.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("{style}.prompt"),
                    message: "persona prompt is empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Look up a style
    pub fn get(&self, style: &str) -> Option<&PersonaProfile> {
        self.profiles.get(style)
    }

    /// Look up a style, failing with the unknown name
    pub fn resolve(&self, style: &str) -> Result<&PersonaProfile, ConfigError> {
        self.get(style)
            .ok_or_else(|| ConfigError::UnknownStyle(style.to_string()))
    }

    /// Available style names
    pub fn styles(&self) -> Vec<&str> {
        self.profiles.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_profiles() {
        let profiles = PersonaProfiles::default();
        assert!(profiles.get("avoidant").is_some());
        assert!(profiles.get("secure").is_some());
        assert!(profiles
            .resolve("avoidant")
            .unwrap()
            .prompt
            .contains("avoidant attachment"));
    }

    #[test]
    fn test_unknown_style() {
        let profiles = PersonaProfiles::default();
        assert!(matches!(
            profiles.resolve("anxious"),
            Err(ConfigError::UnknownStyle(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"avoidant": {{"prompt": "You avoid things.", "display_name": "Avoidant"}}}}"#
        )
        .unwrap();

        let profiles = PersonaProfiles::load(file.path()).unwrap();
        assert_eq!(profiles.resolve("avoidant").unwrap().prompt, "You avoid things.");
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let result = PersonaProfiles::load("/nonexistent/profiles.json");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_malformed_file_is_fatal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json at all").unwrap();
        assert!(matches!(
            PersonaProfiles::load(file.path()),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_empty_prompt_is_fatal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"avoidant": {{"prompt": "  "}}}}"#).unwrap();
        assert!(matches!(
            PersonaProfiles::load(file.path()),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
