//! Shared server state and session management

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::Mutex;
use uuid::Uuid;

use attune_config::PersonaProfiles;
use attune_core::{CompletionModel, CompletionParams};
use attune_session::CoachingSession;

use crate::ServerError;

/// A live session entry.
///
/// The outer map lock is held only for lookup; the per-session mutex
/// serializes turns so exactly one update is in flight per session.
pub type SessionHandle = Arc<Mutex<CoachingSession>>;

/// Shared application state
pub struct AppState {
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
    profiles: PersonaProfiles,
    model: Arc<dyn CompletionModel>,
    params: CompletionParams,
    default_style: String,
}

struct SessionEntry {
    style: String,
    session: SessionHandle,
}

impl AppState {
    pub fn new(
        profiles: PersonaProfiles,
        model: Arc<dyn CompletionModel>,
        params: CompletionParams,
        default_style: impl Into<String>,
    ) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            profiles,
            model,
            params,
            default_style: default_style.into(),
        }
    }

    /// Create a session for the requested style (default style when `None`)
    pub fn create_session(&self, style: Option<&str>) -> Result<(Uuid, String), ServerError> {
        let style = style.unwrap_or(&self.default_style).to_string();
        let profile = self
            .profiles
            .get(&style)
            .ok_or_else(|| ServerError::UnknownStyle(style.clone()))?;

        let session = CoachingSession::new(
            profile.prompt.clone(),
            self.model.clone(),
            self.params.clone(),
        );

        let id = Uuid::new_v4();
        self.sessions.write().insert(
            id,
            SessionEntry {
                style: style.clone(),
                session: Arc::new(Mutex::new(session)),
            },
        );

        tracing::info!(session = %id, %style, "created session");
        Ok((id, style))
    }

    /// Look up a session handle
    pub fn session(&self, id: Uuid) -> Result<SessionHandle, ServerError> {
        self.sessions
            .read()
            .get(&id)
            .map(|entry| entry.session.clone())
            .ok_or_else(|| ServerError::SessionNotFound(id.to_string()))
    }

    /// Style a session was created with
    pub fn session_style(&self, id: Uuid) -> Result<String, ServerError> {
        self.sessions
            .read()
            .get(&id)
            .map(|entry| entry.style.clone())
            .ok_or_else(|| ServerError::SessionNotFound(id.to_string()))
    }

    /// Remove a session
    pub fn remove_session(&self, id: Uuid) -> Result<(), ServerError> {
        self.sessions
            .write()
            .remove(&id)
            .map(|_| tracing::info!(session = %id, "removed session"))
            .ok_or_else(|| ServerError::SessionNotFound(id.to_string()))
    }

    /// Number of live sessions
    pub fn session_count(&self) -> usize {
        self.sessions.read().len()
    }

    /// Completion model handle
    pub fn model(&self) -> &Arc<dyn CompletionModel> {
        &self.model
    }

    /// Available persona styles
    pub fn styles(&self) -> Vec<String> {
        self.profiles
            .styles()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use attune_core::CompletionRequest;

    struct MockModel;

    #[async_trait]
    impl CompletionModel for MockModel {
        async fn complete(&self, _request: CompletionRequest) -> attune_core::Result<String> {
            Ok("maybe later".to_string())
        }

        async fn is_available(&self) -> bool {
            true
        }

        fn model_name(&self) -> &str {
            "mock"
        }
    }

    fn state() -> AppState {
        AppState::new(
            PersonaProfiles::default(),
            Arc::new(MockModel),
            CompletionParams::default(),
            "avoidant",
        )
    }

    #[test]
    fn test_create_and_lookup() {
        let state = state();
        let (id, style) = state.create_session(None).unwrap();
        assert_eq!(style, "avoidant");
        assert!(state.session(id).is_ok());
        assert_eq!(state.session_count(), 1);
    }

    #[test]
    fn test_unknown_style_rejected() {
        let state = state();
        assert!(matches!(
            state.create_session(Some("anxious")),
            Err(ServerError::UnknownStyle(_))
        ));
    }

    #[test]
    fn test_sessions_are_isolated() {
        let state = state();
        let (a, _) = state.create_session(None).unwrap();
        let (b, _) = state.create_session(Some("secure")).unwrap();
        assert_ne!(a, b);
        assert_eq!(state.session_style(b).unwrap(), "secure");
        assert_eq!(state.session_count(), 2);
    }

    #[test]
    fn test_remove_session() {
        let state = state();
        let (id, _) = state.create_session(None).unwrap();
        state.remove_session(id).unwrap();
        assert!(matches!(
            state.session(id),
            Err(ServerError::SessionNotFound(_))
        ));
    }
}
