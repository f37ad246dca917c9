//! HTTP routes and handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use attune_engine::AvoidanceBand;
use attune_session::TurnReport;

use crate::state::AppState;
use crate::ServerError;

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/styles", get(styles))
        .route("/sessions", post(create_session))
        .route("/sessions/:id", get(session_status).delete(delete_session))
        .route("/sessions/:id/messages", post(post_message))
        .route("/sessions/:id/reset", post(reset_session))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    model: String,
    model_available: bool,
    sessions: usize,
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model: state.model().model_name().to_string(),
        model_available: state.model().is_available().await,
        sessions: state.session_count(),
    })
}

#[derive(Debug, Serialize)]
struct StylesResponse {
    styles: Vec<String>,
}

async fn styles(State(state): State<Arc<AppState>>) -> Json<StylesResponse> {
    Json(StylesResponse {
        styles: state.styles(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct CreateSessionRequest {
    /// Persona style; server default when omitted
    style: Option<String>,
}

#[derive(Debug, Serialize)]
struct SessionResponse {
    session_id: Uuid,
    style: String,
    level: f32,
    band: AvoidanceBand,
    turns: usize,
}

async fn create_session(
    State(state): State<Arc<AppState>>,
    body: Option<Json<CreateSessionRequest>>,
) -> Result<Json<SessionResponse>, ServerError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let (id, style) = state.create_session(request.style.as_deref())?;

    let handle = state.session(id)?;
    let session = handle.lock().await;
    Ok(Json(SessionResponse {
        session_id: id,
        style,
        level: session.level().value(),
        band: session.level().band(),
        turns: session.history().len(),
    }))
}

async fn session_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, ServerError> {
    let style = state.session_style(id)?;
    let handle = state.session(id)?;
    let session = handle.lock().await;
    Ok(Json(SessionResponse {
        session_id: id,
        style,
        level: session.level().value(),
        band: session.level().band(),
        turns: session.history().len(),
    }))
}

#[derive(Debug, Deserialize)]
struct MessageRequest {
    message: String,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    session_id: Uuid,
    #[serde(flatten)]
    report: TurnReport,
}

async fn post_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<MessageRequest>,
) -> Result<Json<MessageResponse>, ServerError> {
    let handle = state.session(id)?;
    let mut session = handle.lock().await;
    let report = session.step(&body.message).await?;
    Ok(Json(MessageResponse {
        session_id: id,
        report,
    }))
}

async fn reset_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, ServerError> {
    let style = state.session_style(id)?;
    let handle = state.session(id)?;
    let mut session = handle.lock().await;
    session.reset();
    Ok(Json(SessionResponse {
        session_id: id,
        style,
        level: session.level().value(),
        band: session.level().band(),
        turns: session.history().len(),
    }))
}

async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<axum::http::StatusCode, ServerError> {
    state.remove_session(id)?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use attune_config::PersonaProfiles;
    use attune_core::{CompletionModel, CompletionParams, CompletionRequest};
    use attune_engine::Severity;

    struct MockModel;

    #[async_trait]
    impl CompletionModel for MockModel {
        async fn complete(&self, _request: CompletionRequest) -> attune_core::Result<String> {
            Ok("if i go, pharmacy will ask for id".to_string())
        }

        async fn is_available(&self) -> bool {
            true
        }

        fn model_name(&self) -> &str {
            "mock"
        }
    }

    fn app_state() -> Arc<AppState> {
        Arc::new(AppState::new(
            PersonaProfiles::default(),
            Arc::new(MockModel),
            CompletionParams::default(),
            "avoidant",
        ))
    }

    #[tokio::test]
    async fn test_message_flow() {
        let state = app_state();
        let (id, _) = state.create_session(None).unwrap();

        let handle = state.session(id).unwrap();
        let mut session = handle.lock().await;
        let report = session.step("u hve too much ego").await.unwrap();

        assert_eq!(report.coaching.severity, Severity::Critical);
        assert!(report.level > report.previous_level);
        assert_eq!(report.band, AvoidanceBand::Critical);
    }

    #[tokio::test]
    async fn test_router_builds() {
        let _router = router(app_state());
    }
}
