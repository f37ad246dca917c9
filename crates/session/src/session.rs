//! The coaching session

use std::sync::Arc;

use serde::Serialize;

use attune_core::{CompletionModel, CompletionParams, CompletionRequest, History, Turn};
use attune_engine::{AvoidanceBand, AvoidanceLevel, Classification, Coaching, Engine};

use crate::SessionError;

/// Everything the caller needs to present one processed turn
#[derive(Debug, Clone, Serialize)]
pub struct TurnReport {
    /// The partner's reply, whitespace-trimmed
    pub reply: String,
    /// Avoidance level before this turn
    pub previous_level: f32,
    /// Avoidance level after this turn
    pub level: f32,
    /// Presentation band for the new level
    pub band: AvoidanceBand,
    /// Trigger counts detected in the trainee's message
    pub classification: Classification,
    /// Coaching feedback and ranked rephrasings
    pub coaching: Coaching,
}

/// One trainee's conversation with the simulated partner
///
/// Owns the only copy of the avoidance level and the rolling history.
/// Sessions are independent; nothing here is shared across trainees.
pub struct CoachingSession {
    persona_base: String,
    engine: Engine,
    model: Arc<dyn CompletionModel>,
    params: CompletionParams,
    history: History,
    level: AvoidanceLevel,
}

impl CoachingSession {
    /// Create a session at the baseline disposition
    pub fn new(
        persona_base: impl Into<String>,
        model: Arc<dyn CompletionModel>,
        params: CompletionParams,
    ) -> Self {
        Self {
            persona_base: persona_base.into(),
            engine: Engine::new(),
            model,
            params,
            history: History::new(),
            level: AvoidanceLevel::baseline(),
        }
    }

    /// Current avoidance level
    pub fn level(&self) -> AvoidanceLevel {
        self.level
    }

    /// Conversation history inside the rolling window
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Process one trainee message.
    ///
    /// The new level and the turn are committed only after the provider call
    /// succeeds; on failure the session is unchanged and the same message can
    /// be retried safely.
    pub async fn step(&mut self, input: &str) -> Result<TurnReport, SessionError> {
        let classification = self.engine.classify(input);
        let previous = self.level;
        let next = self.engine.update(previous, &classification);

        // The partner's reply must reflect the post-update disposition.
        let system_prompt = self.engine.render_prompt(&self.persona_base, next);
        let request = CompletionRequest::new(system_prompt)
            .with_params(self.params.clone())
            .with_history(self.history.turns())
            .with_user_message(input);

        let raw = self.model.complete(request).await?;
        let reply = raw.trim().to_string();

        self.level = next;
        self.history.push(Turn::user(input));
        self.history.push(Turn::assistant(reply.clone()));

        let coaching = self.engine.advise(&classification, next);

        tracing::debug!(
            previous = %previous,
            level = %next,
            severity = ?coaching.severity,
            "processed turn"
        );

        Ok(TurnReport {
            reply,
            previous_level: previous.value(),
            level: next.value(),
            band: next.band(),
            classification,
            coaching,
        })
    }

    /// Return the partner to the baseline disposition and clear history
    pub fn reset(&mut self) {
        self.level = AvoidanceLevel::baseline();
        self.history.clear();
    }
}
