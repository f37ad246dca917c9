//! Conversation turns and the rolling history window

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Total message budget (system turn included) before the window is trimmed.
const MAX_MESSAGES: usize = 12;
/// Number of recent non-system turns kept after a trim.
const KEEP_RECENT: usize = 10;

/// Role of the speaker in a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    /// Trainee message
    User,
    /// Simulated partner message
    Assistant,
    /// System message (instructions)
    System,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
            TurnRole::System => "system",
        }
    }
}

impl std::fmt::Display for TurnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single turn in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    /// Role of the speaker
    pub role: TurnRole,
    /// Content of the turn
    pub content: String,
    /// When the turn occurred
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    /// Create a new turn
    pub fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a user turn
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(TurnRole::User, content)
    }

    /// Create an assistant turn
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(TurnRole::Assistant, content)
    }

    /// Get word count
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

/// Rolling conversation history.
///
/// Holds user/assistant turns only; the system turn is composed fresh each
/// turn by the session and counted against the window budget at request time.
/// Once the total (system turn plus history) exceeds [`MAX_MESSAGES`], only
/// the most recent [`KEEP_RECENT`] turns are kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    turns: Vec<Turn>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn, trimming the window if the budget is exceeded.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
        // +1 accounts for the system turn supplied at request time.
        if self.turns.len() + 1 > MAX_MESSAGES {
            let excess = self.turns.len() - KEEP_RECENT;
            self.turns.drain(..excess);
        }
    }

    /// Turns currently inside the window, oldest first
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Drop all turns
    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_creation() {
        let turn = Turn::user("could you handle the pharmacy run");
        assert_eq!(turn.role, TurnRole::User);
        assert_eq!(turn.word_count(), 6);
    }

    #[test]
    fn test_history_keeps_short_conversations_intact() {
        let mut history = History::new();
        for i in 0..11 {
            history.push(Turn::user(format!("message {i}")));
        }
        assert_eq!(history.len(), 11);
    }

    #[test]
    fn test_history_trims_to_recent_window() {
        let mut history = History::new();
        for i in 0..12 {
            history.push(Turn::user(format!("message {i}")));
        }
        // 12 turns + 1 system exceeds the budget; only the last 10 survive.
        assert_eq!(history.len(), 10);
        assert_eq!(history.turns()[0].content, "message 2");
        assert_eq!(history.turns()[9].content, "message 11");
    }

    #[test]
    fn test_history_clear() {
        let mut history = History::new();
        history.push(Turn::user("hello"));
        history.clear();
        assert!(history.is_empty());
    }
}
