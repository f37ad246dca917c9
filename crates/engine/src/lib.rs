//! Trigger-detection and avoidance-state engine
//!
//! The decision core of the coaching simulator:
//! - [`TriggerClassifier`] scans trainee text against the phrase lexicon
//! - [`AvoidanceTracker`] moves the partner's avoidance level
//! - [`CoachingAdvisor`] turns the same classification into feedback
//! - [`PromptComposer`] renders the level into the partner's system prompt
//!
//! Everything here is deterministic and pure; sessions own the state and
//! decide when an update commits. All weights, thresholds, and phrase lists
//! live in this crate so every entry point shares one engine.
//!
//! # Example
//!
//! ```
//! use attune_engine::{AvoidanceLevel, Engine};
//!
//! let engine = Engine::new();
//! let classification = engine.classify("why cant u buy it?");
//! let level = engine.update(AvoidanceLevel::baseline(), &classification);
//! let coaching = engine.advise(&classification, level);
//! let prompt = engine.render_prompt("You are an avoidant partner.", level);
//! assert!(level.value() > 0.6);
//! assert!(!coaching.suggestions.is_empty());
//! assert!(!prompt.is_empty());
//! ```

pub mod advisor;
pub mod classifier;
pub mod lexicon;
pub mod prompt;
pub mod tracker;

pub use advisor::{Coaching, CoachingAdvisor, Severity};
pub use classifier::{Classification, TriggerClassifier};
pub use lexicon::{TriggerCategory, TriggerLexicon, LEXICON};
pub use prompt::PromptComposer;
pub use tracker::{AvoidanceBand, AvoidanceLevel, AvoidanceTracker};

/// The shared engine: one classifier, tracker, advisor, and composer
///
/// Stateless by itself; callers pass the avoidance level in and out.
#[derive(Default)]
pub struct Engine {
    classifier: TriggerClassifier,
    tracker: AvoidanceTracker,
    advisor: CoachingAdvisor,
    composer: PromptComposer,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one utterance into per-category trigger counts
    pub fn classify(&self, utterance: &str) -> Classification {
        self.classifier.classify(utterance)
    }

    /// Compute the next avoidance level from a classification
    pub fn update(&self, level: AvoidanceLevel, result: &Classification) -> AvoidanceLevel {
        self.tracker.update(level, result)
    }

    /// Derive coaching from the classification and the post-update level
    pub fn advise(&self, result: &Classification, level: AvoidanceLevel) -> Coaching {
        self.advisor.advise(result, level)
    }

    /// Render the directive system prompt for the partner's next reply
    pub fn render_prompt(&self, persona_base: &str, level: AvoidanceLevel) -> String {
        self.composer.render(persona_base, level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escalation_round_trip() {
        let engine = Engine::new();

        // The documented escalation: challenge the excuse, then press.
        let mut level = AvoidanceLevel::baseline();

        let result = engine.classify("i dont think they will ask");
        level = engine.update(level, &result);
        assert!((level.value() - 0.8).abs() < 1e-6);

        let result = engine.classify("y cant u buy?");
        level = engine.update(level, &result);
        assert!((level.value() - 0.95).abs() < 1e-6);

        let coaching = engine.advise(&result, level);
        assert_eq!(coaching.severity, Severity::Warning);

        let prompt = engine.render_prompt("Base persona.", level);
        assert!(prompt.contains("short, hostile responses"));
    }
}
