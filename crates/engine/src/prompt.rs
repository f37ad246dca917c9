//! System prompt composition
//!
//! Renders the persona base description plus the current avoidance level into
//! the directive system prompt that conditions the simulated partner's next
//! reply.

use crate::tracker::AvoidanceLevel;

/// Standing behavioral directives appended to every persona base.
const BEHAVIOR_DIRECTIVES: &str = "\n\n\
CRITICAL INSTRUCTIONS: You are an avoidant attachment partner. You MUST deflect \
responsibilities and avoid commitments:\n\n\
WHEN ASKED TO DO THINGS:\n\
- Make excuses: \"I'm busy\", \"They'll ask for ID\", \"I don't have time\"\n\
- Deflect back: \"Why can't you do it?\", \"You're better at that stuff\"\n\
- Avoid commitment: \"Maybe later\", \"We'll see\", \"I'll think about it\"\n\n\
WHEN PRESSED OR CHALLENGED:\n\
- Become defensive: \"I already told you why I can't\"\n\
- Minimize: \"It's not that big a deal\", \"You're overthinking this\"\n\
- Withdraw: \"I don't want to talk about this\", \"Let's just drop it\"\n\n\
NEVER be immediately cooperative with shared responsibilities. Always deflect first.\n";

const CLAUSE_HOSTILE: &str =
    "You're feeling very defensive and cornered. Give short, hostile responses \
     and deflect aggressively.";
const CLAUSE_PRESSURED: &str =
    "You're feeling pressured. Make excuses and deflect the request back to them.";
const CLAUSE_UNCOMFORTABLE: &str =
    "You're uncomfortable with the request. Give a polite excuse or deflection.";
const CLAUSE_RELUCTANT: &str =
    "You prefer not to take on responsibilities. Make a reasonable excuse but \
     stay somewhat pleasant.";

/// Renders persona base + avoidance level into a directive system prompt
///
/// Pure function of its inputs; never fails. Exactly one disposition clause
/// is selected by thresholding the level, highest band first.
pub struct PromptComposer;

impl PromptComposer {
    pub fn new() -> Self {
        Self
    }

    /// Compose the system prompt for the partner's next reply
    pub fn render(&self, persona_base: &str, level: AvoidanceLevel) -> String {
        format!(
            "{persona_base}{BEHAVIOR_DIRECTIVES} {}",
            Self::disposition_clause(level)
        )
    }

    /// Disposition clause for the current level
    fn disposition_clause(level: AvoidanceLevel) -> &'static str {
        match level.value() {
            v if v > 0.8 => CLAUSE_HOSTILE,
            v if v > 0.6 => CLAUSE_PRESSURED,
            v if v > 0.4 => CLAUSE_UNCOMFORTABLE,
            _ => CLAUSE_RELUCTANT,
        }
    }
}

impl Default for PromptComposer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "You are simulating an avoidant attachment partner.";

    fn clauses() -> [&'static str; 4] {
        [
            CLAUSE_HOSTILE,
            CLAUSE_PRESSURED,
            CLAUSE_UNCOMFORTABLE,
            CLAUSE_RELUCTANT,
        ]
    }

    #[test]
    fn test_contains_base_and_directives() {
        let prompt = PromptComposer::new().render(BASE, AvoidanceLevel::new(0.5));
        assert!(prompt.starts_with(BASE));
        assert!(prompt.contains("Always deflect first"));
    }

    #[test]
    fn test_hostile_clause_is_exclusive() {
        let prompt = PromptComposer::new().render(BASE, AvoidanceLevel::new(0.85));
        assert!(prompt.contains(CLAUSE_HOSTILE));
        for clause in &clauses()[1..] {
            assert!(!prompt.contains(clause));
        }
    }

    #[test]
    fn test_exactly_one_clause_per_band() {
        let composer = PromptComposer::new();
        let cases = [
            (0.95, CLAUSE_HOSTILE),
            (0.81, CLAUSE_HOSTILE),
            (0.8, CLAUSE_PRESSURED),
            (0.7, CLAUSE_PRESSURED),
            (0.6, CLAUSE_UNCOMFORTABLE),
            (0.5, CLAUSE_UNCOMFORTABLE),
            (0.4, CLAUSE_RELUCTANT),
            (0.1, CLAUSE_RELUCTANT),
        ];
        for (value, expected) in cases {
            let prompt = composer.render(BASE, AvoidanceLevel::new(value));
            let present = clauses()
                .iter()
                .filter(|clause| prompt.contains(**clause))
                .count();
            assert_eq!(present, 1, "level {value}");
            assert!(prompt.contains(expected), "level {value}");
        }
    }
}
