//! Trigger categories and the phrase lexicon
//!
//! The lexicon is the single source of truth for which phrases count as
//! which conversational trigger. Matching is plain lowercase substring
//! search; keeping it a literal phrase table keeps every classification
//! explainable and reproducible.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Behavioral trigger detected in trainee text
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TriggerCategory {
    /// Trainee argues with the partner's excuse
    DeflectionChallenge,
    /// Trainee pushes the responsibility back ("why cant you")
    CounterDeflection,
    /// Trainee demands reasons from a defensive partner
    PressingBehavior,
    /// Hostile or overwhelmed emotional language
    EmotionalEscalation,
    /// Direct insult or character attack
    PersonalAttack,
    /// Threat to end the relationship
    RelationshipThreat,
    /// Respectful request phrasing
    PositiveCommunication,
    /// Offering space and autonomy
    SpaceGiving,
    /// Acknowledging the partner's perspective
    Validation,
}

impl TriggerCategory {
    /// All categories, in lexicon order
    pub const ALL: [TriggerCategory; 9] = [
        TriggerCategory::DeflectionChallenge,
        TriggerCategory::CounterDeflection,
        TriggerCategory::PressingBehavior,
        TriggerCategory::EmotionalEscalation,
        TriggerCategory::PersonalAttack,
        TriggerCategory::RelationshipThreat,
        TriggerCategory::PositiveCommunication,
        TriggerCategory::SpaceGiving,
        TriggerCategory::Validation,
    ];

    /// Get category display name
    pub fn display_name(&self) -> &'static str {
        match self {
            TriggerCategory::DeflectionChallenge => "Deflection Challenge",
            TriggerCategory::CounterDeflection => "Counter-Deflection",
            TriggerCategory::PressingBehavior => "Pressing Behavior",
            TriggerCategory::EmotionalEscalation => "Emotional Escalation",
            TriggerCategory::PersonalAttack => "Personal Attack",
            TriggerCategory::RelationshipThreat => "Relationship Threat",
            TriggerCategory::PositiveCommunication => "Positive Communication",
            TriggerCategory::SpaceGiving => "Space Giving",
            TriggerCategory::Validation => "Validation",
        }
    }

    /// Check if this category escalates the partner's avoidance
    pub fn is_negative(&self) -> bool {
        matches!(
            self,
            TriggerCategory::DeflectionChallenge
                | TriggerCategory::CounterDeflection
                | TriggerCategory::PressingBehavior
                | TriggerCategory::EmotionalEscalation
                | TriggerCategory::PersonalAttack
                | TriggerCategory::RelationshipThreat
        )
    }

    /// Check if this category de-escalates the partner's avoidance
    pub fn is_positive(&self) -> bool {
        matches!(
            self,
            TriggerCategory::PositiveCommunication
                | TriggerCategory::SpaceGiving
                | TriggerCategory::Validation
        )
    }
}

impl std::fmt::Display for TriggerCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

const DEFLECTION_CHALLENGE: &[&str] = &[
    "i dont think they will",
    "i don't think they will",
    "that wont happen",
    "that won't happen",
    "youre overthinking",
    "you're overthinking",
];

const COUNTER_DEFLECTION: &[&str] = &[
    "why cant you",
    "why can't you",
    "why cant u",
    "y cant u",
    "why dont you",
    "why don't you",
    "why dont u",
    "you should",
    "its your turn",
    "it's your turn",
];

const PRESSING_BEHAVIOR: &[&str] = &[
    "why cant you just",
    "why can't you just",
    "give me one reason",
    "tell me a reason",
    "tell me why",
];

const EMOTIONAL_ESCALATION: &[&str] = &[
    "crying",
    "this is ridiculous",
    "i give up",
    "whatever",
    "fuck",
    "fck",
    "shit",
    "damn",
    "hate",
    "can't stand",
    "cant stand",
    "fed up",
    "done with",
    "over it",
    "stupid",
    "crazy",
    "mad",
    "angry",
    "frustrated",
    "pissed",
    "sad",
    "anxious",
];

const PERSONAL_ATTACK: &[&str] = &[
    "too much ego",
    "selfish",
    "you always",
    "you never",
    "go fuck",
    "fck ur",
    "screw you",
    "hate you",
    "piece of shit",
    "asshole",
    "wrong person",
    "waste of time",
    "useless",
    "pathetic",
    "loser",
    "idiot",
    "stupid",
    "moron",
    "dumb",
];

const RELATIONSHIP_THREAT: &[&str] = &[
    "leave this marriage",
    "leave me",
    "need to leave",
    "want a divorce",
    "not meant to",
    "break up",
    "leave you",
    "find someone",
    "better than you",
    "done with you",
    "can't do this",
    "cant do this",
    "want out",
    "end this",
    "we're done",
    "were done",
    "it's over",
    "its over",
];

const POSITIVE_COMMUNICATION: &[&str] = &[
    "can you",
    "could you",
    "would you mind",
    "would you be able",
];

const SPACE_GIVING: &[&str] = &[
    "when you're ready",
    "when youre ready",
    "no pressure",
    "take your time",
    "if you want",
];

const VALIDATION: &[&str] = &[
    "i understand",
    "that makes sense",
    "i appreciate",
    "thank you",
    "that's fair",
    "thats fair",
];

/// Mapping from trigger category to matchable phrases
pub struct TriggerLexicon {
    entries: [(TriggerCategory, &'static [&'static str]); 9],
}

impl TriggerLexicon {
    fn builtin() -> Self {
        Self {
            entries: [
                (TriggerCategory::DeflectionChallenge, DEFLECTION_CHALLENGE),
                (TriggerCategory::CounterDeflection, COUNTER_DEFLECTION),
                (TriggerCategory::PressingBehavior, PRESSING_BEHAVIOR),
                (TriggerCategory::EmotionalEscalation, EMOTIONAL_ESCALATION),
                (TriggerCategory::PersonalAttack, PERSONAL_ATTACK),
                (TriggerCategory::RelationshipThreat, RELATIONSHIP_THREAT),
                (
                    TriggerCategory::PositiveCommunication,
                    POSITIVE_COMMUNICATION,
                ),
                (TriggerCategory::SpaceGiving, SPACE_GIVING),
                (TriggerCategory::Validation, VALIDATION),
            ],
        }
    }

    /// Iterate over (category, phrases) entries
    pub fn entries(&self) -> impl Iterator<Item = (TriggerCategory, &'static [&'static str])> + '_ {
        self.entries.iter().copied()
    }

    /// Phrases for one category
    pub fn phrases(&self, category: TriggerCategory) -> &'static [&'static str] {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, phrases)| *phrases)
            .unwrap_or(&[])
    }
}

/// Process-wide lexicon, loaded once
pub static LEXICON: Lazy<TriggerLexicon> = Lazy::new(TriggerLexicon::builtin);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_phrases() {
        for category in TriggerCategory::ALL {
            assert!(
                !LEXICON.phrases(category).is_empty(),
                "no phrases for {category}"
            );
        }
    }

    #[test]
    fn test_phrases_are_lowercase() {
        for (_, phrases) in LEXICON.entries() {
            for phrase in phrases {
                assert_eq!(*phrase, phrase.to_lowercase());
            }
        }
    }

    #[test]
    fn test_category_polarity() {
        assert!(TriggerCategory::PersonalAttack.is_negative());
        assert!(TriggerCategory::RelationshipThreat.is_negative());
        assert!(TriggerCategory::Validation.is_positive());
        assert!(!TriggerCategory::SpaceGiving.is_negative());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&TriggerCategory::CounterDeflection).unwrap();
        assert_eq!(json, "\"counter_deflection\"");
    }
}
