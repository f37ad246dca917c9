//! Coaching feedback derived from a turn's classification
//!
//! Selection is an ordered rule list evaluated top-down, first match wins.
//! The order mirrors the tracker's escalation priorities: threats before
//! attacks before conflict patterns, with high standing avoidance checked
//! before any positive feedback.

use serde::{Deserialize, Serialize};

use crate::classifier::Classification;
use crate::lexicon::TriggerCategory;
use crate::tracker::AvoidanceLevel;

/// Severity class of a coaching message, used by callers to pick a visual
/// treatment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    Warning,
    Positive,
    Neutral,
}

/// One turn's coaching: a tagged message plus ranked rephrasings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coaching {
    /// Severity class for presentation
    pub severity: Severity,
    /// Short feedback explaining why the message helps or hurts
    pub message: String,
    /// Ranked alternative phrasings, best first
    pub suggestions: Vec<String>,
}

/// Condition under which a coaching rule fires
enum When {
    /// Any of the listed categories matched this turn
    Any(&'static [TriggerCategory]),
    /// The avoidance level alone is past the threshold
    LevelAbove(f32),
}

impl When {
    fn matches(&self, result: &Classification, level: AvoidanceLevel) -> bool {
        match self {
            When::Any(categories) => categories.iter().any(|c| result.has(*c)),
            When::LevelAbove(threshold) => level.value() > *threshold,
        }
    }
}

struct CoachingRule {
    when: When,
    severity: Severity,
    message: &'static str,
    suggestions: [&'static str; 4],
}

impl CoachingRule {
    fn to_coaching(&self) -> Coaching {
        Coaching {
            severity: self.severity,
            message: self.message.to_string(),
            suggestions: self.suggestions.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// The cascade, highest priority first
const RULES: [CoachingRule; 8] = [
    CoachingRule {
        when: When::Any(&[TriggerCategory::RelationshipThreat]),
        severity: Severity::Critical,
        message: "Relationship threat: you just threatened the relationship itself. \
                  This is the most damaging move available and needs immediate repair.",
        suggestions: [
            "I'm sorry, I didn't mean that about leaving",
            "I was angry and said something I don't mean",
            "I don't actually want to end this",
            "Can we please talk when I'm calmer?",
        ],
    },
    CoachingRule {
        when: When::Any(&[TriggerCategory::PersonalAttack]),
        severity: Severity::Critical,
        message: "Personal attack: you attacked them personally with hostile language. \
                  This causes maximum withdrawal and lasting damage.",
        suggestions: [
            "I'm so sorry for calling you names",
            "That was completely out of line",
            "I don't actually think those things about you",
            "I need to apologize for attacking you personally",
        ],
    },
    CoachingRule {
        when: When::Any(&[TriggerCategory::EmotionalEscalation]),
        severity: Severity::Warning,
        message: "Emotional escalation: you're using hostile, aggressive language. \
                  This will make them completely shut down.",
        suggestions: [
            "I'm sorry for getting so heated",
            "I need to calm down before we continue",
            "That came out wrong, I'm just frustrated",
            "Let me try again when I'm not so angry",
        ],
    },
    CoachingRule {
        when: When::Any(&[TriggerCategory::DeflectionChallenge]),
        severity: Severity::Warning,
        message: "Deflection challenged: arguing with their excuse escalates the \
                  conflict. Accept it and offer to handle the task yourself.",
        suggestions: [
            "That's totally understandable",
            "No worries, I'll figure it out",
            "Makes sense, let me handle it",
            "I get it, I'll take care of it",
        ],
    },
    CoachingRule {
        when: When::Any(&[
            TriggerCategory::CounterDeflection,
            TriggerCategory::PressingBehavior,
        ]),
        severity: Severity::Warning,
        message: "Deflection battle: you're both pushing the responsibility back and \
                  forth. Step back and take the initiative instead.",
        suggestions: [
            "You know what, I'll just take care of it",
            "Let me handle this one",
            "No problem, I can do it myself",
            "This doesn't need to be complicated",
        ],
    },
    CoachingRule {
        when: When::LevelAbove(0.8),
        severity: Severity::Warning,
        message: "High avoidance: they're already deeply defensive, even without a \
                  fresh trigger. Lower the temperature before asking for anything.",
        suggestions: [
            "I'm sorry this got so heated",
            "This isn't worth fighting about",
            "Let me just handle it myself",
            "I didn't mean to make this difficult",
        ],
    },
    CoachingRule {
        when: When::Any(&[
            TriggerCategory::SpaceGiving,
            TriggerCategory::PositiveCommunication,
        ]),
        severity: Severity::Positive,
        message: "Respectful approach: you're giving them space and autonomy. \
                  This is exactly what an avoidant partner needs.",
        suggestions: [
            "Thanks for understanding",
            "I appreciate you being flexible",
            "Let me know what works for you",
            "We can figure this out together",
        ],
    },
    CoachingRule {
        when: When::Any(&[TriggerCategory::Validation]),
        severity: Severity::Positive,
        message: "Good validation: you're acknowledging their perspective. \
                  This builds trust.",
        suggestions: [
            "I hear you, that makes sense",
            "Thanks for explaining that",
            "I'm glad we can talk about this",
            "What would feel easiest for you?",
        ],
    },
];

/// Returned when nothing in the cascade fired
const FALLBACK: CoachingRule = CoachingRule {
    when: When::LevelAbove(-1.0),
    severity: Severity::Neutral,
    message: "Neutral communication, no major triggers detected.",
    suggestions: [
        "I can handle this",
        "Let me take care of it",
        "No big deal, I'll do it",
        "Want to tackle this together?",
    ],
};

/// Maps a classification and the current avoidance level to coaching
///
/// Pure function; every input yields exactly one branch.
pub struct CoachingAdvisor;

impl CoachingAdvisor {
    pub fn new() -> Self {
        Self
    }

    /// Pick the first matching rule of the cascade
    pub fn advise(&self, result: &Classification, level: AvoidanceLevel) -> Coaching {
        RULES
            .iter()
            .find(|rule| rule.when.matches(result, level))
            .unwrap_or(&FALLBACK)
            .to_coaching()
    }
}

impl Default for CoachingAdvisor {
    fn default() -> Self {
        Self::new()
    }
}
