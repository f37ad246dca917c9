//! Trigger classification
//!
//! Scans one utterance against the lexicon and produces a per-category
//! occurrence count. A category counts once per distinct phrase found in the
//! text, regardless of how many times that phrase repeats.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::lexicon::{TriggerCategory, TriggerLexicon, LEXICON};

/// Per-category trigger counts for one utterance
///
/// Recomputed from scratch every turn; only the avoidance level carries
/// memory across turns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    counts: BTreeMap<TriggerCategory, u32>,
}

impl Classification {
    /// Count for one category (zero when nothing matched)
    pub fn count(&self, category: TriggerCategory) -> u32 {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    /// Check if any phrase of the category matched
    pub fn has(&self, category: TriggerCategory) -> bool {
        self.count(category) > 0
    }

    /// Record one matched phrase for a category
    pub fn record(&mut self, category: TriggerCategory) {
        *self.counts.entry(category).or_insert(0) += 1;
    }

    /// Sum of the five accumulating negative counts.
    ///
    /// `relationship_threat` is excluded: the ceiling rule consumes it before
    /// any accumulation happens, so it never competes with these totals.
    pub fn negative_total(&self) -> u32 {
        [
            TriggerCategory::DeflectionChallenge,
            TriggerCategory::CounterDeflection,
            TriggerCategory::PressingBehavior,
            TriggerCategory::EmotionalEscalation,
            TriggerCategory::PersonalAttack,
        ]
        .into_iter()
        .map(|c| self.count(c))
        .sum()
    }

    /// Check that no category matched at all
    pub fn is_neutral(&self) -> bool {
        self.counts.values().all(|&c| c == 0)
    }

    /// Categories with at least one match, lexicon order
    pub fn matched(&self) -> Vec<TriggerCategory> {
        TriggerCategory::ALL
            .into_iter()
            .filter(|c| self.has(*c))
            .collect()
    }
}

/// Trigger classifier
///
/// Pure function of (utterance, lexicon); never fails, any text including
/// the empty string yields a defined result.
pub struct TriggerClassifier {
    lexicon: &'static TriggerLexicon,
}

impl TriggerClassifier {
    /// Create a classifier over the built-in lexicon
    pub fn new() -> Self {
        Self { lexicon: &LEXICON }
    }

    /// Classify one utterance into per-category counts
    pub fn classify(&self, utterance: &str) -> Classification {
        let lower = utterance.to_lowercase();
        let mut result = Classification::default();

        for (category, phrases) in self.lexicon.entries() {
            for phrase in phrases {
                if lower.contains(phrase) {
                    result.record(category);
                }
            }
        }

        result
    }
}

impl Default for TriggerClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_all_zero() {
        let classifier = TriggerClassifier::new();
        let result = classifier.classify("");
        assert!(result.is_neutral());
        for category in TriggerCategory::ALL {
            assert_eq!(result.count(category), 0);
        }
    }

    #[test]
    fn test_case_insensitive() {
        let classifier = TriggerClassifier::new();
        let upper = classifier.classify("I HATE this");
        let lower = classifier.classify("i hate this");
        assert_eq!(upper, lower);
        assert!(upper.has(TriggerCategory::EmotionalEscalation));
    }

    #[test]
    fn test_counter_deflection_shorthand() {
        let classifier = TriggerClassifier::new();
        let result = classifier.classify("why cant u buy it?");
        assert!(result.count(TriggerCategory::CounterDeflection) >= 1);
        assert_eq!(result.negative_total(), 1);
    }

    #[test]
    fn test_personal_attack() {
        let classifier = TriggerClassifier::new();
        let result = classifier.classify("u hve too much ego");
        assert!(result.count(TriggerCategory::PersonalAttack) >= 1);
    }

    #[test]
    fn test_respectful_request_counts_once() {
        let classifier = TriggerClassifier::new();
        let result = classifier.classify("could you please take care of it");
        assert_eq!(result.count(TriggerCategory::PositiveCommunication), 1);
        assert_eq!(result.negative_total(), 0);
    }

    #[test]
    fn test_categories_are_not_exclusive() {
        let classifier = TriggerClassifier::new();
        // An attack and a validation phrase in the same message both count.
        let result = classifier.classify("i appreciate you but you never listen");
        assert!(result.has(TriggerCategory::Validation));
        assert!(result.has(TriggerCategory::PersonalAttack));
    }

    #[test]
    fn test_distinct_phrases_accumulate() {
        let classifier = TriggerClassifier::new();
        // "stupid" and "crazy" are distinct escalation phrases.
        let result = classifier.classify("this is stupid and crazy");
        assert_eq!(result.count(TriggerCategory::EmotionalEscalation), 2);
        // "stupid" also sits in the personal-attack list.
        assert_eq!(result.count(TriggerCategory::PersonalAttack), 1);
    }

    #[test]
    fn test_repeated_phrase_counts_once() {
        let classifier = TriggerClassifier::new();
        let result = classifier.classify("whatever, whatever, whatever");
        assert_eq!(result.count(TriggerCategory::EmotionalEscalation), 1);
    }

    #[test]
    fn test_relationship_threat() {
        let classifier = TriggerClassifier::new();
        let result = classifier.classify("i want a divorce, we're done");
        assert!(result.count(TriggerCategory::RelationshipThreat) >= 2);
    }
}
