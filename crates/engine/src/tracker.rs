//! Avoidance level state and its update rule
//!
//! The avoidance level is the one piece of state that survives across turns:
//! a scalar in [0.10, 0.95] modeling how defensive the simulated partner
//! currently is. Updates are driven by the turn's classification through an
//! ordered weight table so the escalation contract stays auditable in one
//! place.

use serde::{Deserialize, Serialize};

use crate::classifier::Classification;
use crate::lexicon::TriggerCategory;

/// Lower bound of the avoidance level
pub const LEVEL_FLOOR: f32 = 0.10;
/// Upper bound of the avoidance level
pub const LEVEL_CEILING: f32 = 0.95;
/// Starting disposition for a fresh session
const LEVEL_BASELINE: f32 = 0.60;
/// Passive de-escalation applied on a turn with no negative triggers
const NEUTRAL_DECAY: f32 = 0.05;

/// How an escalation weight scales with the trigger count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scaling {
    /// Applied once when the count is non-zero
    Flat,
    /// Multiplied by the count
    PerMatch,
}

/// Escalation weights, applied additively when the category fired.
///
/// Major triggers scale with how many distinct phrases matched; the three
/// deflection-conflict triggers apply once no matter the count.
const ESCALATION_WEIGHTS: [(TriggerCategory, f32, Scaling); 5] = [
    (TriggerCategory::PersonalAttack, 0.70, Scaling::PerMatch),
    (TriggerCategory::EmotionalEscalation, 0.50, Scaling::PerMatch),
    (TriggerCategory::PressingBehavior, 0.40, Scaling::Flat),
    (TriggerCategory::CounterDeflection, 0.30, Scaling::Flat),
    (TriggerCategory::DeflectionChallenge, 0.20, Scaling::Flat),
];

/// Recovery weights, each multiplied by the trigger count. Applied only on
/// turns entirely free of negative triggers.
const RECOVERY_WEIGHTS: [(TriggerCategory, f32); 3] = [
    (TriggerCategory::SpaceGiving, 0.20),
    (TriggerCategory::PositiveCommunication, 0.15),
    (TriggerCategory::Validation, 0.10),
];

/// The simulated partner's current defensiveness, clamped between
/// [`LEVEL_FLOOR`] and [`LEVEL_CEILING`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvoidanceLevel(f32);

impl AvoidanceLevel {
    /// Create a level, clamping into bounds
    pub fn new(value: f32) -> Self {
        Self(value.clamp(LEVEL_FLOOR, LEVEL_CEILING))
    }

    /// Starting level for a fresh session
    pub fn baseline() -> Self {
        Self(LEVEL_BASELINE)
    }

    /// Raw scalar value
    pub fn value(&self) -> f32 {
        self.0
    }

    /// Presentation band for the current level
    pub fn band(&self) -> AvoidanceBand {
        match self.0 {
            v if v > 0.8 => AvoidanceBand::Critical,
            v if v > 0.6 => AvoidanceBand::High,
            v if v > 0.4 => AvoidanceBand::Moderate,
            v if v > 0.2 => AvoidanceBand::Low,
            _ => AvoidanceBand::VeryLow,
        }
    }
}

impl Default for AvoidanceLevel {
    fn default() -> Self {
        Self::baseline()
    }
}

impl std::fmt::Display for AvoidanceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Coarse interpretation of the avoidance level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvoidanceBand {
    /// Highly defensive, following a real escalation pattern
    Critical,
    /// Entering defensive territory
    High,
    /// Comfortable but cautious
    Moderate,
    /// Feeling safe and open
    Low,
    /// Very comfortable
    VeryLow,
}

impl AvoidanceBand {
    /// Short description shown alongside the level
    pub fn describe(&self) -> &'static str {
        match self {
            AvoidanceBand::Critical => "Highly defensive and cornered",
            AvoidanceBand::High => "Entering defensive territory",
            AvoidanceBand::Moderate => "Comfortable but cautious",
            AvoidanceBand::Low => "Feeling safe and open",
            AvoidanceBand::VeryLow => "Very comfortable",
        }
    }
}

/// Applies the deterministic update rule to an avoidance level
///
/// The update is total: every (level, classification) pair yields a defined
/// in-bounds result. It is pure; the session decides when the new level is
/// committed.
pub struct AvoidanceTracker;

impl AvoidanceTracker {
    pub fn new() -> Self {
        Self
    }

    /// Compute the next level from the turn's classification.
    ///
    /// Rules, in priority order:
    /// 1. A relationship threat pins the level to the ceiling outright.
    /// 2. Escalation weights accumulate additively per fired category.
    /// 3. Recovery weights and the neutral decay apply only when no
    ///    accumulating negative trigger fired this turn.
    /// 4. The result is clamped into bounds.
    pub fn update(&self, level: AvoidanceLevel, result: &Classification) -> AvoidanceLevel {
        if result.has(TriggerCategory::RelationshipThreat) {
            return AvoidanceLevel::new(LEVEL_CEILING);
        }

        let mut value = level.value();

        for (category, weight, scaling) in ESCALATION_WEIGHTS {
            let count = result.count(category);
            if count == 0 {
                continue;
            }
            value += match scaling {
                Scaling::PerMatch => weight * count as f32,
                Scaling::Flat => weight,
            };
        }

        if result.negative_total() == 0 {
            for (category, weight) in RECOVERY_WEIGHTS {
                value -= weight * result.count(category) as f32;
            }
            value -= NEUTRAL_DECAY;
        }

        AvoidanceLevel::new(value)
    }
}

impl Default for AvoidanceTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::TriggerClassifier;

    const EPS: f32 = 1e-6;

    fn classify(text: &str) -> Classification {
        TriggerClassifier::new().classify(text)
    }

    #[test]
    fn test_baseline() {
        assert!((AvoidanceLevel::baseline().value() - 0.6).abs() < EPS);
    }

    #[test]
    fn test_threat_pins_to_ceiling_regardless_of_prior_state() {
        let tracker = AvoidanceTracker::new();
        let result = classify("i want a divorce");
        for prior in [0.1, 0.3, 0.6, 0.95] {
            let next = tracker.update(AvoidanceLevel::new(prior), &result);
            assert!((next.value() - 0.95).abs() < EPS);
        }
    }

    #[test]
    fn test_threat_overrides_cooccurring_triggers() {
        let tracker = AvoidanceTracker::new();
        // Threat plus attack plus validation: the ceiling rule wins.
        let result = classify("i appreciate you but you're useless and i want a divorce");
        let next = tracker.update(AvoidanceLevel::new(0.1), &result);
        assert!((next.value() - 0.95).abs() < EPS);
    }

    #[test]
    fn test_neutral_turn_decays() {
        let tracker = AvoidanceTracker::new();
        let result = classify("the groceries are on the counter");
        assert!(result.is_neutral());
        let next = tracker.update(AvoidanceLevel::new(0.6), &result);
        assert!((next.value() - 0.55).abs() < EPS);
    }

    #[test]
    fn test_neutral_decay_clamps_at_floor() {
        let tracker = AvoidanceTracker::new();
        let result = Classification::default();
        let next = tracker.update(AvoidanceLevel::new(0.12), &result);
        assert!((next.value() - 0.10).abs() < EPS);
    }

    #[test]
    fn test_counter_deflection_scenario() {
        let tracker = AvoidanceTracker::new();
        let result = classify("why cant u buy it?");
        let next = tracker.update(AvoidanceLevel::new(0.6), &result);
        assert!((next.value() - 0.9).abs() < EPS);
    }

    #[test]
    fn test_personal_attack_clamps_to_ceiling() {
        let tracker = AvoidanceTracker::new();
        let result = classify("u hve too much ego");
        let next = tracker.update(AvoidanceLevel::new(0.9), &result);
        assert!((next.value() - 0.95).abs() < EPS);
    }

    #[test]
    fn test_positive_request_recovers() {
        let tracker = AvoidanceTracker::new();
        let result = classify("could you please take care of it");
        let next = tracker.update(AvoidanceLevel::new(0.5), &result);
        // 0.5 - 0.15 (respectful request) - 0.05 (neutral decay)
        assert!((next.value() - 0.3).abs() < EPS);
    }

    #[test]
    fn test_negative_turn_blocks_recovery() {
        let tracker = AvoidanceTracker::new();
        // A hostile phrase is not forgiven by polite phrasing in the same turn.
        let result = classify("could you stop being so stupid");
        assert!(result.has(TriggerCategory::PositiveCommunication));
        let hostile_only = classify("stop being so stupid");
        let from_mixed = tracker.update(AvoidanceLevel::new(0.5), &result);
        let from_hostile = tracker.update(AvoidanceLevel::new(0.5), &hostile_only);
        assert!((from_mixed.value() - from_hostile.value()).abs() < EPS);
    }

    #[test]
    fn test_flat_weights_ignore_count() {
        let tracker = AvoidanceTracker::new();
        let single = classify("why cant you do it");
        let double = classify("why cant you do it, its your turn");
        assert!(double.count(TriggerCategory::CounterDeflection) > 1);
        let a = tracker.update(AvoidanceLevel::new(0.3), &single);
        let b = tracker.update(AvoidanceLevel::new(0.3), &double);
        assert!((a.value() - b.value()).abs() < EPS);
    }

    #[test]
    fn test_scaled_weights_grow_with_count() {
        let tracker = AvoidanceTracker::new();
        let mut one = Classification::default();
        one.record(TriggerCategory::EmotionalEscalation);
        let mut two = one.clone();
        two.record(TriggerCategory::EmotionalEscalation);

        let a = tracker.update(AvoidanceLevel::new(0.1), &one);
        let b = tracker.update(AvoidanceLevel::new(0.1), &two);
        assert!((a.value() - 0.6).abs() < EPS);
        assert!(b.value() > a.value());
    }

    #[test]
    fn test_monotonic_in_negative_counts() {
        let tracker = AvoidanceTracker::new();
        for category in [
            TriggerCategory::DeflectionChallenge,
            TriggerCategory::CounterDeflection,
            TriggerCategory::PressingBehavior,
            TriggerCategory::EmotionalEscalation,
            TriggerCategory::PersonalAttack,
        ] {
            let mut previous = None;
            for n in 0..4 {
                let mut result = Classification::default();
                for _ in 0..n {
                    result.record(category);
                }
                let next = tracker.update(AvoidanceLevel::new(0.3), &result).value();
                if let Some(prev) = previous {
                    assert!(next >= prev, "{category} not monotonic at count {n}");
                }
                previous = Some(next);
            }
        }
    }

    #[test]
    fn test_result_always_in_bounds() {
        let tracker = AvoidanceTracker::new();
        let inputs = [
            "",
            "i hate you, you're a pathetic stupid idiot, fuck this, we're done",
            "thank you, i appreciate you, no pressure, take your time",
            "why cant you just tell me why",
        ];
        for input in inputs {
            let result = classify(input);
            for prior in [0.1, 0.5, 0.95] {
                let next = tracker.update(AvoidanceLevel::new(prior), &result);
                assert!(next.value() >= LEVEL_FLOOR - EPS);
                assert!(next.value() <= LEVEL_CEILING + EPS);
            }
        }
    }

    #[test]
    fn test_band_thresholds() {
        assert_eq!(AvoidanceLevel::new(0.85).band(), AvoidanceBand::Critical);
        assert_eq!(AvoidanceLevel::new(0.7).band(), AvoidanceBand::High);
        assert_eq!(AvoidanceLevel::new(0.5).band(), AvoidanceBand::Moderate);
        assert_eq!(AvoidanceLevel::new(0.3).band(), AvoidanceBand::Low);
        assert_eq!(AvoidanceLevel::new(0.15).band(), AvoidanceBand::VeryLow);
    }
}
