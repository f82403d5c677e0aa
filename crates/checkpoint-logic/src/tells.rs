//! Behavioral tells: the simulated heart-rate reading shown during
//! interrogation.
//!
//! A subject's [`BpmTells`] bias the reading so it can disagree with the
//! surface evidence: a practiced liar stays calm, an innocent but
//! stressed subject spikes, and a subject whose claimed calm contradicts
//! the instrument reads high. Each call is an independent sample; nothing
//! is remembered between questions.
//!
//! ```
//! use checkpoint_logic::random::SeededRandom;
//! use checkpoint_logic::tells::{bpm, BpmTells, TellType};
//!
//! let tells = BpmTells { tell_type: Some(TellType::Contradiction), ..BpmTells::default() };
//! let mut rng = SeededRandom::new(3);
//! let reading = bpm(72, "identity-name", 1, Some(&tells), &mut rng);
//! assert!((40..=150).contains(&reading));
//! ```

use serde::{Deserialize, Serialize};

use crate::random::SeededRandom;

/// The one way a subject's reading is biased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TellType {
    /// Lying, but the reading stays low.
    FalseNegative,
    /// Honest, but the reading runs high.
    FalsePositive,
    /// Claims calm while the instrument says otherwise.
    Contradiction,
}

/// Per-subject tell configuration. Read-only.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BpmTells {
    #[serde(default)]
    pub base_elevation: f64,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub tell_type: Option<TellType>,
    #[serde(default)]
    pub is_good_liar: bool,
    #[serde(default)]
    pub is_genuinely_stressed: bool,
}

/// Question ids containing any of these read +10 higher.
pub static HIGH_STRESS_KEYWORDS: &[&str] = &["synthetic", "replicant", "surgery", "fingerprint"];

/// Tuning for the biometric reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiometricConfig {
    /// Lowest reading ever displayed.
    pub floor: u32,
    /// Highest reading ever displayed.
    pub ceiling: u32,
    /// Resting rate used when a subject has no explicit base.
    pub resting_bpm: u32,
    /// Suppression applied to a good liar with a false-negative tell.
    pub good_liar_suppression: f64,
    /// Boost for a genuinely stressed subject with a false-positive tell.
    pub stress_boost: f64,
    /// Boost for a contradiction tell.
    pub contradiction_boost: f64,
    /// Flat pressure added to every question.
    pub pressure_base: f64,
    /// Pressure added per question already asked.
    pub pressure_per_question: f64,
    /// Width of the uniform jitter `[0, jitter)`.
    pub jitter: f64,
    /// Extra pressure for high-stress topics.
    pub high_stress_boost: f64,
}

impl Default for BiometricConfig {
    fn default() -> Self {
        Self {
            floor: 40,
            ceiling: 150,
            resting_bpm: 72,
            good_liar_suppression: 15.0,
            stress_boost: 10.0,
            contradiction_boost: 20.0,
            pressure_base: 5.0,
            pressure_per_question: 5.0,
            jitter: 10.0,
            high_stress_boost: 10.0,
        }
    }
}

/// Whether a question touches a high-stress topic.
pub fn is_high_stress(question_id: &str) -> bool {
    let id = question_id.to_ascii_lowercase();
    HIGH_STRESS_KEYWORDS.iter().any(|k| id.contains(k))
}

/// The static part of the reading contributed by a subject's tells.
pub fn tell_modifier(tells: &BpmTells, config: &BiometricConfig) -> f64 {
    let adjustment = match tells.tell_type {
        Some(TellType::FalseNegative) if tells.is_good_liar => -config.good_liar_suppression,
        Some(TellType::FalsePositive) if tells.is_genuinely_stressed => config.stress_boost,
        Some(TellType::Contradiction) => config.contradiction_boost,
        Some(TellType::FalseNegative) | Some(TellType::FalsePositive) | None => 0.0,
    };
    tells.base_elevation + adjustment
}

/// Reading for one question, with default tuning.
pub fn bpm(
    base_bpm: u32,
    question_id: &str,
    question_number: u32,
    tells: Option<&BpmTells>,
    rng: &mut SeededRandom,
) -> u32 {
    bpm_with_config(
        base_bpm,
        question_id,
        question_number,
        tells,
        rng,
        &BiometricConfig::default(),
    )
}

/// Like [`bpm`] but with custom tuning.
///
/// Draws exactly one value from `rng`.
pub fn bpm_with_config(
    base_bpm: u32,
    question_id: &str,
    question_number: u32,
    tells: Option<&BpmTells>,
    rng: &mut SeededRandom,
    config: &BiometricConfig,
) -> u32 {
    let modifier = tells.map_or(0.0, |t| tell_modifier(t, config));
    let mut elevation = config.pressure_base
        + config.pressure_per_question * f64::from(question_number)
        + rng.next_f64() * config.jitter;
    if is_high_stress(question_id) {
        elevation += config.high_stress_boost;
    }
    let raw = (f64::from(base_bpm) + modifier + elevation).round();
    // ceiling wins over an inverted floor
    raw.max(f64::from(config.floor)).min(f64::from(config.ceiling)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tells(tell_type: Option<TellType>, liar: bool, stressed: bool) -> BpmTells {
        BpmTells {
            base_elevation: 0.0,
            tell_type,
            is_good_liar: liar,
            is_genuinely_stressed: stressed,
        }
    }

    #[test]
    fn modifier_per_tell_type() {
        let c = BiometricConfig::default();
        assert_eq!(tell_modifier(&tells(None, true, true), &c), 0.0);
        assert_eq!(tell_modifier(&tells(Some(TellType::FalseNegative), true, false), &c), -15.0);
        assert_eq!(tell_modifier(&tells(Some(TellType::FalseNegative), false, true), &c), 0.0);
        assert_eq!(tell_modifier(&tells(Some(TellType::FalsePositive), false, true), &c), 10.0);
        assert_eq!(tell_modifier(&tells(Some(TellType::FalsePositive), true, false), &c), 0.0);
        assert_eq!(tell_modifier(&tells(Some(TellType::Contradiction), true, true), &c), 20.0);
    }

    #[test]
    fn base_elevation_adds() {
        let t = BpmTells {
            base_elevation: 8.0,
            ..tells(Some(TellType::Contradiction), false, false)
        };
        assert_eq!(tell_modifier(&t, &BiometricConfig::default()), 28.0);
    }

    #[test]
    fn reading_within_expected_window() {
        // base 70, question 2, no tells: 70 + 15 + [0, 10)
        let mut rng = SeededRandom::new(10);
        for _ in 0..500 {
            let r = bpm(70, "identity-name", 2, None, &mut rng);
            assert!((85..=95).contains(&r), "reading {r}");
        }
    }

    #[test]
    fn high_stress_questions_read_higher() {
        assert!(is_high_stress("pressure-synthetic"));
        assert!(is_high_stress("pressure-FINGERPRINT"));
        assert!(!is_high_stress("identity-name"));

        let mut a = SeededRandom::new(4);
        let mut b = SeededRandom::new(4);
        let calm = bpm(70, "identity-name", 1, None, &mut a);
        let tense = bpm(70, "pressure-surgery", 1, None, &mut b);
        assert_eq!(tense, calm + 10);
    }

    #[test]
    fn good_liar_reads_lower_than_contradiction() {
        let liar = tells(Some(TellType::FalseNegative), true, false);
        let contra = tells(Some(TellType::Contradiction), false, false);
        let mut a = SeededRandom::new(77);
        let mut b = SeededRandom::new(77);
        let low = bpm(80, "warrant-status", 3, Some(&liar), &mut a);
        let high = bpm(80, "warrant-status", 3, Some(&contra), &mut b);
        assert_eq!(high, low + 35);
    }

    #[test]
    fn readings_always_clamped() {
        let extreme_high = BpmTells {
            base_elevation: 500.0,
            ..tells(Some(TellType::Contradiction), false, false)
        };
        let extreme_low = BpmTells {
            base_elevation: -500.0,
            ..tells(Some(TellType::FalseNegative), true, false)
        };
        let mut rng = SeededRandom::new(1);
        for q in 0..50 {
            for base in [0, 40, 72, 150, 400] {
                for t in [None, Some(&extreme_high), Some(&extreme_low)] {
                    let r = bpm(base, "pressure-replicant", q, t, &mut rng);
                    assert!((40..=150).contains(&r));
                }
            }
        }
        assert_eq!(bpm(72, "x", 1, Some(&extreme_high), &mut rng), 150);
        assert_eq!(bpm(72, "x", 1, Some(&extreme_low), &mut rng), 40);
    }

    #[test]
    fn tells_parse_with_type_key() {
        let json = r#"{
            "base_elevation": 5,
            "type": "FALSE_POSITIVE",
            "is_genuinely_stressed": true
        }"#;
        let t: BpmTells = serde_json::from_str(json).expect("tells should parse");
        assert_eq!(t.tell_type, Some(TellType::FalsePositive));
        assert!(t.is_genuinely_stressed);
        assert!(!t.is_good_liar);
    }

    #[test]
    fn inverted_bounds_pin_to_ceiling() {
        let config = BiometricConfig {
            floor: 150,
            ceiling: 40,
            ..BiometricConfig::default()
        };
        let mut rng = SeededRandom::new(4);
        for n in 1..=10 {
            let reading = bpm_with_config(72, "identity-name", n, None, &mut rng, &config);
            assert_eq!(reading, 40);
        }
    }
}
