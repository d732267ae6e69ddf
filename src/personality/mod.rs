//! Personality model: fixed Big Five traits, the evolving emotional state,
//! and the engine that turns both into a per-turn response style.
//!
//! The mood model is deliberately minimal and explainable: each trait
//! modulates exactly one PAD axis's sensitivity, so the mood drifts visibly
//! across a conversation without a black-box affect model.

pub mod emotion;
pub mod style;

use std::collections::{BTreeMap, HashMap, HashSet};

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::phrases::phrases;
use crate::utilities::errors::ProfileError;
use emotion::EmotionalState;
use style::{CommunicationStyle, StyleDescriptor};

/// The five required trait keys, in canonical order.
pub const TRAIT_NAMES: [&str; 5] = [
    "openness",
    "conscientiousness",
    "extraversion",
    "agreeableness",
    "neuroticism",
];

/// Valence step per net sentiment word.
const VALENCE_STEP: f32 = 0.1;
/// Token count that maps to one full unit of extraversion-weighted arousal.
const AROUSAL_LENGTH_SCALE: f32 = 20.0;
/// Constant arousal decay applied every turn, absent stimulation.
const AROUSAL_DECAY: f32 = 0.1;
/// Dominance step per unit of (conscientiousness − neuroticism).
const DOMINANCE_STEP: f32 = 0.05;
/// Below this valence the empathetic fallback overrides styled phrases.
const LOW_VALENCE_THRESHOLD: f32 = 0.3;

/// Fixed positive-sentiment lexicon (lower-cased comparison).
static POSITIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["happy", "good", "great", "awesome", "excellent", "thanks", "please"]
        .into_iter()
        .collect()
});

/// Fixed negative-sentiment lexicon (lower-cased comparison).
static NEGATIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["sad", "bad", "awful", "terrible", "angry", "upset"]
        .into_iter()
        .collect()
});

/// Big Five trait vector, each value in `[0, 1]`.
///
/// Fixed at configuration time; only the transient [`EmotionalState`]
/// evolves afterwards. The struct shape guarantees the profile invariant:
/// exactly the five named traits, no more, no less.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersonalityTraits {
    pub openness: f32,
    pub conscientiousness: f32,
    pub extraversion: f32,
    pub agreeableness: f32,
    pub neuroticism: f32,
}

impl PersonalityTraits {
    /// Validate a name→value mapping into a trait vector.
    ///
    /// Rejects (never clamps) missing keys, unknown keys, and out-of-range
    /// values.
    pub fn from_map(map: &HashMap<String, f32>) -> Result<Self, ProfileError> {
        for key in map.keys() {
            if !TRAIT_NAMES.contains(&key.as_str()) {
                return Err(ProfileError::UnknownTrait(key.clone()));
            }
        }

        let get = |name: &'static str| -> Result<f32, ProfileError> {
            let value = *map.get(name).ok_or(ProfileError::MissingTrait(name))?;
            if !(0.0..=1.0).contains(&value) {
                return Err(ProfileError::TraitOutOfRange { name, value });
            }
            Ok(value)
        };

        Ok(Self {
            openness: get("openness")?,
            conscientiousness: get("conscientiousness")?,
            extraversion: get("extraversion")?,
            agreeableness: get("agreeableness")?,
            neuroticism: get("neuroticism")?,
        })
    }

    /// The trait vector as a name→value mapping, in canonical order.
    pub fn to_map(&self) -> BTreeMap<&'static str, f32> {
        BTreeMap::from([
            ("openness", self.openness),
            ("conscientiousness", self.conscientiousness),
            ("extraversion", self.extraversion),
            ("agreeableness", self.agreeableness),
            ("neuroticism", self.neuroticism),
        ])
    }
}

/// Owns the character's emotional state, applies the per-turn mood update,
/// and derives the response style from mood plus communication style.
#[derive(Debug, Clone)]
pub struct PersonalityEngine {
    traits: PersonalityTraits,
    communication_style: CommunicationStyle,
    state: EmotionalState,
}

impl PersonalityEngine {
    /// Create an engine starting from neutral mood.
    pub fn new(traits: PersonalityTraits, communication_style: CommunicationStyle) -> Self {
        Self {
            traits,
            communication_style,
            state: EmotionalState::neutral(),
        }
    }

    /// The fixed trait vector this engine weights updates with.
    pub fn traits(&self) -> &PersonalityTraits {
        &self.traits
    }

    /// Snapshot of the current mood.
    pub fn emotional_state(&self) -> EmotionalState {
        self.state
    }

    /// Mutable access to the mood, for callers that need to force an axis.
    pub fn emotional_state_mut(&mut self) -> &mut EmotionalState {
        &mut self.state
    }

    /// Apply one user turn to the mood. Total over arbitrary input; every
    /// axis is clamped to `[0, 1]` after its update.
    ///
    /// - valence moves with net sentiment-word count, dampened by
    ///   neuroticism;
    /// - arousal rises with message length weighted by extraversion, and
    ///   decays by a constant each turn;
    /// - dominance drifts along (conscientiousness − neuroticism).
    pub fn update_emotional_state(&mut self, user_input: &str) {
        let lowered = user_input.to_lowercase();
        let tokens: Vec<&str> = lowered.split_whitespace().collect();

        let positive = tokens
            .iter()
            .filter(|t| POSITIVE_WORDS.contains(**t))
            .count() as i64;
        let negative = tokens
            .iter()
            .filter(|t| NEGATIVE_WORDS.contains(**t))
            .count() as i64;

        let valence_change = (positive - negative) as f32 * VALENCE_STEP;
        self.state
            .shift_valence(valence_change * (1.0 - self.traits.neuroticism));

        let arousal_change =
            (tokens.len() as f32 / AROUSAL_LENGTH_SCALE) * self.traits.extraversion;
        self.state.shift_arousal(arousal_change - AROUSAL_DECAY);

        let dominance_change =
            (self.traits.conscientiousness - self.traits.neuroticism) * DOMINANCE_STEP;
        self.state.shift_dominance(dominance_change);

        log::debug!(
            "mood update: +{}/-{} sentiment, {} tokens -> v={:.2} a={:.2} d={:.2}",
            positive,
            negative,
            tokens.len(),
            self.state.valence,
            self.state.arousal,
            self.state.dominance,
        );
    }

    /// Derive the response style from the current mood, sampling phrase
    /// pools through the supplied random source.
    ///
    /// Low valence overrides styled variety: below the threshold the
    /// greeting and closing are the fixed empathetic phrases and only the
    /// response phrase is drawn from the configured style's pool.
    pub fn response_style<R: Rng + ?Sized>(&self, rng: &mut R) -> StyleDescriptor {
        let catalog = phrases();
        let pools = catalog.pools(self.communication_style);

        let pick = |pool: &[String], rng: &mut R| -> String {
            pool.choose(rng)
                .cloned()
                .expect("phrase pools are validated non-empty at load")
        };

        if self.state.valence < LOW_VALENCE_THRESHOLD {
            StyleDescriptor {
                greeting: catalog.empathy().greeting.clone(),
                response: pick(&pools.responses, rng),
                closing: catalog.empathy().closing.clone(),
            }
        } else {
            StyleDescriptor {
                greeting: pick(&pools.greetings, rng),
                response: pick(&pools.responses, rng),
                closing: pick(&pools.closings, rng),
            }
        }
    }

    /// [`Self::response_style`] with a thread-local entropy source — the
    /// production path, where variety (not determinism) is the goal.
    pub fn get_response_style(&self) -> StyleDescriptor {
        self.response_style(&mut rand::thread_rng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn default_traits() -> PersonalityTraits {
        PersonalityTraits {
            openness: 0.7,
            conscientiousness: 0.8,
            extraversion: 0.6,
            agreeableness: 0.75,
            neuroticism: 0.3,
        }
    }

    fn engine(style: CommunicationStyle) -> PersonalityEngine {
        PersonalityEngine::new(default_traits(), style)
    }

    #[test]
    fn test_traits_round_trip() {
        let mut map = HashMap::new();
        map.insert("openness".to_string(), 0.7);
        map.insert("conscientiousness".to_string(), 0.8);
        map.insert("extraversion".to_string(), 0.6);
        map.insert("agreeableness".to_string(), 0.75);
        map.insert("neuroticism".to_string(), 0.3);

        let traits = PersonalityTraits::from_map(&map).unwrap();
        let back = traits.to_map();
        assert_eq!(back.len(), 5);
        assert_eq!(back["openness"], 0.7);
        assert_eq!(back["conscientiousness"], 0.8);
        assert_eq!(back["extraversion"], 0.6);
        assert_eq!(back["agreeableness"], 0.75);
        assert_eq!(back["neuroticism"], 0.3);
    }

    #[test]
    fn test_traits_missing_key_rejected() {
        let mut map = HashMap::new();
        map.insert("openness".to_string(), 0.5);
        let err = PersonalityTraits::from_map(&map).unwrap_err();
        assert!(matches!(err, ProfileError::MissingTrait(_)));
    }

    #[test]
    fn test_traits_unknown_key_rejected() {
        let mut map: HashMap<String, f32> = TRAIT_NAMES
            .iter()
            .map(|n| (n.to_string(), 0.5))
            .collect();
        map.insert("charisma".to_string(), 0.9);
        let err = PersonalityTraits::from_map(&map).unwrap_err();
        assert!(matches!(err, ProfileError::UnknownTrait(ref k) if k == "charisma"));
    }

    #[test]
    fn test_traits_out_of_range_rejected_not_clamped() {
        let mut map: HashMap<String, f32> = TRAIT_NAMES
            .iter()
            .map(|n| (n.to_string(), 0.5))
            .collect();
        map.insert("neuroticism".to_string(), 1.2);
        let err = PersonalityTraits::from_map(&map).unwrap_err();
        assert!(matches!(
            err,
            ProfileError::TraitOutOfRange { name: "neuroticism", .. }
        ));
    }

    #[test]
    fn test_positive_input_raises_valence() {
        let mut e = engine(CommunicationStyle::Casual);
        let before = e.emotional_state().valence;
        e.update_emotional_state("thanks this is great and awesome");
        assert!(e.emotional_state().valence > before);
    }

    #[test]
    fn test_negative_input_lowers_valence() {
        let mut e = engine(CommunicationStyle::Casual);
        let before = e.emotional_state().valence;
        e.update_emotional_state("this is bad awful terrible");
        assert!(e.emotional_state().valence < before);
    }

    #[test]
    fn test_neuroticism_dampens_valence_swing() {
        let calm = PersonalityTraits {
            neuroticism: 0.0,
            ..default_traits()
        };
        let anxious = PersonalityTraits {
            neuroticism: 0.9,
            ..default_traits()
        };
        let mut calm_engine = PersonalityEngine::new(calm, CommunicationStyle::Casual);
        let mut anxious_engine = PersonalityEngine::new(anxious, CommunicationStyle::Casual);

        calm_engine.update_emotional_state("great");
        anxious_engine.update_emotional_state("great");

        assert!(
            calm_engine.emotional_state().valence > anxious_engine.emotional_state().valence
        );
    }

    #[test]
    fn test_arousal_decays_without_stimulation() {
        let mut e = engine(CommunicationStyle::Casual);
        // One token: length contribution (1/20 * 0.6) is below the decay.
        e.update_emotional_state("ok");
        assert!(e.emotional_state().arousal < 0.5);
    }

    #[test]
    fn test_dominance_follows_trait_balance() {
        // conscientiousness 0.8 > neuroticism 0.3 — dominance drifts up.
        let mut e = engine(CommunicationStyle::Casual);
        e.update_emotional_state("hello");
        assert!(e.emotional_state().dominance > 0.5);
    }

    #[test]
    fn test_traits_are_fixed_across_updates() {
        let mut e = engine(CommunicationStyle::Casual);
        e.update_emotional_state("sad bad awful");
        e.update_emotional_state("great thanks");
        assert_eq!(*e.traits(), default_traits());
    }

    #[test]
    fn test_state_stays_bounded_over_long_sequences() {
        let mut e = engine(CommunicationStyle::Casual);
        let inputs = [
            "happy happy happy great awesome excellent thanks",
            "sad bad awful terrible angry upset sad bad",
            "",
            "a b c d e f g h i j k l m n o p q r s t u v w x y z",
            "THANKS PLEASE GREAT",
        ];
        for _ in 0..200 {
            for input in &inputs {
                e.update_emotional_state(input);
                assert!(e.emotional_state().in_bounds(), "state left [0,1]");
            }
        }
    }

    #[test]
    fn test_update_is_case_insensitive() {
        let mut upper = engine(CommunicationStyle::Casual);
        let mut lower = engine(CommunicationStyle::Casual);
        upper.update_emotional_state("GREAT THANKS");
        lower.update_emotional_state("great thanks");
        assert_eq!(upper.emotional_state(), lower.emotional_state());
    }

    #[test]
    fn test_low_valence_forces_empathetic_phrases() {
        let mut e = engine(CommunicationStyle::Casual);
        e.emotional_state_mut().valence = 0.1;

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let style = e.response_style(&mut rng);
            assert_eq!(style.greeting, "I understand this might be difficult...");
            assert_eq!(style.closing, "I'm here to help if you need anything.");
        }
    }

    #[test]
    fn test_low_valence_response_still_styled() {
        let mut e = engine(CommunicationStyle::Professional);
        e.emotional_state_mut().valence = 0.1;

        let mut rng = StdRng::seed_from_u64(11);
        let pools = phrases().pools(CommunicationStyle::Professional);
        let style = e.response_style(&mut rng);
        assert!(pools.responses.contains(&style.response));
    }

    #[test]
    fn test_neutral_mood_samples_configured_pools() {
        let e = engine(CommunicationStyle::Casual);
        let pools = phrases().pools(CommunicationStyle::Casual);

        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let style = e.response_style(&mut rng);
            assert!(pools.greetings.contains(&style.greeting));
            assert!(pools.responses.contains(&style.response));
            assert!(pools.closings.contains(&style.closing));
        }
    }
}
