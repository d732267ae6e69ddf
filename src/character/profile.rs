//! Character profiles — immutable identity, traits, and style settings.
//!
//! A profile is constructed once, at configuration time, from validated
//! fields; invalid values are rejected with [`ProfileError`], never clamped.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::personality::style::CommunicationStyle;
use crate::personality::PersonalityTraits;
use crate::utilities::errors::ProfileError;

/// Youngest configurable character age.
pub const MIN_AGE: u32 = 18;
/// Oldest configurable character age.
pub const MAX_AGE: u32 = 80;

/// Character gender. Drives voice selection and identity wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "female")]
    Female,
    #[serde(rename = "male")]
    Male,
    #[serde(rename = "non-binary")]
    NonBinary,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Female => "female",
            Self::Male => "male",
            Self::NonBinary => "non-binary",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration-time profile fields, as submitted by a caller.
///
/// The trait mapping is validated into a [`PersonalityTraits`] vector during
/// construction; everything else is checked for range and emptiness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    #[serde(default)]
    pub interests: Vec<String>,
    pub communication_style: CommunicationStyle,
    pub personality_traits: HashMap<String, f32>,
    /// Reserved payload, currently unused.
    #[serde(default)]
    pub speaking_style: HashMap<String, String>,
}

/// Immutable description of a character: identity, fixed trait vector,
/// interests, and communication style. Owned read-only by the character for
/// its whole lifetime.
#[derive(Debug, Clone, Serialize)]
pub struct CharacterProfile {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub interests: Vec<String>,
    /// Free-text self-description derived from the other fields.
    pub background: String,
    pub communication_style: CommunicationStyle,
    pub personality_traits: PersonalityTraits,
    /// Reserved payload, currently unused.
    pub speaking_style: HashMap<String, String>,
}

impl CharacterProfile {
    /// Construct a validated profile from configuration fields.
    ///
    /// The `configure` operation: rejects an empty name, an age outside
    /// [`MIN_AGE`]..=[`MAX_AGE`], and any trait mapping that is not exactly
    /// the five Big Five keys with values in `[0, 1]`.
    pub fn from_config(config: ProfileConfig) -> Result<Self, ProfileError> {
        let name = config.name.trim().to_string();
        if name.is_empty() {
            return Err(ProfileError::EmptyName);
        }
        if !(MIN_AGE..=MAX_AGE).contains(&config.age) {
            return Err(ProfileError::AgeOutOfRange {
                age: config.age,
                min: MIN_AGE,
                max: MAX_AGE,
            });
        }
        let personality_traits = PersonalityTraits::from_map(&config.personality_traits)?;

        let background = derive_background(
            &name,
            config.age,
            config.gender,
            &config.interests,
            config.communication_style,
        );

        Ok(Self {
            name,
            age: config.age,
            gender: config.gender,
            interests: config.interests,
            background,
            communication_style: config.communication_style,
            personality_traits,
            speaking_style: config.speaking_style,
        })
    }
}

/// Compose the character's self-description from its configured fields.
fn derive_background(
    name: &str,
    age: u32,
    gender: Gender,
    interests: &[String],
    style: CommunicationStyle,
) -> String {
    let interest_list = interests
        .iter()
        .map(|i| i.to_lowercase())
        .collect::<Vec<_>>()
        .join(", ");
    let demeanor = match style {
        CommunicationStyle::Casual => "friendly and relaxed",
        CommunicationStyle::Professional => "professional and formal",
    };
    format!(
        "I am {}, a {}-year-old {} AI assistant with interests in {}. \
         I enjoy helping people while maintaining a {} demeanor.",
        name, age, gender, interest_list, demeanor
    )
}

#[cfg(test)]
pub mod test_support {
    use super::*;

    /// A valid configuration matching the engine's documented defaults.
    pub fn sample_config() -> ProfileConfig {
        let mut traits = HashMap::new();
        traits.insert("openness".to_string(), 0.7);
        traits.insert("conscientiousness".to_string(), 0.8);
        traits.insert("extraversion".to_string(), 0.6);
        traits.insert("agreeableness".to_string(), 0.75);
        traits.insert("neuroticism".to_string(), 0.3);

        ProfileConfig {
            name: "Luna".to_string(),
            age: 25,
            gender: Gender::Female,
            interests: vec!["Technology".to_string(), "Science".to_string()],
            communication_style: CommunicationStyle::Casual,
            personality_traits: traits,
            speaking_style: HashMap::new(),
        }
    }
}
