//! Speech capabilities: voice capture and synthesis seams.
//!
//! Both directions are external collaborators — audio never touches the
//! character state. The engine only chooses *voice parameters* from the
//! profile; capturing microphone input and producing audio bytes is an
//! engine implementation's job, and both are fallible independently of the
//! character.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::character::profile::{CharacterProfile, Gender};
use crate::utilities::errors::SpeechError;

/// Slowest supported speaking rate (words per minute).
pub const MIN_RATE: u16 = 100;
/// Fastest supported speaking rate.
pub const MAX_RATE: u16 = 200;
/// Default speaking rate.
pub const DEFAULT_RATE: u16 = 150;

/// Voice selection and prosody settings for synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceParams {
    /// Voice selector, keyed off the character's gender.
    pub voice: String,
    /// Speaking rate in words per minute, within [`MIN_RATE`]..=[`MAX_RATE`].
    pub rate: u16,
    /// BCP-47-ish language tag.
    pub language: String,
}

impl Default for VoiceParams {
    fn default() -> Self {
        Self {
            voice: "neutral".to_string(),
            rate: DEFAULT_RATE,
            language: "en".to_string(),
        }
    }
}

impl VoiceParams {
    /// Voice parameters for a character profile: gender picks the voice,
    /// rate and language start at their defaults.
    pub fn for_profile(profile: &CharacterProfile) -> Self {
        let voice = match profile.gender {
            Gender::Female => "female",
            Gender::Male => "male",
            Gender::NonBinary => "neutral",
        };
        Self {
            voice: voice.to_string(),
            ..Self::default()
        }
    }

    /// Set the speaking rate, clamped to the supported range.
    pub fn with_rate(mut self, rate: u16) -> Self {
        self.rate = rate.clamp(MIN_RATE, MAX_RATE);
        self
    }
}

/// Voice capture: microphone (or equivalent) to text.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Capture one utterance and transcribe it.
    async fn capture(&self) -> Result<String, SpeechError>;
}

/// Text to audio bytes.
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Synthesize `text` with the given voice parameters.
    async fn synthesize(&self, text: &str, params: &VoiceParams)
        -> Result<Vec<u8>, SpeechError>;
}

/// Synthesis engine backed by an HTTP service (e.g. a local TTS server).
///
/// POSTs `{text, voice, rate, language}` and expects raw audio bytes back.
#[derive(Debug, Clone)]
pub struct HttpSynthesizer {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpSynthesizer {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl TextToSpeech for HttpSynthesizer {
    async fn synthesize(
        &self,
        text: &str,
        params: &VoiceParams,
    ) -> Result<Vec<u8>, SpeechError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({
                "text": text,
                "voice": params.voice,
                "rate": params.rate,
                "language": params.language,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SpeechError::Engine {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
