//! Error types for the character engine.

use thiserror::Error;

/// Configuration-time profile errors.
///
/// Invalid fields are rejected at profile construction, never silently
/// clamped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    /// Character name was empty or whitespace.
    #[error("character name must not be empty")]
    EmptyName,

    /// Age outside the accepted configuration range.
    #[error("age {age} is outside the accepted range {min}-{max}")]
    AgeOutOfRange { age: u32, min: u32, max: u32 },

    /// One of the five required personality traits was not supplied.
    #[error("missing required personality trait '{0}'")]
    MissingTrait(&'static str),

    /// A trait key outside the fixed Big Five set was supplied.
    #[error("unknown personality trait '{0}'")]
    UnknownTrait(String),

    /// A trait value left the unit interval.
    #[error("personality trait '{name}' must be within [0, 1], got {value}")]
    TraitOutOfRange { name: &'static str, value: f32 },
}

/// Errors from the external text-generation backend.
///
/// The engine does not catch or retry these beyond what the provider itself
/// does; they propagate to the caller, which decides whether to retry or
/// surface the failure.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No API key configured for the backend.
    #[error("generation API key is not configured")]
    MissingApiKey,

    /// Transport-level failure.
    #[error("generation request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with an error payload or client-error status.
    #[error("generation backend returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The backend answered 200 but the payload was not in the expected shape.
    #[error("malformed generation response: {0}")]
    MalformedResponse(String),

    /// Transient failures (rate limit, server errors) survived every retry.
    #[error("generation backend unavailable after retries: {0}")]
    RetriesExhausted(String),
}

/// Errors from the speech capabilities (capture and synthesis).
#[derive(Debug, Error)]
pub enum SpeechError {
    /// No speech engine configured for this deployment.
    #[error("speech engine is not configured")]
    Unconfigured,

    /// Transport-level failure.
    #[error("speech request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The engine answered with a non-success status.
    #[error("speech engine returned {status}: {message}")]
    Engine { status: u16, message: String },
}
