//! Text-generation capability consumed by the character engine.
//!
//! The engine itself only ever needs `generate(prompt) -> reply`. Providers
//! implement [`TextGeneration`] behind that seam; backend failures propagate
//! to the caller untouched — the engine owns no retries and no fallback
//! policy beyond what a provider does internally.

use std::fmt;

use async_trait::async_trait;

use crate::utilities::errors::GenerationError;

pub mod gemini;

pub use gemini::GeminiClient;

/// A text-generation backend.
#[async_trait]
pub trait TextGeneration: Send + Sync + fmt::Debug {
    /// The model identifier this backend generates with.
    fn model(&self) -> &str;

    /// Generate a reply for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Deterministic generation stub: replies with a fixed string regardless of
/// prompt. Used by handler tests and offline smoke runs.
#[derive(Debug, Clone)]
pub struct FixedResponder {
    reply: String,
}

impl FixedResponder {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

#[async_trait]
impl TextGeneration for FixedResponder {
    fn model(&self) -> &str {
        "fixed-responder"
    }

    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        Ok(self.reply.clone())
    }
}
