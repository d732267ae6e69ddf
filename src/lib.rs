//! # animus
//!
//! Character-state engine for AI character chat. A character is a fixed
//! Big Five personality profile plus a transient PAD
//! (valence/arousal/dominance) emotional state, a bounded conversation
//! memory, and prompt-construction logic that fuses all three with user
//! input for an external text-generation backend.
//!
//! The per-turn flow: user text → [`AICharacter::process_interaction`] →
//! prompt string → external generation → reply → caller records both turns
//! via [`ConversationMemory::add_memory`].

pub mod character;
pub mod llm;
pub mod memory;
pub mod personality;
pub mod phrases;
pub mod server;
pub mod speech;
pub mod utilities;

pub use character::profile::{CharacterProfile, Gender, ProfileConfig};
pub use character::AICharacter;
pub use llm::{GeminiClient, TextGeneration};
pub use memory::{ConversationMemory, Role, TurnRecord};
pub use personality::emotion::EmotionalState;
pub use personality::style::{CommunicationStyle, StyleDescriptor};
pub use personality::{PersonalityEngine, PersonalityTraits};
pub use utilities::errors::{GenerationError, ProfileError, SpeechError};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
