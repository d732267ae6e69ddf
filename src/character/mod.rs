//! The character itself: profile + personality engine + conversation memory
//! behind one per-turn operation.

pub mod profile;

use crate::memory::ConversationMemory;
use crate::personality::style::StyleDescriptor;
use crate::personality::PersonalityEngine;
use crate::personality::emotion::EmotionalState;
use crate::utilities::prompts;
use profile::CharacterProfile;

/// A simulated character in conversation with one user.
///
/// Owns its profile (read-only after creation), a [`PersonalityEngine`], and
/// a [`ConversationMemory`]. One instance per session; no sharing across
/// characters. Callers must serialize turns against a single instance —
/// there is no internal locking.
#[derive(Debug)]
pub struct AICharacter {
    profile: CharacterProfile,
    personality: PersonalityEngine,
    /// Conversation memory. Public so the caller can record both sides of a
    /// turn once the external reply is known.
    pub memory: ConversationMemory,
    last_style: StyleDescriptor,
}

impl AICharacter {
    /// Create a character from a validated profile, starting at neutral
    /// mood with empty memory.
    pub fn new(profile: CharacterProfile) -> Self {
        let personality = PersonalityEngine::new(
            profile.personality_traits,
            profile.communication_style,
        );
        let last_style = personality.get_response_style();
        Self {
            profile,
            personality,
            memory: ConversationMemory::new(),
            last_style,
        }
    }

    /// The character's immutable profile.
    pub fn profile(&self) -> &CharacterProfile {
        &self.profile
    }

    /// Snapshot of the current mood.
    pub fn emotional_state(&self) -> EmotionalState {
        self.personality.emotional_state()
    }

    /// The personality engine (mood + style policy).
    pub fn personality(&self) -> &PersonalityEngine {
        &self.personality
    }

    /// Mutable personality access, for callers that need to force the mood.
    pub fn personality_mut(&mut self) -> &mut PersonalityEngine {
        &mut self.personality
    }

    /// The style descriptor computed on the most recent turn.
    ///
    /// Feeds the spoken/greeting layer; it is intentionally not embedded
    /// into the generation prompt.
    pub fn last_style(&self) -> &StyleDescriptor {
        &self.last_style
    }

    /// Run one user turn through the character state and assemble the
    /// outbound generation prompt.
    ///
    /// In order: retrieves the recent-context summary, updates the mood from
    /// the input, refreshes the response style for the spoken layer, and
    /// renders the prompt. Does not mutate memory — recording both sides of
    /// the exchange is the caller's responsibility once the external reply
    /// is known. Never fails; the prompt is always non-empty.
    pub fn process_interaction(&mut self, user_input: &str) -> String {
        let context = self.memory.get_relevant_context(user_input);
        self.personality.update_emotional_state(user_input);
        self.last_style = self.personality.get_response_style();

        let prompt = prompts::interaction_prompt(&self.profile, &context, user_input);
        log::debug!(
            "{}: prompt assembled ({} chars, {} context turns in window)",
            self.profile.name,
            prompt.len(),
            if context.is_empty() { 0 } else { context.lines().count() },
        );
        prompt
    }

    /// The character's opening line for a new conversation: a styled
    /// greeting plus a self-introduction.
    pub fn initial_greeting(&self) -> String {
        let style = self.personality.get_response_style();
        prompts::introduction_line(&self.profile, &style.greeting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::profile::test_support::sample_config;
    use crate::memory::TurnRecord;
    use crate::phrases::phrases;
    use crate::personality::style::CommunicationStyle;

    fn character() -> AICharacter {
        AICharacter::new(CharacterProfile::from_config(sample_config()).unwrap())
    }

    #[test]
    fn test_process_interaction_embeds_input_name_and_background() {
        let mut character = character();
        let prompt = character.process_interaction("Hello there");

        assert!(prompt.contains("Hello there"));
        assert!(prompt.contains("Luna"));
        assert!(prompt.contains(&character.profile().background.clone()));
        assert!(!prompt.is_empty());
    }

    #[test]
    fn test_process_interaction_does_not_mutate_memory() {
        let mut character = character();
        character.memory.add_memory(TurnRecord::user("earlier message"));

        let before = character.memory.total_turns();
        character.process_interaction("Hello there");
        assert_eq!(character.memory.total_turns(), before);
    }

    #[test]
    fn test_process_interaction_updates_mood() {
        let mut character = character();
        let before = character.emotional_state();
        character.process_interaction("thanks this is great");
        let after = character.emotional_state();
        assert!(after.valence > before.valence);
    }

    #[test]
    fn test_recorded_turns_appear_in_next_prompt() {
        let mut character = character();
        character.memory.add_memory(TurnRecord::user("I like rockets"));
        character
            .memory
            .add_memory(TurnRecord::assistant("Rockets are great!"));

        let prompt = character.process_interaction("tell me more");
        assert!(prompt.contains("user: I like rockets"));
        assert!(prompt.contains("assistant: Rockets are great!"));
    }

    #[test]
    fn test_last_style_refreshed_per_turn_from_configured_pool() {
        let mut character = character();
        character.process_interaction("hi");

        let pools = phrases().pools(CommunicationStyle::Casual);
        let style = character.last_style();
        assert!(pools.greetings.contains(&style.greeting));
        assert!(pools.responses.contains(&style.response));
        assert!(pools.closings.contains(&style.closing));
    }

    #[test]
    fn test_low_mood_turn_produces_empathetic_style() {
        let mut character = character();
        character.personality_mut().emotional_state_mut().valence = 0.1;

        character.process_interaction("everything is fine I guess");
        assert!(character.personality().emotional_state().valence < 0.3);
        assert_eq!(
            character.last_style().greeting,
            "I understand this might be difficult..."
        );
    }

    #[test]
    fn test_initial_greeting_introduces_character() {
        let character = character();
        let greeting = character.initial_greeting();
        assert!(greeting.contains("I'm Luna."));
        assert!(greeting.contains("How can I help you today?"));
    }

    #[test]
    fn test_fresh_character_starts_neutral() {
        let character = character();
        let state = character.emotional_state();
        assert_eq!(state.valence, 0.5);
        assert_eq!(state.arousal, 0.5);
        assert_eq!(state.dominance, 0.5);
    }
}
