//! Phrase catalog for character speech and prompt templates.
//!
//! Stock greeting/response/closing pools per communication style, the
//! empathetic low-mood phrases, and the prompt template slices all live in
//! an embedded JSON file so the wording can be swapped (or localized)
//! without touching engine code. The default English catalog is embedded at
//! compile time.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Deserialize;

use crate::personality::style::CommunicationStyle;

/// Default English phrase catalog, embedded at compile time.
pub const EN_JSON: &str = include_str!("en.json");

/// Greeting/response/closing pools for one communication style.
#[derive(Debug, Clone, Deserialize)]
pub struct StylePools {
    /// Conversation-opening phrases.
    pub greetings: Vec<String>,
    /// Acknowledgement phrases.
    pub responses: Vec<String>,
    /// Conversation-closing phrases.
    pub closings: Vec<String>,
}

/// Fixed phrases used when the character's mood is low, regardless of style.
#[derive(Debug, Clone, Deserialize)]
pub struct EmpathyPhrases {
    pub greeting: String,
    pub closing: String,
}

/// Loaded phrase catalog: per-style pools, empathy fallbacks, and prompt
/// template slices.
#[derive(Debug, Clone, Deserialize)]
pub struct Phrases {
    pools: HashMap<String, StylePools>,
    empathy: EmpathyPhrases,
    slices: HashMap<String, String>,
}

impl Phrases {
    /// Load a catalog from a JSON string.
    ///
    /// # Panics
    /// Panics if the JSON is malformed or a style pool is empty — the
    /// embedded catalog is validated here once, at load time.
    pub fn from_json(json: &str) -> Self {
        let phrases: Phrases =
            serde_json::from_str(json).expect("Error decoding phrase catalog JSON.");
        for (style, pools) in &phrases.pools {
            assert!(
                !pools.greetings.is_empty()
                    && !pools.responses.is_empty()
                    && !pools.closings.is_empty(),
                "Phrase pools for style '{}' must not be empty.",
                style
            );
        }
        phrases
    }

    /// The phrase pools for a communication style.
    ///
    /// # Panics
    /// Panics if the catalog has no pools for the style.
    pub fn pools(&self, style: CommunicationStyle) -> &StylePools {
        self.pools
            .get(style.as_str())
            .unwrap_or_else(|| panic!("Phrase pools for style '{}' not found.", style.as_str()))
    }

    /// The fixed empathetic phrases.
    pub fn empathy(&self) -> &EmpathyPhrases {
        &self.empathy
    }

    /// Retrieve a prompt template slice by key.
    ///
    /// # Panics
    /// Panics if the slice is not present in the catalog.
    pub fn slice(&self, key: &str) -> &str {
        self.slices
            .get(key)
            .map(String::as_str)
            .unwrap_or_else(|| panic!("Prompt slice '{}' not found.", key))
    }
}

/// Global cached catalog (default embedded English phrases).
static DEFAULT_PHRASES: OnceLock<Phrases> = OnceLock::new();

/// Get the global cached phrase catalog.
pub fn phrases() -> &'static Phrases {
    DEFAULT_PHRASES.get_or_init(|| Phrases::from_json(EN_JSON))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_loads() {
        let p = Phrases::from_json(EN_JSON);
        assert_eq!(p.pools(CommunicationStyle::Casual).greetings.len(), 4);
        assert_eq!(p.pools(CommunicationStyle::Professional).closings.len(), 4);
    }

    #[test]
    fn test_empathy_phrases_fixed() {
        let p = phrases();
        assert_eq!(p.empathy().greeting, "I understand this might be difficult...");
        assert_eq!(p.empathy().closing, "I'm here to help if you need anything.");
    }

    #[test]
    fn test_slices_have_placeholders() {
        let p = phrases();
        assert!(p.slice("identity").contains("{name}"));
        assert!(p.slice("task").contains("{user_input}"));
        assert!(p.slice("introduction").contains("{greeting}"));
    }

    #[test]
    #[should_panic(expected = "not found")]
    fn test_unknown_slice_panics() {
        phrases().slice("no_such_slice");
    }
}
