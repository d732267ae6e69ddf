//! Communication styles and the per-turn response style descriptor.

use serde::{Deserialize, Serialize};

/// Fixed communication style configured on a character profile.
///
/// Selects which pool of stock greeting/response/closing phrases the
/// personality engine samples from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommunicationStyle {
    Casual,
    Professional,
}

impl CommunicationStyle {
    /// Catalog key for this style.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Casual => "casual",
            Self::Professional => "professional",
        }
    }
}

impl std::fmt::Display for CommunicationStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Phrase selection for one conversational turn.
///
/// Produced by the personality engine from the current mood and the
/// configured communication style. Consumed by the spoken/greeting layer —
/// deliberately not embedded verbatim into the generation prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleDescriptor {
    /// Conversation-opening phrase.
    pub greeting: String,
    /// Acknowledgement phrase.
    pub response: String,
    /// Conversation-closing phrase.
    pub closing: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_serde_round_trip() {
        let json = serde_json::to_string(&CommunicationStyle::Professional).unwrap();
        assert_eq!(json, "\"professional\"");
        let back: CommunicationStyle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CommunicationStyle::Professional);
    }

    #[test]
    fn test_style_display_matches_catalog_key() {
        assert_eq!(CommunicationStyle::Casual.to_string(), "casual");
        assert_eq!(CommunicationStyle::Professional.to_string(), "professional");
    }
}
