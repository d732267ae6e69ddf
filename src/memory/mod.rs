//! Conversation memory: a bounded short-term turn buffer with overflow into
//! an unbounded long-term log.
//!
//! Short-term memory is a FIFO recency window over the conversation; when it
//! is full, the oldest turn moves to the tail of the long-term log instead of
//! being dropped, so the total turn count is conserved across both buffers.
//! The long-term log is not read back by context retrieval.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Default short-term capacity in turns.
pub const DEFAULT_MAX_MEMORY: usize = 10;

/// Number of most recent turns included in the retrieval window.
const CONTEXT_WINDOW: usize = 3;

/// Which side of the conversation produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single conversational turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Who produced the turn.
    pub role: Role,
    /// The turn text, verbatim.
    pub content: String,
}

impl TurnRecord {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// A user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// An assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Bounded short-term buffer plus unbounded long-term log, one per
/// character.
#[derive(Debug, Clone)]
pub struct ConversationMemory {
    short_term: VecDeque<TurnRecord>,
    long_term: Vec<TurnRecord>,
    max_memory: usize,
}

impl Default for ConversationMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationMemory {
    /// Memory with the default short-term capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_MEMORY)
    }

    /// Memory with an explicit short-term capacity.
    pub fn with_capacity(max_memory: usize) -> Self {
        Self {
            short_term: VecDeque::with_capacity(max_memory),
            long_term: Vec::new(),
            max_memory,
        }
    }

    /// Record a turn. When the short-term buffer would exceed capacity, the
    /// oldest turn is evicted to the tail of the long-term log. Never fails.
    pub fn add_memory(&mut self, turn: TurnRecord) {
        self.short_term.push_back(turn);
        while self.short_term.len() > self.max_memory {
            // Eviction is append-only: the turn is archived, not dropped.
            if let Some(oldest) = self.short_term.pop_front() {
                self.long_term.push(oldest);
            }
        }
    }

    /// Compact recent-context summary: the last (up to) three short-term
    /// turns as `"role: content"` lines, oldest first.
    ///
    /// The query is accepted for interface compatibility but does not affect
    /// the result — this is a recency window, not a relevance search. Output
    /// is deterministic for fixed short-term contents.
    pub fn get_relevant_context(&self, _query: &str) -> String {
        let skip = self.short_term.len().saturating_sub(CONTEXT_WINDOW);
        self.short_term
            .iter()
            .skip(skip)
            .map(|turn| format!("{}: {}", turn.role, turn.content))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The short-term buffer, oldest first.
    pub fn short_term(&self) -> impl Iterator<Item = &TurnRecord> {
        self.short_term.iter()
    }

    /// The long-term log, oldest first.
    pub fn long_term(&self) -> &[TurnRecord] {
        &self.long_term
    }

    /// Short-term capacity in turns.
    pub fn max_memory(&self) -> usize {
        self.max_memory
    }

    /// Total turns held across both buffers.
    pub fn total_turns(&self) -> usize {
        self.short_term.len() + self.long_term.len()
    }
}
