//! Conversation Memory
//!
//! Rolling buffer of prior turns, capped by an approximate token budget.
//! The oldest turns are evicted first once the budget is exceeded.

use serde::{Deserialize, Serialize};

use crate::message::{Message, Role};

/// Default memory budget in estimated tokens
pub const DEFAULT_MEMORY_TOKEN_LIMIT: u32 = 3000;

/// Bounded conversation history supplied as context to agent calls
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MemoryBuffer {
    messages: Vec<Message>,

    /// Maximum history size (in estimated tokens)
    token_limit: u32,
}

impl Default for MemoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_TOKEN_LIMIT)
    }
}

impl MemoryBuffer {
    pub const fn new(token_limit: u32) -> Self {
        Self {
            messages: Vec::new(),
            token_limit,
        }
    }

    /// Append a turn, evicting the oldest turns if over budget
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.evict();
    }

    /// Record a completed exchange
    pub fn record_exchange(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.messages.push(Message::user(user));
        self.messages.push(Message::assistant(assistant));
        self.evict();
    }

    /// Get all retained turns, oldest first
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub const fn token_limit(&self) -> u32 {
        self.token_limit
    }

    /// Estimate total tokens currently held
    pub fn estimate_tokens(&self) -> u32 {
        self.messages.iter().map(Message::estimate_tokens).sum()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn evict(&mut self) {
        let mut total = self.estimate_tokens();
        let mut cut = 0;

        // The newest turn survives the budget check
        while total > self.token_limit && cut + 1 < self.messages.len() {
            total -= self.messages[cut].estimate_tokens();
            cut += 1;
        }

        // History must open on a user turn, even if that empties the buffer
        while cut < self.messages.len() && self.messages[cut].role != Role::User {
            cut += 1;
        }

        if cut > 0 {
            tracing::debug!(evicted = cut, limit = self.token_limit, "Evicting oldest memory turns");
            self.messages.drain(..cut);
        }
    }
}
