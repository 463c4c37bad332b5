//! # Transcript
//!
//! The append-only chat history for the current run.
//!
//! A chat turn is a two-phase update:
//!
//! ```text
//! begin_turn(text)            complete_turn(turn, reply)
//!   ── push User ──► PendingTurn ──────────► push Assistant
//!                        │
//!                        └── dropped on failure (nothing pushed)
//! ```
//!
//! The user message is always recorded when the turn starts; the assistant
//! message only when a reply arrives. There is no API for editing or removing
//! a message once it is in.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Token for a turn whose user message is recorded but whose reply is outstanding.
///
/// Not `Clone`: a turn is completed at most once.
#[derive(Debug, PartialEq, Eq)]
pub struct PendingTurn {
    user_index: usize,
    message: String,
}

impl PendingTurn {
    /// The raw text to send to the provider.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Transcript index of the user message that opened this turn.
    pub fn user_index(&self) -> usize {
        self.user_index
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Phase one: record the user's message and hand back the pending turn.
    pub fn begin_turn(&mut self, text: impl Into<String>) -> PendingTurn {
        let message = text.into();
        let user_index = self.messages.len();
        self.messages.push(Message::user(message.clone()));
        PendingTurn {
            user_index,
            message,
        }
    }

    /// Phase two: record the assistant's reply for a pending turn.
    pub fn complete_turn(&mut self, turn: PendingTurn, reply: impl Into<String>) {
        debug_assert!(turn.user_index < self.messages.len());
        self.messages.push(Message::assistant(reply));
    }
}
