//! # Actions
//!
//! Everything that can happen in Sous becomes an `Action`.
//! User presses Enter in the chat box? That's `Action::Submit(text)`.
//! The provider answers? That's `Action::ReplyReceived(reply)`.
//!
//! The `update()` function takes the current state and an action,
//! mutates the state, and returns an `Effect` for the caller to carry out.
//! No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! A single send goes through:
//!
//! ```text
//! Idle ──Submit──► Sending ──ReplyReceived──► Idle (assistant message appended)
//!                     │
//!                     └─────ReplyFailed─────► Idle (toast raised)
//! ```

use std::time::Instant;

use log::{debug, info, warn};

use crate::core::notification::Notification;
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The search box changed; carries the full new query.
    SearchChanged(String),
    /// The user sent a chat message.
    Submit(String),
    /// The provider answered the pending turn.
    ReplyReceived(String),
    /// The pending turn failed; carries the error detail for the log.
    ReplyFailed(String),
    /// The user closed the toast.
    DismissNotification,
    /// Clock tick from the event loop; expires old toasts.
    Tick(Instant),
    Quit,
}

/// What the caller must do after `update()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Send this text to the provider and report back with
    /// `ReplyReceived` or `ReplyFailed`.
    SpawnRequest(String),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SearchChanged(query) => {
            debug!("Search query changed: {:?}", query);
            app.search_query = query;
            Effect::None
        }
        Action::Submit(text) => {
            if text.trim().is_empty() {
                debug!("Ignoring blank submit");
                return Effect::None;
            }
            if app.is_loading() {
                warn!("Submit while a request is in flight, ignoring");
                return Effect::None;
            }

            let turn = app.transcript.begin_turn(text);
            let message = turn.message().to_string();
            app.pending_turn = Some(turn);
            app.status_message = String::from("Waiting for the chef...");
            info!(
                "Chat turn started (transcript len={}, message_len={})",
                app.transcript.len(),
                message.len()
            );
            Effect::SpawnRequest(message)
        }
        Action::ReplyReceived(reply) => {
            let Some(turn) = app.pending_turn.take() else {
                warn!("Reply received with no pending turn, discarding");
                return Effect::None;
            };
            info!("Chat turn completed ({} reply bytes)", reply.len());
            app.transcript.complete_turn(turn, reply);
            app.status_message.clear();
            Effect::None
        }
        Action::ReplyFailed(detail) => {
            if app.pending_turn.take().is_none() {
                warn!("Failure reported with no pending turn, discarding: {}", detail);
                return Effect::None;
            }
            warn!("Chat turn failed: {}", detail);
            app.notification = Some(Notification::chat_failed());
            app.status_message.clear();
            Effect::None
        }
        Action::DismissNotification => {
            app.notification = None;
            Effect::None
        }
        Action::Tick(now) => {
            if app.notification.as_ref().is_some_and(|n| n.is_expired(now)) {
                debug!("Notification expired");
                app.notification = None;
            }
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
