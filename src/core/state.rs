//! # Application State
//!
//! Core business state for Sous. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── provider: Arc<dyn ChatProvider>   // answers chat messages
//! ├── catalog: Catalog                  // fixed recipe list
//! ├── search_query: String              // drives the recipe filter
//! ├── transcript: Transcript            // append-only chat history
//! ├── pending_turn: Option<PendingTurn> // Some while a request is out
//! ├── notification: Option<Notification>// visible toast, if any
//! └── status_message: String            // header status text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! The chat input buffer is owned by the TUI input box; it reaches the core
//! only as the text of `Action::Submit`.

use std::sync::Arc;

use crate::core::catalog::{Catalog, Recipe};
use crate::core::notification::Notification;
use crate::core::transcript::{PendingTurn, Transcript};
use crate::inference::ChatProvider;

pub struct App {
    pub provider: Arc<dyn ChatProvider>,
    pub catalog: Catalog,
    pub search_query: String,
    pub transcript: Transcript,
    /// The turn waiting on the provider. Its presence is the loading flag.
    pub pending_turn: Option<PendingTurn>,
    pub notification: Option<Notification>,
    pub status_message: String,
}

impl App {
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self::with_catalog(provider, Catalog::builtin())
    }

    pub fn with_catalog(provider: Arc<dyn ChatProvider>, catalog: Catalog) -> Self {
        Self {
            provider,
            catalog,
            search_query: String::new(),
            transcript: Transcript::new(),
            pending_turn: None,
            notification: None,
            status_message: String::from("Welcome to Sous!"),
        }
    }

    /// True exactly while a chat request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.pending_turn.is_some()
    }

    /// Whether a new message may be sent right now.
    pub fn can_send(&self) -> bool {
        !self.is_loading()
    }

    /// Recipes matching the current search, recomputed on every call.
    pub fn filtered_recipes(&self) -> Vec<&Recipe> {
        self.catalog.filter(&self.search_query)
    }
}
