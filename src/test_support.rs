//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::inference::{ChatProvider, ChatRequest, ProviderError};

/// A provider that answers every message with a fixed reply (or fails),
/// counting how often it was asked.
pub struct StubProvider {
    reply: Option<String>,
    calls: AtomicUsize,
}

impl StubProvider {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    async fn reply(&self, _request: ChatRequest<'_>) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Some(text) => Ok(text.clone()),
            None => Err(ProviderError::Network("stub failure".to_string())),
        }
    }
}

/// Creates a test App with a StubProvider that always replies "ok".
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(StubProvider::replying("ok")))
}
