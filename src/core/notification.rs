//! # Notifications
//!
//! Transient, non-blocking messages shown as a toast. Only one is visible at
//! a time; raising a new one replaces the old.

use std::time::{Duration, Instant};

/// How long a toast stays up before it is dismissed automatically.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

pub const CHAT_FAILED_TITLE: &str = "Error";
pub const CHAT_FAILED_DESCRIPTION: &str = "could not get a reply from the AI assistant";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub raised_at: Instant,
}

impl Notification {
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            raised_at: Instant::now(),
        }
    }

    /// The one error users ever see: the assistant did not answer.
    pub fn chat_failed() -> Self {
        Self::new(CHAT_FAILED_TITLE, CHAT_FAILED_DESCRIPTION)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) >= NOTIFICATION_TTL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_failed_has_fixed_text() {
        let n = Notification::chat_failed();
        assert_eq!(n.title, "Error");
        assert_eq!(n.description, "could not get a reply from the AI assistant");
    }

    #[test]
    fn test_expiry() {
        let n = Notification::chat_failed();
        assert!(!n.is_expired(n.raised_at));
        assert!(!n.is_expired(n.raised_at + Duration::from_secs(4)));
        assert!(n.is_expired(n.raised_at + NOTIFICATION_TTL));
    }
}
