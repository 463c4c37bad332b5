use std::fmt;

use async_trait::async_trait;

/// Errors that can occur while asking a provider for a reply.
/// All of them surface to the user as the same "no reply" notification;
/// the variant detail only goes to the log.
#[derive(Debug)]
pub enum ProviderError {
    /// Provider misconfigured (missing API key, bad URL).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The endpoint answered with a non-2xx status.
    Api { status: u16, message: String },
    /// The body was not the JSON we expected, or it carried no reply.
    Parse(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Config(msg) => write!(f, "config error: {msg}"),
            ProviderError::Network(msg) => write!(f, "network error: {msg}"),
            ProviderError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ProviderError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Everything a provider gets for one turn: the user's text and nothing else.
/// Earlier turns are never sent.
#[derive(Debug, Clone, Copy)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Sends one message and waits for the complete reply.
    async fn reply(&self, request: ChatRequest<'_>) -> Result<String, ProviderError>;
}

/// Rejects replies that carry nothing to show.
pub(crate) fn non_empty_reply(reply: Option<String>) -> Result<String, ProviderError> {
    match reply {
        Some(text) if !text.trim().is_empty() => Ok(text),
        Some(_) => Err(ProviderError::Parse("reply is empty".to_string())),
        None => Err(ProviderError::Parse("response has no reply".to_string())),
    }
}
